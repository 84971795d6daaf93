use bevy::asset::{io::Reader, AssetLoader, LoadContext};

use super::{
	parser::{parse, LevelParsingError},
	LevelDataValidationError, ValidLevelData,
};
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
	app.init_asset::<ValidLevelData>();
	app.init_asset_loader::<LevelLoader>();
}

#[derive(Default)]
struct LevelLoader;

#[derive(Debug)]
pub enum LevelLoadingError {
	IO(std::io::Error),
	Encoding(std::string::FromUtf8Error),
	Parsing(LevelParsingError),
	Validation(LevelDataValidationError),
}

impl From<std::io::Error> for LevelLoadingError {
	fn from(value: std::io::Error) -> Self {
		Self::IO(value)
	}
}

impl From<std::string::FromUtf8Error> for LevelLoadingError {
	fn from(value: std::string::FromUtf8Error) -> Self {
		Self::Encoding(value)
	}
}

impl From<LevelParsingError> for LevelLoadingError {
	fn from(value: LevelParsingError) -> Self {
		Self::Parsing(value)
	}
}

impl From<LevelDataValidationError> for LevelLoadingError {
	fn from(value: LevelDataValidationError) -> Self {
		Self::Validation(value)
	}
}

impl std::fmt::Display for LevelLoadingError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::IO(e) => write!(f, "Level could not be loaded because of an IO error: {e}"),
			Self::Encoding(e) => write!(f, "Level file is not valid UTF-8: {e}"),
			Self::Parsing(e) => {
				write!(f, "Level could not be loaded because of a parsing error: {e}")
			}
			Self::Validation(e) => write!(f, "Level is not valid: {e}"),
		}
	}
}

impl std::error::Error for LevelLoadingError {}

impl AssetLoader for LevelLoader {
	type Asset = ValidLevelData;
	type Error = LevelLoadingError;
	type Settings = ();

	async fn load(
		&self,
		reader: &mut dyn Reader,
		_settings: &Self::Settings,
		load_context: &mut LoadContext<'_>,
	) -> Result<Self::Asset, Self::Error> {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes).await?;
		let source = String::from_utf8(bytes)?;
		let path = load_context.asset_path().clone();
		let level = parse(&source, |w| log::warn!("{path}: {w}"))?;
		Ok(level.try_into()?)
	}

	fn extensions(&self) -> &[&str] {
		&["gears.txt"]
	}
}
