//! Level description: pins, gears and the goal of a gears puzzle

use bevy::{math::Vec2, prelude::*};
use itertools::Itertools;

use crate::game::gears::{GearSettings, INACTIVE_PIN_LAYER, PIN_COLLIDER_RADIUS};

pub mod asset;
pub mod lex;
pub mod parser;

/// Level used when no level file has been supplied
pub const DEFAULT_LEVEL: &str = include_str!("../../../assets/levels/first_steps.gears.txt");

/// Parses and validates [`DEFAULT_LEVEL`]
pub fn builtin_level() -> Option<ValidLevelData> {
	let level = parser::parse(DEFAULT_LEVEL, |w| log::warn!("Built-in level: {w}"))
		.inspect_err(|e| log::error!("Built-in level: {e}"))
		.ok()?;
	ValidLevelData::try_from(level)
		.inspect_err(|e| log::error!("Built-in level: {e}"))
		.ok()
}

/// A socket described by a level file
#[derive(Debug, Clone, PartialEq)]
pub struct PinDef {
	pub id: String,
	pub position: Vec2,
	pub layer: i32,
	/// Nonzero for motor pins
	pub rotation_speed: f32,
	pub is_base: bool,
}

/// A gear described by a level file
#[derive(Debug, Clone, PartialEq)]
pub struct GearDef {
	pub id: String,
	pub settings: GearSettings,
	/// Home position, fixed gears sit on the pin under it
	pub position: Vec2,
	pub layer: i32,
	pub draggable: bool,
	/// Speed goal of a target gear, `0.0` accepts any speed
	pub target_speed: Option<f32>,
	/// Whether the gear carries a pin for another gear
	pub nested_pin: bool,
	pub level_speeds: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelData {
	pub name: Option<String>,
	pub hint: Option<String>,
	/// Number of target gears that have to turn, all of them when unset
	pub targets_to_win: Option<usize>,
	pub pins: Vec<PinDef>,
	pub gears: Vec<GearDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LevelDataValidationError {
	/// The level has nowhere to put a gear
	NoPins,
	RepeatingPinId(String),
	RepeatingGearId(String),
	/// A gear has no teeth
	NoTeeth(usize),
	NonPositiveRadius(usize),
	/// The teeth of a gear do not reach past its body
	TipInsideBody(usize),
	/// Two active pins on the same layer take up the same space
	OverlappingPins(usize, usize),
	/// More target gears are required than the level has
	UnreachableTargetCount { required: usize, available: usize },
}

#[derive(Asset, TypePath, Debug, Clone)]
pub struct ValidLevelData(LevelData);

impl TryFrom<LevelData> for ValidLevelData {
	type Error = LevelDataValidationError;

	fn try_from(value: LevelData) -> Result<Self, Self::Error> {
		if value.pins.is_empty() {
			return Err(LevelDataValidationError::NoPins);
		}
		if let Some(id) = value.pins.iter().map(|pin| &pin.id).duplicates().next() {
			return Err(LevelDataValidationError::RepeatingPinId(id.clone()));
		}
		if let Some(id) = value.gears.iter().map(|gear| &gear.id).duplicates().next() {
			return Err(LevelDataValidationError::RepeatingGearId(id.clone()));
		}

		for (i, gear) in value.gears.iter().enumerate() {
			let settings = gear.settings;
			if settings.teeth == 0 {
				return Err(LevelDataValidationError::NoTeeth(i));
			}
			if settings.gear_radius <= 0.0 || settings.tip_radius <= 0.0 || settings.pin_radius <= 0.0
			{
				return Err(LevelDataValidationError::NonPositiveRadius(i));
			}
			if settings.tip_radius <= settings.gear_radius {
				return Err(LevelDataValidationError::TipInsideBody(i));
			}
		}

		for ((i, a), (j, b)) in value
			.pins
			.iter()
			.enumerate()
			.filter(|(_, pin)| pin.layer < INACTIVE_PIN_LAYER)
			.tuple_combinations()
		{
			if a.layer == b.layer && a.position.distance(b.position) < 2.0 * PIN_COLLIDER_RADIUS {
				return Err(LevelDataValidationError::OverlappingPins(i, j));
			}
		}

		let available = value
			.gears
			.iter()
			.filter(|gear| gear.target_speed.is_some())
			.count();
		if let Some(required) = value.targets_to_win {
			if required > available {
				return Err(LevelDataValidationError::UnreachableTargetCount {
					required,
					available,
				});
			}
		}

		Ok(Self(value))
	}
}

impl std::ops::Deref for ValidLevelData {
	type Target = LevelData;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl std::borrow::Borrow<LevelData> for ValidLevelData {
	fn borrow(&self) -> &LevelData {
		&self.0
	}
}

impl std::fmt::Display for LevelDataValidationError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NoPins => f.write_str("level has no pins"),
			Self::RepeatingPinId(id) => write!(f, "pin {id} is declared more than once"),
			Self::RepeatingGearId(id) => write!(f, "gear {id} is declared more than once"),
			Self::NoTeeth(i) => write!(f, "gear #{i} has no teeth"),
			Self::NonPositiveRadius(i) => write!(f, "gear #{i} has a radius that is not positive"),
			Self::TipInsideBody(i) => {
				write!(f, "teeth of gear #{i} do not reach past its body")
			}
			Self::OverlappingPins(i, j) => write!(f, "pins #{i} and #{j} overlap"),
			Self::UnreachableTargetCount {
				required,
				available,
			} => write!(
				f,
				"{required} target gears are required to win but the level only has {available}"
			),
		}
	}
}

impl std::error::Error for LevelDataValidationError {}

pub(super) fn plugin(app: &mut App) {
	app.add_plugins(asset::plugin);
}
