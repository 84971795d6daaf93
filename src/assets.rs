use std::collections::HashMap;

use bevy::prelude::*;

use crate::game::gears::SfxCue;

pub(super) fn plugin(app: &mut App) {
	app.init_resource::<HandleMap<SfxKey>>();
	app.init_resource::<HandleMap<AmbienceKey>>();
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Reflect)]
pub enum SfxKey {
	Pickup,
	Drop,
	Slide,
	Install,
	Highlight,
	Victory,
	LevelStart,
}

impl SfxKey {
	pub fn volume_multiplier(self) -> f32 {
		match self {
			// Plays on every cursor step
			Self::Highlight => 0.3,
			Self::Slide => 0.6,
			Self::Victory => 2.0,
			_ => 1.0,
		}
	}
}

impl From<SfxCue> for SfxKey {
	fn from(cue: SfxCue) -> Self {
		match cue {
			SfxCue::Pickup => Self::Pickup,
			SfxCue::Drop => Self::Drop,
			SfxCue::Slide => Self::Slide,
			SfxCue::Install => Self::Install,
			SfxCue::Highlight => Self::Highlight,
			SfxCue::Victory => Self::Victory,
			SfxCue::LevelStart => Self::LevelStart,
		}
	}
}

impl AssetKey for SfxKey {
	type Asset = AudioSource;
}

impl FromWorld for HandleMap<SfxKey> {
	fn from_world(world: &mut World) -> Self {
		let asset_server = world.resource::<AssetServer>();
		[
			(SfxKey::Pickup, asset_server.load("audio/sfx/pickup.ogg")),
			(SfxKey::Drop, asset_server.load("audio/sfx/drop.ogg")),
			(SfxKey::Slide, asset_server.load("audio/sfx/slide.ogg")),
			(SfxKey::Install, asset_server.load("audio/sfx/install.ogg")),
			(
				SfxKey::Highlight,
				asset_server.load("audio/sfx/highlight.ogg"),
			),
			(SfxKey::Victory, asset_server.load("audio/sfx/victory.ogg")),
			(
				SfxKey::LevelStart,
				asset_server.load("audio/sfx/level_start.ogg"),
			),
		]
		.into()
	}
}

/// Looping background sounds
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Reflect)]
pub enum AmbienceKey {
	Hum,
}

impl AssetKey for AmbienceKey {
	type Asset = AudioSource;
}

impl FromWorld for HandleMap<AmbienceKey> {
	fn from_world(world: &mut World) -> Self {
		let asset_server = world.resource::<AssetServer>();
		[(AmbienceKey::Hum, asset_server.load("audio/ambience/hum.ogg"))].into()
	}
}

pub trait AssetKey: Sized {
	type Asset: Asset;
}

#[derive(Resource, Deref, DerefMut)]
pub struct HandleMap<K: AssetKey>(HashMap<K, Handle<K::Asset>>);

impl<K: AssetKey, T> From<T> for HandleMap<K>
where
	T: Into<HashMap<K, Handle<K::Asset>>>,
{
	fn from(value: T) -> Self {
		Self(value.into())
	}
}
