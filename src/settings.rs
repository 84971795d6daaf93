//! Settings that can be adjusted by the player

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
	app.register_type::<Settings>().init_resource::<Settings>();
}

/// Settings that can be adjusted by the player
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct Settings {
	/// Volume of sound effects, as a fraction of maximum volume
	pub sfx_volume: f32,
	/// Volume of the machinery hum at full intensity, as a fraction of maximum volume
	pub hum_volume: f32,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			sfx_volume: 0.5,
			hum_volume: 0.25,
		}
	}
}
