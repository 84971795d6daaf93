//! Sound effects and the machinery hum

pub mod hum;
pub mod sfx;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
	app.add_plugins((sfx::plugin, hum::plugin));
}
