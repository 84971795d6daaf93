//! Game mechanics and content.

pub mod components;
pub mod events;
pub mod gears;
pub mod graphics;
pub mod inputs;
pub mod level;
pub mod logic;
pub mod resources;
pub mod spawn;
#[cfg(test)]
mod test;

pub mod prelude {
	pub use super::components::*;
	pub use super::events::*;
	pub use super::resources::*;
	pub use bevy::prelude::*;
}

use bevy::{asset::LoadState, prelude::*};
use events::EnterLevel;
use level::{builtin_level, ValidLevelData};

/// Level played on startup, the built-in level stands in when it cannot be loaded
const START_LEVEL_PATH: &str = "levels/first_steps.gears.txt";

pub(super) fn plugin(app: &mut App) {
	app.add_plugins((
		level::plugin,
		resources::plugin,
		logic::plugin,
		inputs::plugin,
		spawn::plugin,
		graphics::plugin,
	));
	app.add_systems(Startup, load_level).add_systems(
		Update,
		enter_loaded_level.run_if(resource_exists::<LevelHandle>),
	);
}

/// Handle to the level file played on startup
#[derive(Resource, Debug)]
struct LevelHandle(Handle<ValidLevelData>);

fn load_level(mut commands: Commands, asset_server: Res<AssetServer>) {
	commands.insert_resource(LevelHandle(asset_server.load(START_LEVEL_PATH)));
}

/// Enters the startup level once it loads, and again whenever the file changes
fn enter_loaded_level(
	mut commands: Commands,
	mut asset_events: EventReader<AssetEvent<ValidLevelData>>,
	handle: Res<LevelHandle>,
	levels: Res<Assets<ValidLevelData>>,
	asset_server: Res<AssetServer>,
) {
	if let LoadState::Failed(e) = asset_server.load_state(handle.0.id()) {
		log::warn!("Playing the built-in level instead of {START_LEVEL_PATH}: {e}");
		commands.remove_resource::<LevelHandle>();
		commands.trigger(EnterLevel(builtin_level()));
		return;
	}
	for event in asset_events.read() {
		match event {
			AssetEvent::LoadedWithDependencies { id } | AssetEvent::Modified { id }
				if *id == handle.0.id() =>
			{
				commands.trigger(EnterLevel(levels.get(*id).cloned()));
			}
			_ => {}
		}
	}
}
