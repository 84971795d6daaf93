mod utils {
	use crate::{
		game::{gears::GearId, prelude::*},
		graphics::GearPalette,
	};
	use bevy::prelude::*;

	pub fn setup_app() -> App {
		let mut app = App::new();
		app.add_plugins((
			MinimalPlugins,
			AssetPlugin {
				watch_for_changes_override: Some(false),
				..default()
			},
		))
		// Stand-ins for the rendering plugins
		.init_asset::<Mesh>()
		.init_asset::<ColorMaterial>()
		.init_resource::<GearPalette>()
		.add_plugins((
			super::super::level::plugin,
			super::super::resources::plugin,
			super::super::logic::plugin,
			super::super::spawn::plugin,
		));
		app
	}

	pub trait GearsAppExt {
		fn enter_level(&mut self, level: Option<crate::game::level::ValidLevelData>);
		fn count<C: Component>(&mut self) -> usize;
		fn gear(&self, index: usize) -> GearId;
	}

	impl GearsAppExt for App {
		fn enter_level(&mut self, level: Option<crate::game::level::ValidLevelData>) {
			self.world_mut().trigger(EnterLevel(level));
			self.update();
		}

		fn count<C: Component>(&mut self) -> usize {
			self.world_mut()
				.query_filtered::<(), With<C>>()
				.iter(self.world())
				.count()
		}

		fn gear(&self, index: usize) -> GearId {
			self.world()
				.resource::<GearSession>()
				.scene
				.gears()
				.nth(index)
				.map(|(id, _)| id)
				.expect("Gear should exist")
		}
	}
}

use super::{level::builtin_level, prelude::*};
use utils::*;

#[test]
fn level_entities_follow_the_scene() {
	let mut app = setup_app();
	app.enter_level(builtin_level());
	assert_eq!(app.count::<GearSprite>(), 5);
	// The nested gear carries a fifth pin
	assert_eq!(app.count::<PinSprite>(), 5);
	assert_eq!(app.count::<PinOutlineSprite>(), 5);
	assert_eq!(app.count::<LevelHud>(), 1);
	// The lamp gear has two intermediate speeds
	assert_eq!(app.count::<SignalLight>(), 2);
	assert!(app.world().resource::<CurrentLevel>().0.is_some());

	app.enter_level(builtin_level());
	assert_eq!(app.count::<GearSprite>(), 5);
	assert_eq!(app.count::<LevelHud>(), 1);

	app.enter_level(None);
	assert_eq!(app.count::<GearSprite>(), 0);
	assert_eq!(app.count::<SignalLight>(), 0);
	assert_eq!(app.count::<PinSprite>(), 0);
	assert_eq!(app.world().resource::<GearSession>().scene.gears().count(), 0);
}

#[test]
fn solving_the_level_is_announced() {
	let mut app = setup_app();
	app.enter_level(builtin_level());
	let (idler, stack) = (app.gear(2), app.gear(4));

	let mut session = app.world_mut().resource_mut::<GearSession>();
	let GearSession { scene, controller } = &mut *session;
	let (near, far) = {
		let mut pins = scene.pins().map(|(id, _)| id);
		(pins.nth(1), pins.next())
	};
	controller.apply_gear(scene, idler, near);
	controller.tick(scene, 10.0);
	controller.apply_gear(scene, stack, far);
	controller.tick(scene, 10.0);
	assert!(scene.is_solved());

	app.update();
	assert_eq!(app.world().resource::<Events<LevelSolved>>().len(), 1);
	assert!(**app.world().resource::<HumLevel>() > 0);
	assert_eq!(**app.world().resource::<SignalLevel>(), 2);
	assert!(app
		.world()
		.resource::<GearSession>()
		.scene
		.host()
		.0
		.is_empty());
}

#[test]
fn signals_go_dark_on_restart() {
	let mut app = setup_app();
	app.enter_level(builtin_level());
	app.world_mut().resource_mut::<SignalLevel>().0 = 2;
	app.enter_level(builtin_level());
	assert_eq!(**app.world().resource::<SignalLevel>(), 0);
}
