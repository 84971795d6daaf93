use super::{
	gears::{GearScene, HostQueue, InteractionController},
	level::ValidLevelData,
};
use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
	app.init_resource::<GearSession>()
		.init_resource::<HumLevel>()
		.init_resource::<SignalLevel>()
		.init_resource::<CurrentLevel>();
}

/// The gears being played with and the interaction driving them
#[derive(Resource, Debug)]
pub struct GearSession {
	pub scene: GearScene<HostQueue>,
	pub controller: InteractionController,
}

impl Default for GearSession {
	fn default() -> Self {
		Self {
			scene: GearScene::new(HostQueue::default()),
			controller: InteractionController::new(),
		}
	}
}

/// Intensity of the machinery hum, `0..=3`
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Deref)]
pub struct HumLevel(pub u8);

/// Number of signal lights lit by gears reaching their intermediate speeds
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Deref)]
pub struct SignalLevel(pub usize);

/// Level data of the level being played, kept around for restarts
#[derive(Resource, Debug, Clone, Default)]
pub struct CurrentLevel(pub Option<ValidLevelData>);
