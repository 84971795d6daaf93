//! Drives the gears simulation from the ECS and relays what it reports

use super::{
	gears::{GearScene, HostEvent, HostQueue, InteractionController},
	prelude::*,
	spawn::SpawnLevel,
};
use crate::{audio::sfx::PlaySfx, AppSet};

pub(super) fn plugin(app: &mut App) {
	app.add_event::<LevelSolved>()
		.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
		.add_observer(enter_level)
		.add_systems(FixedUpdate, rotate_gears)
		.add_systems(
			Update,
			(move_gears, relay_host_events)
				.chain()
				.in_set(AppSet::GameLogic),
		);
}

/// Rotation steps per second, gear speeds are given in degrees per step
pub const SIMULATION_HZ: f64 = 50.0;

fn enter_level(
	trigger: Trigger<EnterLevel>,
	mut commands: Commands,
	mut session: ResMut<GearSession>,
	mut current_level: ResMut<CurrentLevel>,
	mut hum: ResMut<HumLevel>,
	mut signals: ResMut<SignalLevel>,
) {
	let EnterLevel(level) = trigger.event();
	let session = &mut *session;
	session.scene.teardown();
	session.controller = InteractionController::new();
	hum.set_if_neq(HumLevel(0));
	signals.set_if_neq(SignalLevel(0));
	current_level.0 = level.clone();

	if let Ok(mut scene) = GearScene::load_level(level.as_ref(), HostQueue::default()) {
		session.controller.start_level(&mut scene);
		session.scene = scene;
	}
	commands.trigger(SpawnLevel);
}

fn rotate_gears(mut session: ResMut<GearSession>) {
	session.scene.tick();
}

fn move_gears(time: Res<Time>, mut session: ResMut<GearSession>) {
	if session.controller.tasks().is_empty() {
		return;
	}
	let GearSession { scene, controller } = &mut *session;
	controller.tick(scene, time.delta_secs());
}

fn relay_host_events(
	mut commands: Commands,
	mut session: ResMut<GearSession>,
	mut solved_events: EventWriter<LevelSolved>,
	mut hum: ResMut<HumLevel>,
	mut signals: ResMut<SignalLevel>,
) {
	if session.scene.host().0.is_empty() {
		return;
	}
	for event in session.scene.host_mut().drain() {
		match event {
			HostEvent::Sound(cue) => commands.trigger(PlaySfx::Effect(cue.into())),
			HostEvent::LevelSolved => {
				solved_events.write(LevelSolved);
			}
			HostEvent::HumLevel(level) => {
				hum.set_if_neq(HumLevel(level));
			}
			HostEvent::GearReachedLevel(gear, level) => {
				log::info!("Gear #{} reached speed level {level}", gear.index());
				signals.set_if_neq(SignalLevel(level + 1));
			}
		}
	}
}
