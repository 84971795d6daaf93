//! Looping machinery hum that grows louder the more gears turn

use crate::{
	assets::{AmbienceKey, HandleMap},
	game::resources::HumLevel,
	settings::Settings,
};
use bevy::{
	audio::{PlaybackMode, Volume},
	prelude::*,
};

pub(super) fn plugin(app: &mut App) {
	app.add_systems(Startup, spawn_hum).add_systems(
		Update,
		update_hum_volume.run_if(resource_changed::<HumLevel>.or(resource_changed::<Settings>)),
	);
}

const MAX_VOLUME: f32 = 4.0;
/// Hum level at which the hum plays at full volume
const LOUDEST_HUM_LEVEL: u8 = 3;

/// Marker component for the hum entity so we can find it later.
#[derive(Component, Reflect)]
#[reflect(Component)]
struct IsHum;

fn hum_volume(level: HumLevel, settings: &Settings) -> Volume {
	let intensity = f32::from(level.0.min(LOUDEST_HUM_LEVEL)) / f32::from(LOUDEST_HUM_LEVEL);
	Volume::Linear(intensity * settings.hum_volume * MAX_VOLUME)
}

fn spawn_hum(
	mut commands: Commands,
	ambience_handles: Res<HandleMap<AmbienceKey>>,
	level: Res<HumLevel>,
	settings: Res<Settings>,
) {
	let Some(handle) = ambience_handles.get(&AmbienceKey::Hum) else {
		log::warn!("No hum sound loaded");
		return;
	};
	commands.spawn((
		Name::new("Hum"),
		AudioPlayer(handle.clone()),
		PlaybackSettings {
			mode: PlaybackMode::Loop,
			volume: hum_volume(*level, &settings),
			..default()
		},
		IsHum,
	));
}

fn update_hum_volume(
	mut query: Query<&mut AudioSink, With<IsHum>>,
	level: Res<HumLevel>,
	settings: Res<Settings>,
) {
	for mut hum in &mut query {
		hum.set_volume(hum_volume(*level, &settings));
	}
}
