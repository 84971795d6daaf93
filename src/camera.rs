//! Main rendering camera, framing the level on the screen

use crate::{
	game::{prelude::*, spawn::SpawnLevel},
	graphics::{DEFAULT_VIEW_SIZE, VIEW_MARGIN},
};
use bevy::{
	math::bounding::{Aabb2d, BoundingVolume as _},
	render::camera::ScalingMode,
};

pub(super) fn plugin(app: &mut App) {
	app.add_systems(Startup, spawn_camera)
		.add_observer(frame_level);
}

/// Marker for the camera that looks at the gears
#[derive(Component, Clone, Copy, Debug, Default)]
#[require(Camera2d)]
pub struct GameCamera;

fn spawn_camera(mut commands: Commands) {
	commands.spawn((
		Name::new("Camera"),
		GameCamera,
		Projection::Orthographic(OrthographicProjection {
			scaling_mode: ScalingMode::AutoMin {
				min_width: DEFAULT_VIEW_SIZE.x,
				min_height: DEFAULT_VIEW_SIZE.y,
			},
			..OrthographicProjection::default_2d()
		}),
		// Render all UI to this camera.
		IsDefaultUiCamera,
	));
}

/// Area taken up by everything in the level, including gears waiting at home
fn level_bounds(session: &GearSession) -> Option<Aabb2d> {
	let gears = session.scene.gears().map(|(_, gear)| {
		Aabb2d::new(gear.home_position, Vec2::splat(gear.settings.tip_radius))
	});
	let pins = session
		.scene
		.pins()
		.map(|(_, pin)| Aabb2d::new(pin.position, Vec2::ZERO));
	gears.chain(pins).reduce(|a, b| a.merge(&b))
}

fn frame_level(
	_trigger: Trigger<SpawnLevel>,
	session: Res<GearSession>,
	camera: Single<(&mut Transform, &mut Projection), With<GameCamera>>,
) {
	let Some(bounds) = level_bounds(&session) else {
		return;
	};
	let (mut transform, mut projection) = camera.into_inner();
	let center = bounds.center();
	transform.translation.x = center.x;
	transform.translation.y = center.y;
	if let Projection::Orthographic(orthographic) = projection.as_mut() {
		let size = bounds.half_size() * 2.0 + Vec2::splat(VIEW_MARGIN * 2.0);
		orthographic.scaling_mode = ScalingMode::AutoMin {
			min_width: size.x,
			min_height: size.y,
		};
	}
}
