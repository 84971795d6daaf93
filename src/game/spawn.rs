//! Spawns the entities that show the level being played

use std::f32::consts::TAU;

use super::{
	gears::{Gear, GearId, GearScene, HostQueue, Pin, PinId, PIN_COLLIDER_RADIUS},
	graphics::{gear_colour, pin_colour},
	prelude::*,
};
use crate::graphics::{layers, sorting_depth, GearPalette, PIN_OUTLINE_WIDTH, TOOTH_FILL};

pub(super) fn plugin(app: &mut App) {
	app.add_observer(spawn_level);
}

/// Trigger event that replaces the level entities with ones showing the current [`GearSession`]
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SpawnLevel;

/// Teeth overlap the gear body by this much so no seam shows
const TOOTH_OVERLAP: f32 = 0.1;

fn spawn_level(
	_trigger: Trigger<SpawnLevel>,
	mut commands: Commands,
	level_entities: Query<Entity, With<LevelEntity>>,
	session: Res<GearSession>,
	mut meshes: ResMut<Assets<Mesh>>,
	mut materials: ResMut<Assets<ColorMaterial>>,
	palette: Res<GearPalette>,
) {
	for entity in &level_entities {
		commands.entity(entity).despawn();
	}

	for (id, pin) in session.scene.pins() {
		spawn_pin(
			commands.reborrow(),
			id,
			pin,
			&mut meshes,
			&mut materials,
			&palette,
		);
	}
	for (id, gear) in session.scene.gears() {
		spawn_gear(
			commands.reborrow(),
			id,
			gear,
			&mut meshes,
			&mut materials,
			&palette,
		);
	}
	spawn_hud(commands.reborrow(), &session.scene, &palette);
	spawn_signal_lights(commands, &session.scene, &palette);
}

fn spawn_pin(
	mut commands: Commands,
	id: PinId,
	pin: &Pin,
	meshes: &mut Assets<Mesh>,
	materials: &mut Assets<ColorMaterial>,
	palette: &GearPalette,
) {
	let outline_radius = PIN_COLLIDER_RADIUS * 1.5;
	commands
		.spawn((
			Name::new(format!("Pin {}", id.index())),
			LevelEntity,
			PinSprite(id),
			Mesh2d(meshes.add(Circle::new(PIN_COLLIDER_RADIUS))),
			MeshMaterial2d(materials.add(pin_colour(pin, palette))),
			Transform::from_translation(pin.position.extend(sorting_depth(pin.sorting_order()))),
		))
		.with_children(|children| {
			children.spawn((
				Name::new("Pin outline"),
				PinOutlineSprite(id),
				Mesh2d(meshes.add(Annulus::new(
					outline_radius,
					outline_radius + PIN_OUTLINE_WIDTH,
				))),
				MeshMaterial2d(materials.add(palette.outline_allowed)),
				Transform::from_xyz(0.0, 0.0, layers::PIN_OUTLINE),
				Visibility::Hidden,
			));
		});
}

fn spawn_gear(
	mut commands: Commands,
	id: GearId,
	gear: &Gear,
	meshes: &mut Assets<Mesh>,
	materials: &mut Assets<ColorMaterial>,
	palette: &GearPalette,
) {
	let settings = gear.settings;
	let material = materials.add(gear_colour(gear, false, palette));
	let tooth_length = settings.tip_radius - settings.gear_radius + TOOTH_OVERLAP;
	let tooth_width = TAU * settings.gear_radius / settings.teeth as f32 * TOOTH_FILL;
	let tooth_distance = settings.tip_radius - tooth_length / 2.0;
	let tooth_mesh = meshes.add(Rectangle::new(tooth_length, tooth_width));

	commands
		.spawn((
			Name::new(format!("Gear {}", id.index())),
			LevelEntity,
			GearSprite(id),
			Mesh2d(meshes.add(Circle::new(settings.gear_radius))),
			MeshMaterial2d(material.clone()),
			Transform::from_translation(gear.position.extend(sorting_depth(gear.sorting_order())))
				.with_rotation(Quat::from_rotation_z(gear.angle.to_radians())),
		))
		.with_children(|children| {
			for tooth in 0..settings.teeth {
				let angle = settings.tooth_angle().to_radians() * tooth as f32;
				children.spawn((
					Mesh2d(tooth_mesh.clone()),
					MeshMaterial2d(material.clone()),
					Transform::from_translation(
						(Vec2::from_angle(angle) * tooth_distance).extend(layers::TEETH),
					)
					.with_rotation(Quat::from_rotation_z(angle)),
				));
			}
		});
}

fn spawn_hud(mut commands: Commands, scene: &GearScene<HostQueue>, palette: &GearPalette) {
	let text = [scene.name.as_deref(), scene.hint.as_deref()]
		.into_iter()
		.flatten()
		.collect::<Vec<_>>()
		.join("\n");
	commands.spawn((
		Name::new("Level HUD"),
		LevelEntity,
		LevelHud,
		Text::new(text),
		TextFont {
			font_size: 20.0,
			..default()
		},
		TextColor(palette.hud_text),
		Node {
			position_type: PositionType::Absolute,
			top: Val::Px(12.0),
			left: Val::Px(12.0),
			..default()
		},
	));
}

/// Row of lights in the corner, one per intermediate speed of the gear with the most of them
fn spawn_signal_lights(mut commands: Commands, scene: &GearScene<HostQueue>, palette: &GearPalette) {
	let count = scene
		.gears()
		.map(|(_, gear)| gear.level_speeds.len())
		.max()
		.unwrap_or(0);
	if count == 0 {
		return;
	}
	commands
		.spawn((
			Name::new("Signal lights"),
			LevelEntity,
			Node {
				position_type: PositionType::Absolute,
				top: Val::Px(12.0),
				right: Val::Px(12.0),
				column_gap: Val::Px(8.0),
				..default()
			},
		))
		.with_children(|children| {
			for index in 0..count {
				children.spawn((
					Name::new(format!("Signal light {index}")),
					SignalLight(index),
					Node {
						width: Val::Px(18.0),
						height: Val::Px(18.0),
						..default()
					},
					BorderRadius::all(Val::Px(9.0)),
					BackgroundColor(palette.signal_off),
				));
			}
		});
}
