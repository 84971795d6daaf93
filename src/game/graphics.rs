//! Keeps the level entities in line with the gears scene

use super::{
	gears::{Gear, Pin, PinOutline},
	prelude::*,
};
use crate::{
	graphics::{sorting_depth, GearPalette},
	AppSet,
};

pub(super) fn plugin(app: &mut App) {
	app.add_systems(
		Update,
		(
			sync_gears,
			sync_pins,
			sync_pin_outlines,
			sync_signal_lights,
			show_level_solved.run_if(on_event::<LevelSolved>),
		)
			.in_set(AppSet::UpdateVisuals),
	);
}

pub(super) fn gear_colour(gear: &Gear, selected: bool, palette: &GearPalette) -> Color {
	if selected {
		palette.selected_gear
	} else if gear.target {
		if gear.is_moving() {
			palette.target_turning
		} else {
			palette.target_idle
		}
	} else if gear.draggable {
		palette.gear
	} else {
		palette.fixed_gear
	}
}

pub(super) fn pin_colour(pin: &Pin, palette: &GearPalette) -> Color {
	if pin.is_motor() {
		palette.motor_pin
	} else if pin.is_base {
		palette.pin
	} else {
		palette.nested_pin
	}
}

/// Changes the colour of a material, leaving it untouched when it already matches
fn set_colour(materials: &mut Assets<ColorMaterial>, handle: &Handle<ColorMaterial>, colour: Color) {
	if materials.get(handle).is_some_and(|m| m.color != colour) {
		if let Some(material) = materials.get_mut(handle) {
			material.color = colour;
		}
	}
}

fn sync_gears(
	session: Res<GearSession>,
	mut gears: Query<(&GearSprite, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
	mut materials: ResMut<Assets<ColorMaterial>>,
	palette: Res<GearPalette>,
) {
	let selected = session.controller.selected_gear();
	for (&GearSprite(id), mut transform, material) in &mut gears {
		let Some(gear) = session.scene.gear(id) else {
			continue;
		};
		transform.translation = gear.position.extend(sorting_depth(gear.sorting_order()));
		transform.rotation = Quat::from_rotation_z(gear.angle.to_radians());
		set_colour(
			&mut materials,
			&material.0,
			gear_colour(gear, selected == Some(id), &palette),
		);
	}
}

fn sync_pins(session: Res<GearSession>, mut pins: Query<(&PinSprite, &mut Transform)>) {
	for (&PinSprite(id), mut transform) in &mut pins {
		let Some(pin) = session.scene.pin(id) else {
			continue;
		};
		transform.translation = pin.position.extend(sorting_depth(pin.sorting_order()));
		transform.rotation = Quat::from_rotation_z(pin.angle.to_radians());
	}
}

fn sync_pin_outlines(
	session: Res<GearSession>,
	mut outlines: Query<(
		&PinOutlineSprite,
		&mut Visibility,
		&MeshMaterial2d<ColorMaterial>,
	)>,
	mut materials: ResMut<Assets<ColorMaterial>>,
	palette: Res<GearPalette>,
) {
	for (&PinOutlineSprite(id), mut visibility, material) in &mut outlines {
		let outline = session
			.scene
			.pin(id)
			.map_or(PinOutline::Hidden, |pin| pin.outline);
		let colour = match outline {
			PinOutline::Hidden => {
				visibility.set_if_neq(Visibility::Hidden);
				continue;
			}
			PinOutline::Allowed => palette.outline_allowed,
			PinOutline::Denied => palette.outline_denied,
		};
		visibility.set_if_neq(Visibility::Inherited);
		set_colour(&mut materials, &material.0, colour);
	}
}

fn sync_signal_lights(
	signals: Res<SignalLevel>,
	mut lights: Query<(&SignalLight, &mut BackgroundColor)>,
	palette: Res<GearPalette>,
) {
	for (&SignalLight(index), mut background) in &mut lights {
		let colour = if index < **signals {
			palette.signal_lit
		} else {
			palette.signal_off
		};
		background.set_if_neq(BackgroundColor(colour));
	}
}

fn show_level_solved(
	session: Res<GearSession>,
	mut hud: Query<(&mut Text, &mut TextColor), With<LevelHud>>,
	palette: Res<GearPalette>,
) {
	let name = session.scene.name.as_deref().unwrap_or("Level");
	for (mut text, mut colour) in &mut hud {
		text.0 = format!("{name} solved!\nPress R to play again.");
		colour.0 = palette.hud_solved;
	}
}
