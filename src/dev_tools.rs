//! Development tools for the game. This plugin is only enabled in dev builds.

use crate::game::{gears::InteractionState, prelude::*};
use bevy::color::palettes;

pub(super) fn plugin(app: &mut App) {
	app.add_systems(Update, (draw_mesh_graph, log_interaction_changes));
}

/// Draws a line between every pair of meshed gears and marks the ones driven by a motor
fn draw_mesh_graph(session: Res<GearSession>, mut gizmos: Gizmos) {
	let scene = &session.scene;
	for (id, gear) in scene.gears() {
		for &neighbor in scene.graph().neighbors(id) {
			// Every edge is stored on both ends
			if neighbor.index() < id.index() {
				continue;
			}
			if let Some(other) = scene.gear(neighbor) {
				gizmos.line_2d(gear.position, other.position, palettes::tailwind::SKY_300);
			}
		}
		if gear.drive_gear() == Some(id) {
			gizmos.circle_2d(
				Isometry2d::from_translation(gear.position),
				gear.settings.pin_radius,
				palettes::tailwind::ROSE_400,
			);
		}
	}
}

fn log_interaction_changes(session: Res<GearSession>, mut last_state: Local<Option<InteractionState>>) {
	let state = session.controller.state();
	if *last_state != Some(state) {
		log::debug!("Interaction: {state:?}");
		*last_state = Some(state);
	}
}
