//! Mouse, gamepad and keyboard controls of the gears

use super::prelude::*;
use crate::{camera::GameCamera, AppSet};

/// Pointer action in world coordinates
///
/// Sent during [`AppSet::RecordInput`]
#[derive(Event, Clone, Copy, PartialEq, Debug)]
pub enum PointerInput {
	Press(Vec2),
	Move(Vec2),
	Release,
}

/// Cursor action of the gamepad controls
///
/// Sent during [`AppSet::RecordInput`]
#[derive(Event, Clone, Copy, PartialEq, Debug)]
pub enum GamepadInput {
	/// Move the selection towards a direction
	Direction(Vec2),
	/// Pick the selected gear, or send it to the selected pin
	Select,
	/// Go back to picking a gear
	Back,
	/// Send the selected gear home
	ToInventory,
}

/// An event sent to start the level being played over
#[derive(Event, Clone, Copy, PartialEq, Eq, Debug)]
pub struct RestartLevel;

pub(super) fn plugin(app: &mut App) {
	app.add_event::<PointerInput>()
		.add_event::<GamepadInput>()
		.add_event::<RestartLevel>()
		.add_systems(
			Update,
			(pointer_inputs, gamepad_inputs, restart_inputs).in_set(AppSet::RecordInput),
		)
		.add_systems(
			Update,
			(apply_pointer_inputs, apply_gamepad_inputs, restart_level).in_set(AppSet::ExecuteInput),
		);
}

/// Stick deflection that counts as a directional input
const STICK_THRESHOLD: f32 = 0.5;

fn pointer_inputs(
	input_mouse: Res<ButtonInput<MouseButton>>,
	window: Single<&Window>,
	camera: Single<(&Camera, &GlobalTransform), With<GameCamera>>,
	mut last_cursor_position: Local<Option<Vec2>>,
	mut events: EventWriter<PointerInput>,
) {
	let (camera, camera_transform) = *camera;
	let cursor_pos = window
		.cursor_position()
		.and_then(|p| camera.viewport_to_world_2d(camera_transform, p).ok());
	if let Some(cursor_pos) = cursor_pos {
		if input_mouse.just_pressed(MouseButton::Left) {
			events.write(PointerInput::Press(cursor_pos));
		} else if *last_cursor_position != Some(cursor_pos) {
			events.write(PointerInput::Move(cursor_pos));
		}
		*last_cursor_position = Some(cursor_pos);
	}
	if input_mouse.just_released(MouseButton::Left) {
		events.write(PointerInput::Release);
	}
}

fn gamepad_inputs(
	gamepads: Query<&Gamepad>,
	input_key: Res<ButtonInput<KeyCode>>,
	mut stick_held: Local<bool>,
	mut events: EventWriter<GamepadInput>,
) {
	let mut direction = direction_from_keys(&input_key);
	let mut stick = Vec2::ZERO;
	let mut select = input_key.any_just_pressed([KeyCode::Space, KeyCode::Enter]);
	let mut back = input_key.just_pressed(KeyCode::Escape);
	let mut to_inventory = input_key.just_pressed(KeyCode::Backspace);
	for gamepad in &gamepads {
		direction += direction_from_dpad(gamepad);
		stick += gamepad.left_stick();
		select |= gamepad.just_pressed(GamepadButton::South);
		back |= gamepad.just_pressed(GamepadButton::East);
		to_inventory |= gamepad.just_pressed(GamepadButton::West);
	}

	// The stick only counts once per deflection
	if stick.length() >= STICK_THRESHOLD {
		if !*stick_held {
			direction += stick;
		}
		*stick_held = true;
	} else {
		*stick_held = false;
	}

	if direction != Vec2::ZERO {
		events.write(GamepadInput::Direction(direction));
	}
	if select {
		events.write(GamepadInput::Select);
	}
	if back {
		events.write(GamepadInput::Back);
	}
	if to_inventory {
		events.write(GamepadInput::ToInventory);
	}
}

fn direction_from_keys(input_key: &ButtonInput<KeyCode>) -> Vec2 {
	let mut direction = Vec2::ZERO;
	if input_key.just_pressed(KeyCode::ArrowUp) {
		direction += Vec2::Y;
	}
	if input_key.just_pressed(KeyCode::ArrowDown) {
		direction -= Vec2::Y;
	}
	if input_key.just_pressed(KeyCode::ArrowLeft) {
		direction -= Vec2::X;
	}
	if input_key.just_pressed(KeyCode::ArrowRight) {
		direction += Vec2::X;
	}
	direction
}

fn direction_from_dpad(gamepad: &Gamepad) -> Vec2 {
	let mut direction = Vec2::ZERO;
	if gamepad.just_pressed(GamepadButton::DPadUp) {
		direction += Vec2::Y;
	}
	if gamepad.just_pressed(GamepadButton::DPadDown) {
		direction -= Vec2::Y;
	}
	if gamepad.just_pressed(GamepadButton::DPadLeft) {
		direction -= Vec2::X;
	}
	if gamepad.just_pressed(GamepadButton::DPadRight) {
		direction += Vec2::X;
	}
	direction
}

fn restart_inputs(input_key: Res<ButtonInput<KeyCode>>, mut events: EventWriter<RestartLevel>) {
	if input_key.just_pressed(KeyCode::KeyR) {
		events.write(RestartLevel);
	}
}

fn apply_pointer_inputs(mut events: EventReader<PointerInput>, mut session: ResMut<GearSession>) {
	if events.is_empty() {
		return;
	}
	let GearSession { scene, controller } = &mut *session;
	for event in events.read() {
		match *event {
			PointerInput::Press(position) => {
				if let Some(gear) = scene.gear_at(position) {
					controller.pointer_down(scene, gear, position);
				}
			}
			PointerInput::Move(position) => controller.pointer_move(scene, position),
			PointerInput::Release => controller.pointer_up(scene),
		}
	}
}

fn apply_gamepad_inputs(mut events: EventReader<GamepadInput>, mut session: ResMut<GearSession>) {
	if events.is_empty() {
		return;
	}
	let GearSession { scene, controller } = &mut *session;
	for event in events.read() {
		controller.enable_gamepad(scene);
		match *event {
			GamepadInput::Direction(direction) => controller.gamepad_direction(scene, direction),
			GamepadInput::Select => controller.gamepad_select(scene),
			GamepadInput::Back => controller.gamepad_back(scene),
			GamepadInput::ToInventory => controller.gamepad_to_inventory(scene),
		}
	}
}

fn restart_level(
	mut commands: Commands,
	mut events: EventReader<RestartLevel>,
	current_level: Res<CurrentLevel>,
) {
	if events.read().count() > 0 {
		commands.trigger(EnterLevel(current_level.0.clone()));
	}
}
