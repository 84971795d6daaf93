//! Directional gamepad selection of gears and pins

use super::{
	interaction::GamepadSelection, GamepadMode, GearId, GearScene, GearsHost,
	InteractionController, PinId, PinOutline, SfxCue, INACTIVE_PIN_LAYER,
};
use bevy::math::Vec2;

/// Unsigned angle between two vectors, in degrees
fn unsigned_angle(a: Vec2, b: Vec2) -> f32 {
	if a == Vec2::ZERO || b == Vec2::ZERO {
		return 0.0;
	}
	a.angle_to(b).abs().to_degrees()
}

/// Candidate closest to the direction of the stick,
/// angle and distance are summed with degrees and world units weighing equally
fn closest_in_direction<T: Copy>(
	origin: Vec2,
	direction: Vec2,
	candidates: impl Iterator<Item = (T, Vec2)>,
) -> Option<T> {
	candidates
		.map(|(id, position)| {
			let offset = position - origin;
			(id, unsigned_angle(direction, offset) + offset.length())
		})
		.min_by(|(_, a), (_, b)| a.total_cmp(b))
		.map(|(id, _)| id)
}

impl InteractionController {
	/// Switches over to gamepad controls, selecting the last gear and the pin closest to it
	pub fn enable_gamepad<H: GearsHost>(&mut self, scene: &mut GearScene<H>) {
		if self.gamepad.is_some() {
			return;
		}
		let gear = scene.gear_ids().last().copied();
		self.gamepad = Some(GamepadSelection {
			mode: GamepadMode::SelectingPin,
			gear,
			pin: None,
		});
		self.select_closest_pin(scene);
	}

	pub fn selected_gear(&self) -> Option<GearId> {
		self.gamepad.and_then(|selection| selection.gear)
	}

	pub fn selected_pin(&self) -> Option<PinId> {
		self.gamepad
			.filter(|selection| selection.mode == GamepadMode::SelectingPin)
			.and_then(|selection| selection.pin)
	}

	/// Pins a gamepad-selected gear may be sent to
	fn selectable_pins<'a, H: GearsHost>(
		scene: &'a GearScene<H>,
		gear: Option<GearId>,
		current: Option<PinId>,
	) -> impl Iterator<Item = (PinId, Vec2)> + 'a {
		scene
			.pins()
			.filter(move |&(id, pin)| {
				Some(id) != current
					&& pin.nested_gear.is_none()
					&& pin.base_gear != gear
					&& pin.layer < INACTIVE_PIN_LAYER
			})
			.map(|(id, pin)| (id, pin.position))
	}

	fn select_pin<H: GearsHost>(&mut self, scene: &mut GearScene<H>, pin: PinId) {
		let Some(selection) = self.gamepad.as_mut() else {
			return;
		};
		if let Some(previous) = selection.pin.and_then(|p| scene.pin_mut(p)) {
			previous.outline = PinOutline::Hidden;
		}
		selection.pin = Some(pin);
		if let Some(gear) = selection.gear {
			scene.show_pin_outline(pin, gear);
		}
		scene.play_sound(SfxCue::Highlight);
	}

	fn select_closest_pin<H: GearsHost>(&mut self, scene: &mut GearScene<H>) {
		let Some(selection) = self.gamepad else {
			return;
		};
		let Some(origin) = selection.gear.and_then(|g| scene.gear(g)).map(|g| g.position) else {
			return;
		};
		let closest = Self::selectable_pins(scene, selection.gear, None)
			.min_by(|(_, a), (_, b)| a.distance(origin).total_cmp(&b.distance(origin)))
			.map(|(id, _)| id);
		if let Some(pin) = closest {
			self.select_pin(scene, pin);
		}
	}

	fn hide_selected_pin<H: GearsHost>(&mut self, scene: &mut GearScene<H>) {
		if let Some(pin) = self
			.gamepad
			.and_then(|selection| selection.pin)
			.and_then(|p| scene.pin_mut(p))
		{
			pin.outline = PinOutline::Hidden;
		}
	}

	/// Moves the selection towards `direction`
	pub fn gamepad_direction<H: GearsHost>(&mut self, scene: &mut GearScene<H>, direction: Vec2) {
		let Some(selection) = self.gamepad else {
			return;
		};
		if direction == Vec2::ZERO {
			return;
		}
		match selection.mode {
			GamepadMode::SelectingPin => {
				let Some(origin) = selection.pin.and_then(|p| scene.pin(p)).map(|p| p.position)
				else {
					self.select_closest_pin(scene);
					return;
				};
				let candidates = Self::selectable_pins(scene, selection.gear, selection.pin);
				if let Some(pin) = closest_in_direction(origin, direction, candidates) {
					self.select_pin(scene, pin);
				}
			}
			GamepadMode::SelectingGear => {
				let Some(current) = selection.gear.and_then(|g| scene.gear(g)) else {
					return;
				};
				let origin = current.position;
				// The gear carrying the selected one cannot be picked without dropping it
				let carrier = current
					.base_pin
					.and_then(|p| scene.pin(p))
					.and_then(|p| p.base_gear);
				let candidates = scene
					.gears()
					.filter(|&(id, gear)| {
						Some(id) != selection.gear && gear.draggable && Some(id) != carrier
					})
					.map(|(id, gear)| (id, gear.position));
				if let Some(gear) = closest_in_direction(origin, direction, candidates) {
					if let Some(selection) = self.gamepad.as_mut() {
						selection.gear = Some(gear);
					}
					scene.play_sound(SfxCue::Highlight);
				}
			}
		}
	}

	/// Confirms the selection: picks a pin for the selected gear,
	/// or sends the gear to the selected pin if it fits there
	pub fn gamepad_select<H: GearsHost>(&mut self, scene: &mut GearScene<H>) {
		let Some(selection) = self.gamepad else {
			return;
		};
		match selection.mode {
			GamepadMode::SelectingGear => {
				if let Some(selection) = self.gamepad.as_mut() {
					selection.mode = GamepadMode::SelectingPin;
				}
				self.select_closest_pin(scene);
			}
			GamepadMode::SelectingPin => {
				let (Some(gear), Some(pin)) = (selection.gear, selection.pin) else {
					return;
				};
				if !scene.fits(gear, pin) {
					return;
				}
				self.hide_selected_pin(scene);
				if let Some(selection) = self.gamepad.as_mut() {
					selection.mode = GamepadMode::SelectingGear;
				}
				if self.lift(scene, gear) {
					self.apply_gear(scene, gear, Some(pin));
				}
			}
		}
	}

	/// Leaves pin selection
	pub fn gamepad_back<H: GearsHost>(&mut self, scene: &mut GearScene<H>) {
		if !self
			.gamepad
			.is_some_and(|selection| selection.mode == GamepadMode::SelectingPin)
		{
			return;
		}
		self.hide_selected_pin(scene);
		if let Some(selection) = self.gamepad.as_mut() {
			selection.mode = GamepadMode::SelectingGear;
		}
	}

	/// Sends the selected gear back home
	pub fn gamepad_to_inventory<H: GearsHost>(&mut self, scene: &mut GearScene<H>) {
		let Some(selection) = self.gamepad else {
			return;
		};
		self.hide_selected_pin(scene);
		if let Some(selection) = self.gamepad.as_mut() {
			selection.mode = GamepadMode::SelectingGear;
		}
		let Some(gear) = selection.gear else {
			return;
		};
		if !scene.gear(gear).is_some_and(|g| g.draggable) {
			return;
		}
		self.reset_position(scene, gear);
		scene.recalculate_movement();
	}
}
