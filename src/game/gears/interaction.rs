//! Picking up, dragging and placing gears

use super::{GearId, GearScene, GearsHost, PinId, SfxCue, DRAG_LAYER};
use bevy::math::Vec2;

/// Speed of gears sliding to a pin or back home, in world units per second
pub const MOVE_SPEED: f32 = 30.0;

/// Where a [`MotionTask`] takes its gear
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MotionKind {
	/// Slide onto a pin and try to mount there
	Place(PinId),
	/// Slide back to the home position
	Return,
}

/// A gear sliding between two points.
///
/// The task is only honoured if its token still matches the token of the gear,
/// any new interaction with the gear invalidates it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MotionTask {
	pub gear: GearId,
	pub kind: MotionKind,
	token: u64,
	from: Vec2,
	to: Vec2,
	elapsed: f32,
	duration: f32,
}

impl MotionTask {
	fn progress(&self) -> f32 {
		if self.duration <= 0.0 {
			1.0
		} else {
			(self.elapsed / self.duration).min(1.0)
		}
	}

	fn sample(&self) -> Vec2 {
		self.from.lerp(self.to, self.progress())
	}

	fn is_finished(&self) -> bool {
		self.progress() >= 1.0
	}
}

/// What the player is currently doing with the gears
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InteractionState {
	Idle,
	/// A gear follows the pointer
	Dragging { gear: GearId },
	/// A gear slides onto a pin
	Placing { gear: GearId, pin: PinId },
	/// The gamepad cursor picks a gear to move
	GamepadSelectingGear { gear: Option<GearId> },
	/// The gamepad cursor picks a pin for the selected gear
	GamepadSelectingPin { gear: Option<GearId>, pin: Option<PinId> },
}

/// Which kind of target the gamepad cursor moves between
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GamepadMode {
	#[default]
	SelectingGear,
	SelectingPin,
}

#[derive(Clone, Copy, PartialEq, Debug)]
struct Drag {
	gear: GearId,
	offset: Vec2,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub(super) struct GamepadSelection {
	pub mode: GamepadMode,
	pub gear: Option<GearId>,
	pub pin: Option<PinId>,
}

/// State machine driving gears around a [`GearScene`]
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	drag: Option<Drag>,
	tasks: Vec<MotionTask>,
	tokens: Vec<u64>,
	pub(super) gamepad: Option<GamepadSelection>,
}

impl InteractionController {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn state(&self) -> InteractionState {
		if let Some(drag) = self.drag {
			return InteractionState::Dragging { gear: drag.gear };
		}
		if let Some(task) = self.tasks.iter().find(|t| matches!(t.kind, MotionKind::Place(_))) {
			if let MotionKind::Place(pin) = task.kind {
				return InteractionState::Placing {
					gear: task.gear,
					pin,
				};
			}
		}
		match self.gamepad {
			Some(GamepadSelection {
				mode: GamepadMode::SelectingGear,
				gear,
				..
			}) => InteractionState::GamepadSelectingGear { gear },
			Some(GamepadSelection {
				mode: GamepadMode::SelectingPin,
				gear,
				pin,
			}) => InteractionState::GamepadSelectingPin { gear, pin },
			None => InteractionState::Idle,
		}
	}

	/// Slides that are still in flight
	pub fn tasks(&self) -> &[MotionTask] {
		&self.tasks
	}

	/// Mounts the gears that cannot be moved by the player
	/// and sets the initial state of the machinery
	pub fn start_level<H: GearsHost>(&mut self, scene: &mut GearScene<H>) {
		self.drag = None;
		self.tasks.clear();
		self.tokens.clear();
		self.gamepad = None;

		scene.play_sound(SfxCue::LevelStart);
		for gear in scene.gear_ids() {
			if scene.gear(gear).is_some_and(|g| g.draggable) {
				continue;
			}
			match scene.pin_under(gear) {
				Some(pin) if scene.fits(gear, pin) => self.commit(scene, gear, pin),
				_ => {
					log::warn!("Fixed gear {gear:?} does not sit on a pin it fits");
					self.reset_position(scene, gear);
				}
			}
		}
		scene.recalculate_movement();
	}

	/// Invalidates every slide of `gear`
	fn cancel_motion(&mut self, gear: GearId) {
		self.tasks.retain(|task| task.gear != gear);
		if self.tokens.len() <= gear.0 {
			self.tokens.resize(gear.0 + 1, 0);
		}
		self.tokens[gear.0] += 1;
	}

	fn token(&self, gear: GearId) -> u64 {
		self.tokens.get(gear.0).copied().unwrap_or(0)
	}

	fn start_motion<H: GearsHost>(
		&mut self,
		scene: &GearScene<H>,
		gear: GearId,
		to: Vec2,
		kind: MotionKind,
	) {
		self.cancel_motion(gear);
		let Some(from) = scene.gear(gear).map(|g| g.position) else {
			return;
		};
		self.tasks.push(MotionTask {
			gear,
			kind,
			token: self.token(gear),
			from,
			to,
			elapsed: 0.0,
			duration: from.distance(to) / MOVE_SPEED,
		});
	}

	/// Lifts a gear off whatever it sits on, stopping everything it drove
	pub(super) fn lift<H: GearsHost>(&mut self, scene: &mut GearScene<H>, gear: GearId) -> bool {
		if !scene.gear(gear).is_some_and(|g| g.draggable) {
			return false;
		}
		self.cancel_motion(gear);
		if let Some(evicted) = scene.clear_connection(gear) {
			self.reset_position(scene, evicted);
		}
		self.send_riders_home(scene, gear);
		scene.recalculate_movement();
		scene.play_sound(SfxCue::Pickup);
		true
	}

	/// Starts dragging a gear from the given pointer position
	pub fn pointer_down<H: GearsHost>(
		&mut self,
		scene: &mut GearScene<H>,
		gear: GearId,
		pointer: Vec2,
	) -> bool {
		if self.drag.is_some() {
			self.pointer_up(scene);
		}
		if !self.lift(scene, gear) {
			return false;
		}
		let Some(position) = scene.gear(gear).map(|g| g.position) else {
			return false;
		};
		scene.show_pin_outlines(gear);
		scene.set_gear_layer(gear, DRAG_LAYER);
		self.drag = Some(Drag {
			gear,
			offset: position - pointer,
		});
		true
	}

	/// Moves the dragged gear along with the pointer
	pub fn pointer_move<H: GearsHost>(&mut self, scene: &mut GearScene<H>, pointer: Vec2) {
		if let Some(drag) = self.drag {
			scene.set_gear_position(drag.gear, pointer + drag.offset);
		}
	}

	/// Lets go of the dragged gear
	pub fn pointer_up<H: GearsHost>(&mut self, scene: &mut GearScene<H>) {
		let Some(drag) = self.drag.take() else {
			return;
		};
		scene.hide_pin_outlines();
		self.apply_gear(scene, drag.gear, None);
	}

	/// Sends a gear to `pin`, or to the pin under it when none is given.
	/// Gears that fit nowhere go back home.
	pub fn apply_gear<H: GearsHost>(
		&mut self,
		scene: &mut GearScene<H>,
		gear: GearId,
		pin: Option<PinId>,
	) {
		let pin = pin.or_else(|| scene.pin_under(gear));
		match pin {
			Some(pin) if scene.fits(gear, pin) => {
				let Some(to) = scene.pin(pin).map(|p| p.position) else {
					return;
				};
				self.start_motion(scene, gear, to, MotionKind::Place(pin));
			}
			_ => {
				self.reset_position(scene, gear);
				scene.recalculate_movement();
			}
		}
	}

	/// Detaches a gear and slides it back home
	pub fn reset_position<H: GearsHost>(&mut self, scene: &mut GearScene<H>, gear: GearId) {
		if self.drag.is_some_and(|d| d.gear == gear) {
			self.drag = None;
		}
		self.cancel_motion(gear);
		if let Some(evicted) = scene.clear_connection(gear) {
			self.reset_position(scene, evicted);
		}
		self.send_riders_home(scene, gear);
		let Some((home, start_layer)) = scene.gear(gear).map(|g| (g.home_position, g.start_layer))
		else {
			return;
		};
		scene.play_sound(SfxCue::Drop);
		scene.play_sound(SfxCue::Slide);
		scene.set_gear_layer(gear, start_layer);
		self.start_motion(scene, gear, home, MotionKind::Return);
	}

	/// Sends home the gears still sliding onto the pin carried by `gear`
	fn send_riders_home<H: GearsHost>(&mut self, scene: &mut GearScene<H>, gear: GearId) {
		let Some(nested_pin) = scene.gear(gear).and_then(|g| g.nested_pin) else {
			return;
		};
		let riders = self
			.tasks
			.iter()
			.filter(|task| task.kind == MotionKind::Place(nested_pin))
			.map(|task| task.gear)
			.collect::<Vec<_>>();
		for rider in riders {
			log::debug!("Pin {nested_pin:?} left with gear {gear:?}, sending {rider:?} home");
			self.reset_position(scene, rider);
		}
	}

	/// Advances the slides in flight, finishing the ones that arrived
	pub fn tick<H: GearsHost>(&mut self, scene: &mut GearScene<H>, delta_seconds: f32) {
		for task in &mut self.tasks {
			task.elapsed += delta_seconds;
		}
		for task in &self.tasks {
			scene.set_gear_position(task.gear, task.sample());
		}

		let (finished, in_flight): (Vec<_>, Vec<_>) =
			self.tasks.drain(..).partition(MotionTask::is_finished);
		self.tasks = in_flight;

		for task in finished {
			// Completion may start or cancel other slides, so every task is rechecked
			if task.token != self.token(task.gear) {
				log::debug!("Dropping a stale slide of gear {:?}", task.gear);
				continue;
			}
			scene.set_gear_position(task.gear, task.to);
			match task.kind {
				MotionKind::Place(pin) => self.commit(scene, task.gear, pin),
				MotionKind::Return => {}
			}
		}
	}

	/// Mounts `gear` on `pin` and meshes it with the gears around.
	/// Placements that would jam the machinery are rolled back.
	fn commit<H: GearsHost>(&mut self, scene: &mut GearScene<H>, gear: GearId, pin: PinId) {
		let Some(pin_data) = scene.pin(pin) else {
			log::error!("Gear {gear:?} was sent to a missing pin {pin:?}");
			self.reset_position(scene, gear);
			return;
		};
		let (position, angle, layer, base_gear, pin_speed) = (
			pin_data.position,
			pin_data.angle,
			pin_data.layer,
			pin_data.base_gear,
			pin_data.rotation_speed,
		);
		// The pin may have been taken or carried away during the slide
		if !(scene.accepts_gears(pin, gear) && scene.fits(gear, pin)) {
			log::debug!("Pin {pin:?} stopped taking gear {gear:?} while it was on its way");
			self.reset_position(scene, gear);
			scene.recalculate_movement();
			return;
		}
		let speed = match base_gear {
			Some(base_gear) => scene.gear(base_gear).map_or(0.0, |g| g.rotation_speed),
			None => pin_speed,
		};

		if let Some(pin_data) = scene.pin_mut(pin) {
			pin_data.nested_gear = Some(gear);
		}
		scene.set_gear_layer(gear, layer);
		scene.set_gear_position(gear, position);
		let (draggable, previous_angle) = match scene.gear_mut(gear) {
			Some(gear_data) => {
				let previous_angle = gear_data.angle;
				gear_data.base_pin = Some(pin);
				gear_data.set_angle(angle);
				// Not announced until the placement is accepted
				gear_data.rotation_speed = speed;
				(gear_data.draggable, previous_angle)
			}
			None => return,
		};

		if let Some(base_gear) = base_gear {
			scene.graph.add_edge(gear, base_gear);
		}
		for other in scene.overlapping_gears(gear) {
			scene.graph.add_edge(gear, other);
		}

		if !scene.can_gears_rotate_together(gear) {
			if let Some(gear_data) = scene.gear_mut(gear) {
				gear_data.angle = previous_angle;
			}
			self.reset_position(scene, gear);
			scene.recalculate_movement();
			return;
		}
		if draggable {
			scene.play_sound(SfxCue::Install);
		}
		scene.adjust_gear_angle(gear);
		scene.recalculate_movement();
	}
}
