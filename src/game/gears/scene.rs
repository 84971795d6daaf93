//! Ownership of all gears and pins of a level, and the bookkeeping of their speeds

use super::{Gear, GearGraph, GearId, GearsHost, Pin, PinId, SfxCue, SPEED_THRESHOLD};
use crate::game::level::ValidLevelData;
use bevy::math::Vec2;

/// Error returned when a level cannot be instantiated
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConfigurationError {
	/// No level content was supplied
	MissingContent,
}

impl std::fmt::Display for ConfigurationError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MissingContent => f.write_str("Level contents are not set"),
		}
	}
}

impl std::error::Error for ConfigurationError {}

/// Arena of gears and pins together with their meshing graph.
///
/// Gears and pins refer to each other through [`GearId`] and [`PinId`] handles,
/// the scene owns all of them.
#[derive(Debug)]
pub struct GearScene<H: GearsHost> {
	pub(super) gears: Vec<Option<Gear>>,
	pub(super) pins: Vec<Option<Pin>>,
	pub(super) graph: GearGraph,
	host: H,
	/// Target gears that still have to start turning
	targets_remaining: i64,
	/// Gears with nonzero speed
	active_gears: usize,
	hum_level: u8,
	solved: bool,
	reached_levels: Vec<Option<usize>>,
	pub name: Option<String>,
	pub hint: Option<String>,
}

impl<H: GearsHost> GearScene<H> {
	pub fn new(host: H) -> Self {
		Self {
			gears: Vec::new(),
			pins: Vec::new(),
			graph: GearGraph::new(),
			host,
			targets_remaining: 0,
			active_gears: 0,
			hum_level: 0,
			solved: false,
			reached_levels: Vec::new(),
			name: None,
			hint: None,
		}
	}

	/// Instantiates the contents of a level.
	///
	/// Gears are not mounted yet, see
	/// [`InteractionController::start_level`](super::InteractionController::start_level).
	pub fn load_level(level: Option<&ValidLevelData>, host: H) -> Result<Self, ConfigurationError> {
		let level = level.ok_or_else(|| {
			log::error!("Contents are not set");
			ConfigurationError::MissingContent
		})?;
		let mut scene = Self::new(host);
		scene.name = level.name.clone();
		scene.hint = level.hint.clone();

		for pin_def in &level.pins {
			let mut pin = Pin::new(pin_def.position, pin_def.layer).motor(pin_def.rotation_speed);
			pin.is_base = pin_def.is_base;
			scene.add_pin(pin);
		}

		let mut targets = 0;
		for gear_def in &level.gears {
			let mut gear = Gear::new(gear_def.settings, gear_def.position, gear_def.layer)
				.with_level_speeds(gear_def.level_speeds.clone());
			gear.draggable = gear_def.draggable;
			if let Some(target_speed) = gear_def.target_speed {
				gear = gear.with_target(target_speed);
				targets += 1;
			}
			let gear_id = scene.add_gear(gear);
			if gear_def.nested_pin {
				scene.add_nested_pin(gear_id);
			}
		}
		scene.set_targets_to_win(level.targets_to_win.unwrap_or(targets));
		log::debug!(
			"Loaded level {:?} with {} gears, {} pins and {} targets",
			scene.name,
			scene.gears.len(),
			scene.pins.len(),
			scene.targets_remaining
		);
		Ok(scene)
	}

	/// Clears all level contents without reporting anything to the host
	pub fn teardown(&mut self) {
		self.gears.clear();
		self.pins.clear();
		self.graph.clear();
		self.reached_levels.clear();
		self.targets_remaining = 0;
		self.active_gears = 0;
		self.hum_level = 0;
		self.solved = false;
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub(super) fn play_sound(&mut self, cue: SfxCue) {
		self.host.play_sound(cue);
	}

	pub fn graph(&self) -> &GearGraph {
		&self.graph
	}

	/// Registers a gear, the gear is not mounted on anything
	pub fn add_gear(&mut self, mut gear: Gear) -> GearId {
		let id = GearId(self.gears.len());
		gear.base_pin = None;
		gear.nested_pin = None;
		gear.drive_gear = None;
		gear.rotation_speed = 0.0;
		gear.is_active = false;
		gear.is_moving = false;
		if gear.target {
			log::debug!("Target gear {id:?} registered");
		}
		self.gears.push(Some(gear));
		self.reached_levels.push(None);
		self.graph.add_gear(id);
		id
	}

	/// Registers an unoccupied pin
	pub fn add_pin(&mut self, mut pin: Pin) -> PinId {
		let id = PinId(self.pins.len());
		pin.nested_gear = None;
		pin.base_gear = None;
		self.pins.push(Some(pin));
		id
	}

	/// Adds a pin carried on top of `gear`, one layer above it
	pub fn add_nested_pin(&mut self, gear: GearId) -> Option<PinId> {
		let (position, layer, existing) = {
			let gear = self.gear(gear)?;
			(gear.position, gear.layer, gear.nested_pin)
		};
		if existing.is_some() {
			log::warn!("Gear {gear:?} already carries a pin");
			return existing;
		}
		let mut pin = Pin::new(position, layer + 1);
		pin.is_base = false;
		let pin_id = self.add_pin(pin);
		if let Some(pin) = self.pin_mut(pin_id) {
			pin.base_gear = Some(gear);
		}
		if let Some(gear) = self.gear_mut(gear) {
			gear.nested_pin = Some(pin_id);
		}
		Some(pin_id)
	}

	/// Removes a gear from the scene, detaching it from everything it touches
	pub fn remove_gear(&mut self, gear: GearId) {
		if self.gear(gear).is_none() {
			log::warn!("Gear {gear:?} does not exist");
			return;
		}
		self.clear_connection(gear);
		if let Some(nested_pin) = self.gear(gear).and_then(|g| g.nested_pin) {
			self.remove_pin(nested_pin);
		}
		for pin in self.pins.iter_mut().flatten() {
			if pin.nested_gear == Some(gear) {
				pin.nested_gear = None;
			}
		}
		for other in self.gears.iter_mut().flatten() {
			if other.drive_gear == Some(gear) {
				other.drive_gear = None;
			}
		}
		self.graph.remove_gear(gear);
		self.gears[gear.0] = None;
	}

	/// Removes a pin, the gear mounted on it stays where it is, unmounted
	pub fn remove_pin(&mut self, pin: PinId) {
		let Some(removed) = self.pins.get_mut(pin.0).and_then(Option::take) else {
			log::warn!("Pin {pin:?} does not exist");
			return;
		};
		if let Some(gear) = removed.nested_gear.and_then(|g| self.gear_mut(g)) {
			gear.base_pin = None;
		}
		if let Some(gear) = removed.base_gear.and_then(|g| self.gear_mut(g)) {
			gear.nested_pin = None;
		}
	}

	pub fn gear(&self, id: GearId) -> Option<&Gear> {
		self.gears.get(id.0).and_then(Option::as_ref)
	}

	pub(crate) fn gear_mut(&mut self, id: GearId) -> Option<&mut Gear> {
		self.gears.get_mut(id.0).and_then(Option::as_mut)
	}

	pub fn pin(&self, id: PinId) -> Option<&Pin> {
		self.pins.get(id.0).and_then(Option::as_ref)
	}

	pub(crate) fn pin_mut(&mut self, id: PinId) -> Option<&mut Pin> {
		self.pins.get_mut(id.0).and_then(Option::as_mut)
	}

	pub fn gears(&self) -> impl Iterator<Item = (GearId, &Gear)> + '_ {
		self.gears
			.iter()
			.enumerate()
			.filter_map(|(i, g)| g.as_ref().map(|g| (GearId(i), g)))
	}

	pub fn pins(&self) -> impl Iterator<Item = (PinId, &Pin)> + '_ {
		self.pins
			.iter()
			.enumerate()
			.filter_map(|(i, p)| p.as_ref().map(|p| (PinId(i), p)))
	}

	pub(super) fn gear_ids(&self) -> Vec<GearId> {
		self.gears().map(|(id, _)| id).collect()
	}

	pub(super) fn pin_ids(&self) -> Vec<PinId> {
		self.pins().map(|(id, _)| id).collect()
	}

	/// Moves a gear together with the pin it carries
	pub(crate) fn set_gear_position(&mut self, id: GearId, position: Vec2) {
		let Some(gear) = self.gear_mut(id) else {
			log::error!("Attempted to move a missing gear {id:?}");
			return;
		};
		gear.position = position;
		let nested_pin = gear.nested_pin;
		if let Some(nested_pin) = nested_pin.and_then(|p| self.pin_mut(p)) {
			nested_pin.position = position;
		}
	}

	/// Changes the layer of a gear, the pin it carries stays one layer above it
	pub(crate) fn set_gear_layer(&mut self, id: GearId, layer: i32) {
		let Some(gear) = self.gear_mut(id) else {
			log::error!("Attempted to change the layer of a missing gear {id:?}");
			return;
		};
		gear.layer = layer;
		let nested_pin = gear.nested_pin;
		if let Some(nested_pin) = nested_pin.and_then(|p| self.pin_mut(p)) {
			nested_pin.layer = layer + 1;
		}
	}

	/// Sets the speed of a gear, notifying everything that tracks speed changes
	pub(crate) fn set_rotation_speed(&mut self, id: GearId, speed: f32) {
		self.handle_rotation_speed_change(id, speed);
		if let Some(gear) = self.gear_mut(id) {
			gear.rotation_speed = speed;
		}
	}

	fn handle_rotation_speed_change(&mut self, id: GearId, new_speed: f32) {
		let Some(gear) = self.gear_mut(id) else {
			log::error!("Speed change on a missing gear {id:?}");
			return;
		};

		let active = new_speed != 0.0;
		let active_changed = gear.is_active != active;
		gear.is_active = active;

		let reached_level = gear
			.level_speeds
			.iter()
			.position(|&level_speed| (new_speed.abs() - level_speed).abs() <= SPEED_THRESHOLD);

		let moving_changed = if gear.target {
			let moving = if gear.target_speed == 0.0 {
				active
			} else {
				(new_speed.abs() - gear.target_speed).abs() <= SPEED_THRESHOLD
			};
			let changed = gear.is_moving != moving;
			gear.is_moving = moving;
			changed.then_some(moving)
		} else {
			None
		};

		if active_changed {
			if active {
				self.active_gears += 1;
			} else {
				self.active_gears = self.active_gears.saturating_sub(1);
			}
			self.update_hum_level();
		}

		if self.reached_levels[id.0] != reached_level {
			self.reached_levels[id.0] = reached_level;
			if let Some(level) = reached_level {
				self.host.gear_reached_level(id, level);
			}
		}

		if let Some(moving) = moving_changed {
			self.count_target_gears(moving);
		}
	}

	fn update_hum_level(&mut self) {
		let level = match self.active_gears {
			0..=1 => 0,
			2 => 1,
			3 => 2,
			_ => 3,
		};
		if level != self.hum_level {
			self.hum_level = level;
			self.host.hum_level_changed(level);
		}
	}

	fn count_target_gears(&mut self, moving: bool) {
		if !moving {
			self.targets_remaining += 1;
			return;
		}
		self.targets_remaining -= 1;
		if self.targets_remaining > 0 || self.solved {
			return;
		}
		self.solved = true;
		log::debug!("Level {:?} solved", self.name);
		self.host.play_sound(SfxCue::Victory);
		self.host.level_solved();
	}

	/// Sets how many target gears have to turn to solve the level
	pub fn set_targets_to_win(&mut self, count: usize) {
		let moving = self.gears().filter(|(_, gear)| gear.is_moving).count();
		self.targets_remaining = count as i64 - moving as i64;
	}

	/// Target gears that still need to start turning
	pub fn targets_remaining(&self) -> i64 {
		self.targets_remaining
	}

	/// Whether the level has been solved during this attempt
	pub fn is_solved(&self) -> bool {
		self.solved
	}

	/// Intensity of the machinery hum, `0..=3`
	pub fn hum_level(&self) -> u8 {
		self.hum_level
	}

	/// Number of gears currently turning
	pub fn active_gears(&self) -> usize {
		self.active_gears
	}
}
