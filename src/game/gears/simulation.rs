//! Rotation propagation through meshed gears

use super::{model::tooth_angle, GearId, GearScene, GearsHost, SAME_SHAFT_DISTANCE};
use bevy::math::Vec2;

/// Whether two rotating parts share their rotation axis
pub fn is_on_same_shaft(a: Vec2, b: Vec2) -> bool {
	a.distance(b) <= SAME_SHAFT_DISTANCE
}

impl<H: GearsHost> GearScene<H> {
	/// Recomputes the speed of every gear reachable from an active motor pin
	pub fn recalculate_movement(&mut self) {
		for gear in self.gear_ids() {
			if let Some(gear) = self.gear_mut(gear) {
				gear.drive_gear = None;
			}
		}

		let driven = self
			.pins()
			.filter(|(_, pin)| pin.rotation_speed != 0.0)
			.filter_map(|(_, pin)| pin.nested_gear.map(|gear| (gear, pin.rotation_speed)))
			.collect::<Vec<_>>();
		for (gear, speed) in driven {
			self.set_rotation_speed(gear, speed);
			if let Some(gear_data) = self.gear_mut(gear) {
				gear_data.drive_gear = Some(gear);
			}
		}

		for gear in self.gear_ids() {
			if self.is_drive_chain_active(gear) {
				self.propagate_from(gear);
			}
		}
	}

	/// Whether the pin under `gear` makes it turn,
	/// either being a motor or being carried by a turning gear
	fn is_drive_chain_active(&self, gear: GearId) -> bool {
		let Some(pin) = self
			.gear(gear)
			.and_then(|g| g.base_pin)
			.and_then(|p| self.pin(p))
		else {
			return false;
		};
		match pin.base_gear {
			None => pin.rotation_speed != 0.0,
			Some(base_gear) => self
				.gear(base_gear)
				.is_some_and(|g| g.rotation_speed != 0.0),
		}
	}

	/// Drives every neighbour of `engine` that has no driver yet, recursively
	fn propagate_from(&mut self, engine: GearId) {
		let neighbors = self.graph.neighbors(engine).to_vec();
		for neighbor in neighbors {
			let (Some(engine_gear), Some(neighbor_gear)) = (self.gear(engine), self.gear(neighbor))
			else {
				log::error!("Gear graph refers to a missing gear");
				continue;
			};
			// Gears that already have a driver keep it
			if neighbor_gear.drive_gear.is_some() {
				continue;
			}

			let gear_ratio =
				engine_gear.settings.teeth as f32 / neighbor_gear.settings.teeth as f32;
			let speed = if is_on_same_shaft(neighbor_gear.position, engine_gear.position) {
				engine_gear.rotation_speed
			} else {
				engine_gear.rotation_speed * gear_ratio * -1.0
			};

			self.set_rotation_speed(neighbor, speed);
			if let Some(neighbor_gear) = self.gear_mut(neighbor) {
				neighbor_gear.drive_gear = Some(engine);
			}
			self.propagate_from(neighbor);
		}
	}

	/// Stops every gear whose drive chain passes through `gear`
	pub fn stop_connected_gears(&mut self, gear: GearId) {
		let driven = self
			.gears()
			.filter(|(id, g)| *id != gear && g.drive_gear == Some(gear))
			.map(|(id, _)| id)
			.collect::<Vec<_>>();
		for driven_gear in driven {
			// A deeper call may have already stopped it
			if self.gear(driven_gear).and_then(|g| g.drive_gear) != Some(gear) {
				continue;
			}
			self.set_rotation_speed(driven_gear, 0.0);
			if let Some(driven_gear) = self.gear_mut(driven_gear) {
				driven_gear.drive_gear = None;
			}
			self.stop_connected_gears(driven_gear);
		}
	}

	/// Detaches a gear from everything: stops it and the gears it drives,
	/// unmounts it from its pin and removes its edges.
	///
	/// Returns the gear sitting on the pin carried by `gear`, which has lost its support
	/// and is expected to be sent home by the caller.
	pub fn clear_connection(&mut self, gear: GearId) -> Option<GearId> {
		if let Some(gear_data) = self.gear_mut(gear) {
			gear_data.drive_gear = None;
		} else {
			log::error!("Attempted to clear connections of a missing gear {gear:?}");
			return None;
		}
		self.set_rotation_speed(gear, 0.0);
		self.stop_connected_gears(gear);

		let (base_pin, nested_pin) = match self.gear_mut(gear) {
			Some(gear_data) => (gear_data.base_pin.take(), gear_data.nested_pin),
			None => (None, None),
		};
		if let Some(pin) = base_pin.and_then(|p| self.pin_mut(p)) {
			pin.nested_gear = None;
		}
		let evicted = nested_pin
			.and_then(|p| self.pin(p))
			.and_then(|p| p.nested_gear);

		self.graph.clear_edges_of(gear);
		evicted
	}

	/// Whether two meshed gears turn in directions that do not block each other
	pub fn are_directions_compatible(&self, current: GearId, target: GearId) -> bool {
		let (Some(current), Some(target)) = (self.gear(current), self.gear(target)) else {
			return true;
		};
		if current.rotation_speed == 0.0 || target.rotation_speed == 0.0 {
			return true;
		}
		if is_on_same_shaft(current.position, target.position) {
			return current.rotation_speed.signum() == target.rotation_speed.signum();
		}
		current.rotation_speed.signum() == -target.rotation_speed.signum()
	}

	/// Checks that a freshly meshed gear does not jam the gear train.
	///
	/// Every neighbour has to turn in a compatible direction and must not close
	/// a loop with an odd number of gears. Only the first loop found through each
	/// neighbour is inspected.
	pub fn can_gears_rotate_together(&self, gear: GearId) -> bool {
		for &neighbor in self.graph.neighbors(gear) {
			if !self.are_directions_compatible(gear, neighbor) {
				log::debug!("Gears {gear:?} and {neighbor:?} turn against each other");
				return false;
			}

			// The path walks back to `gear` over its edge with `neighbor`, so an
			// even number of steps closes a loop with an odd number of gears
			if let Some(path) = self.graph.find_alternate_path(gear, neighbor) {
				if path.len() % 2 == 0 {
					log::debug!("Gear {gear:?} closes an odd loop through {path:?}");
					return false;
				}
			}
		}
		true
	}

	/// Rotates a freshly placed gear and the idle gears around it
	/// so that their teeth interlock with their drivers
	pub fn adjust_gear_angle(&mut self, gear: GearId) {
		if self.graph.neighbors(gear).is_empty() {
			return;
		}
		let mut visited = vec![false; self.gears.len()];
		self.set_angles(gear, &mut visited);
	}

	fn set_angles(&mut self, gear: GearId, visited: &mut Vec<bool>) {
		visited[gear.0] = true;
		let neighbors = self.graph.neighbors(gear).to_vec();

		if let Some(&driver) = neighbors.iter().find(|&&n| self.is_driven(n)) {
			self.calculate_angle(gear, driver);
		}

		for neighbor in neighbors {
			if visited[neighbor.0] || self.is_driven(neighbor) {
				continue;
			}
			self.calculate_angle(neighbor, gear);
			self.set_angles(neighbor, visited);
		}
	}

	fn is_driven(&self, gear: GearId) -> bool {
		let Some(gear) = self.gear(gear) else {
			return false;
		};
		let on_motor = gear
			.base_pin
			.and_then(|p| self.pin(p))
			.is_some_and(|p| p.rotation_speed != 0.0);
		on_motor || gear.drive_gear.is_some()
	}

	fn calculate_angle(&mut self, current: GearId, driver: GearId) {
		let (Some(current_gear), Some(drive_gear)) = (self.gear(current), self.gear(driver)) else {
			return;
		};
		if is_on_same_shaft(current_gear.position, drive_gear.position) {
			return;
		}

		let gear_ratio = drive_gear.settings.teeth as f32 / current_gear.settings.teeth as f32;
		let mut rotation_angle = -drive_gear.angle * gear_ratio;

		let centers = current_gear.position - drive_gear.position;
		let vector_angle = (centers.y.atan2(centers.x).to_degrees() + 360.0) % 360.0;
		rotation_angle += vector_angle;

		let drive_tooth_angle = tooth_angle(drive_gear.settings.teeth);
		let current_tooth_angle = tooth_angle(current_gear.settings.teeth);
		let drive_tooth_offset = vector_angle % drive_tooth_angle;
		let current_tooth_offset =
			(1.0 - drive_tooth_offset / (drive_tooth_angle * 0.5)) * current_tooth_angle / 2.0;
		rotation_angle -= current_tooth_offset;

		if let Some(current_gear) = self.gear_mut(current) {
			current_gear.set_angle(rotation_angle % current_tooth_angle);
		}
	}

	/// Advances the rotation of every gear and pin by one simulation step
	pub fn tick(&mut self) {
		for gear in self.gears.iter_mut().flatten() {
			let angle = gear.angle + gear.rotation_speed;
			gear.set_angle(angle);
		}
		let carried_angles = self
			.pins
			.iter()
			.map(|pin| {
				pin.as_ref()
					.and_then(|p| p.base_gear)
					.and_then(|g| self.gear(g))
					.map(|g| g.angle)
			})
			.collect::<Vec<_>>();
		for (pin, carried_angle) in self.pins.iter_mut().zip(carried_angles) {
			let Some(pin) = pin else {
				continue;
			};
			pin.angle = carried_angle.unwrap_or((pin.angle + pin.rotation_speed).rem_euclid(360.0));
		}
	}
}
