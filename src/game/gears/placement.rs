//! Circle overlap queries that decide where a gear may go

use super::{
	GearId, GearScene, GearsHost, PinId, PinOutline, INACTIVE_PIN_LAYER, PIN_COLLIDER_RADIUS,
};
use bevy::math::Vec2;

fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
	a.distance_squared(b) < (radius_a + radius_b).powi(2)
}

impl<H: GearsHost> GearScene<H> {
	/// Free pin closest to the gear within its snapping radius
	pub fn pin_under(&self, gear: GearId) -> Option<PinId> {
		let gear_data = self.gear(gear)?;
		self.pins()
			.filter(|(_, pin)| {
				circles_overlap(
					gear_data.position,
					gear_data.settings.pin_radius,
					pin.position,
					PIN_COLLIDER_RADIUS,
				)
			})
			.filter(|&(id, _)| self.accepts_gears(id, gear))
			.min_by(|(_, a), (_, b)| {
				let da = a.position.distance_squared(gear_data.position);
				let db = b.position.distance_squared(gear_data.position);
				da.total_cmp(&db)
			})
			.map(|(id, _)| id)
	}

	/// Whether `pin` can take any gear right now, not counting the pin carried by `gear`
	pub(super) fn accepts_gears(&self, pin: PinId, gear: GearId) -> bool {
		self.pin(pin).is_some_and(|pin| {
			pin.base_gear != Some(gear) && pin.nested_gear.is_none() && pin.layer < INACTIVE_PIN_LAYER
		})
	}

	/// Whether mounting `gear` on `pin` leaves room around it:
	/// the teeth may not cover another pin nor another gear body on the same layer
	pub fn fits_by_size(&self, gear: GearId, pin: PinId) -> bool {
		let (Some(gear_data), Some(target)) = (self.gear(gear), self.pin(pin)) else {
			return false;
		};
		let reach = gear_data.settings.tip_radius;

		let touches_pin = self.pins().any(|(other_id, other)| {
			other_id != pin
				&& Some(other_id) != gear_data.base_pin
				&& Some(other_id) != gear_data.nested_pin
				&& other.layer == target.layer
				&& circles_overlap(target.position, reach, other.position, PIN_COLLIDER_RADIUS)
		});
		if touches_pin {
			return false;
		}

		!self.gears().any(|(other_id, other)| {
			other_id != gear
				&& other.layer == target.layer
				&& circles_overlap(
					target.position,
					reach,
					other.position,
					other.settings.gear_radius,
				)
		})
	}

	/// Whether all gears the teeth of `gear` would reach on `pin` share its tooth module
	pub fn fits_by_type(&self, gear: GearId, pin: PinId) -> bool {
		let (Some(gear_data), Some(target)) = (self.gear(gear), self.pin(pin)) else {
			return false;
		};
		!self.gears().any(|(other_id, other)| {
			other_id != gear
				&& other.settings.gear_type != gear_data.settings.gear_type
				&& other.layer == target.layer
				&& circles_overlap(
					target.position,
					gear_data.settings.tip_radius,
					other.position,
					other.settings.tip_radius,
				)
		})
	}

	pub fn fits(&self, gear: GearId, pin: PinId) -> bool {
		self.fits_by_size(gear, pin) && self.fits_by_type(gear, pin)
	}

	/// Mounted gears on the same layer whose teeth reach the teeth of `gear`, in arena order
	pub fn overlapping_gears(&self, gear: GearId) -> Vec<GearId> {
		let Some(gear_data) = self.gear(gear) else {
			return Vec::new();
		};
		self.gears()
			.filter(|&(other_id, other)| {
				other_id != gear
					&& other.base_pin.is_some()
					&& other.layer == gear_data.layer
					&& circles_overlap(
						gear_data.position,
						gear_data.settings.tip_radius,
						other.position,
						other.settings.tip_radius,
					)
			})
			.map(|(id, _)| id)
			.collect()
	}

	/// Topmost draggable gear whose body covers `point`
	pub fn gear_at(&self, point: Vec2) -> Option<GearId> {
		self.gears()
			.filter(|(_, gear)| gear.draggable)
			.filter(|(_, gear)| gear.position.distance(point) <= gear.settings.gear_radius)
			.max_by_key(|(_, gear)| gear.layer)
			.map(|(id, _)| id)
	}

	/// Highlights every pin that could take `gear`, telling apart the ones it fits on
	pub fn show_pin_outlines(&mut self, gear: GearId) {
		let outlines = self
			.pin_ids()
			.into_iter()
			.filter(|&pin| self.accepts_gears(pin, gear))
			.map(|pin| {
				let outline = if self.fits(gear, pin) {
					PinOutline::Allowed
				} else {
					PinOutline::Denied
				};
				(pin, outline)
			})
			.collect::<Vec<_>>();
		for (pin, outline) in outlines {
			if let Some(pin) = self.pin_mut(pin) {
				pin.outline = outline;
			}
		}
	}

	/// Highlights a single pin, telling whether `gear` fits on it
	pub(super) fn show_pin_outline(&mut self, pin: PinId, gear: GearId) {
		let outline = if self.fits(gear, pin) {
			PinOutline::Allowed
		} else {
			PinOutline::Denied
		};
		if let Some(pin) = self.pin_mut(pin) {
			pin.outline = outline;
		}
	}

	pub fn hide_pin_outlines(&mut self) {
		for pin in self.pins.iter_mut().flatten() {
			pin.outline = PinOutline::Hidden;
		}
	}
}
