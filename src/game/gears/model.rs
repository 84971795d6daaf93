//! Value entities of the gears minigame: gears, pins and the handles that refer to them

use bevy::math::Vec2;

/// Handle to a [`Gear`] owned by a [`GearScene`](super::GearScene)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GearId(pub(crate) usize);

impl GearId {
	pub fn index(self) -> usize {
		self.0
	}
}

/// Handle to a [`Pin`] owned by a [`GearScene`](super::GearScene)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PinId(pub(crate) usize);

impl PinId {
	pub fn index(self) -> usize {
		self.0
	}
}

/// Tooth module of a gear, gears only mesh with gears of the same module
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum GearType {
	#[default]
	ModuleA,
	ModuleB,
}

/// Physical dimensions of a gear
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GearSettings {
	pub gear_type: GearType,
	pub teeth: u32,
	/// Radius of the gear body
	pub gear_radius: f32,
	/// Radius of the circle touching the tips of the teeth
	pub tip_radius: f32,
	/// Radius within which the gear snaps onto a pin
	pub pin_radius: f32,
}

impl Default for GearSettings {
	fn default() -> Self {
		Self {
			gear_type: GearType::ModuleA,
			teeth: 12,
			gear_radius: 1.525,
			tip_radius: 2.275,
			pin_radius: 1.25,
		}
	}
}

impl GearSettings {
	/// Angular period of the tooth pattern, in degrees
	pub fn tooth_angle(&self) -> f32 {
		tooth_angle(self.teeth)
	}
}

/// Angular period of a tooth pattern with `teeth` teeth, in degrees
pub fn tooth_angle(teeth: u32) -> f32 {
	360.0 / teeth as f32
}

/// A gear that can be mounted on a [`Pin`]
#[derive(Clone, Debug)]
pub struct Gear {
	pub settings: GearSettings,
	/// Center of the gear in world units
	pub position: Vec2,
	/// Rotation in degrees, normalized to `[0, 360)`
	pub angle: f32,
	/// Logical depth, gears only mesh with gears on the same layer
	pub layer: i32,
	/// Layer the gear returns to when it is sent home
	pub start_layer: i32,
	/// Inventory position the gear returns to after an invalid placement
	pub home_position: Vec2,
	pub draggable: bool,
	/// Whether the gear counts towards solving the level
	pub target: bool,
	/// Speed the target gear has to reach, `0.0` accepts any nonzero speed
	pub target_speed: f32,
	/// Intermediate speeds that are reported when the gear reaches them
	pub level_speeds: Vec<f32>,
	pub(crate) rotation_speed: f32,
	pub(crate) drive_gear: Option<GearId>,
	pub(crate) base_pin: Option<PinId>,
	pub(crate) nested_pin: Option<PinId>,
	pub(crate) is_moving: bool,
	pub(crate) is_active: bool,
}

impl Gear {
	pub fn new(settings: GearSettings, position: Vec2, layer: i32) -> Self {
		Self {
			settings,
			position,
			angle: 0.0,
			layer,
			start_layer: layer,
			home_position: position,
			draggable: true,
			target: false,
			target_speed: 0.0,
			level_speeds: Vec::new(),
			rotation_speed: 0.0,
			drive_gear: None,
			base_pin: None,
			nested_pin: None,
			is_moving: false,
			is_active: false,
		}
	}

	pub fn fixed(mut self) -> Self {
		self.draggable = false;
		self
	}

	pub fn with_target(mut self, target_speed: f32) -> Self {
		self.target = true;
		self.target_speed = target_speed;
		self
	}

	pub fn with_level_speeds(mut self, level_speeds: Vec<f32>) -> Self {
		self.level_speeds = level_speeds;
		self
	}

	/// Signed speed in degrees per simulation step, the sign is the direction
	pub fn rotation_speed(&self) -> f32 {
		self.rotation_speed
	}

	/// Gear that drives this one, equal to the gear itself when it sits on a motor pin
	pub fn drive_gear(&self) -> Option<GearId> {
		self.drive_gear
	}

	/// Pin this gear is mounted on
	pub fn base_pin(&self) -> Option<PinId> {
		self.base_pin
	}

	/// Pin carried on top of this gear
	pub fn nested_pin(&self) -> Option<PinId> {
		self.nested_pin
	}

	/// Whether this target gear currently turns at its intended speed
	pub fn is_moving(&self) -> bool {
		self.is_moving
	}

	pub(crate) fn set_angle(&mut self, angle: f32) {
		self.angle = angle.rem_euclid(360.0);
	}

	/// Sorting depth of the gear sprite, outline first and decorations last
	pub fn sorting_order(&self) -> i32 {
		self.layer * 10 + 2
	}
}

/// Visual affordance shown on a pin while a gear is being moved
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PinOutline {
	#[default]
	Hidden,
	Allowed,
	Denied,
}

/// A socket that holds at most one gear
#[derive(Clone, Debug)]
pub struct Pin {
	pub position: Vec2,
	/// Rotation in degrees, normalized to `[0, 360)`
	pub angle: f32,
	pub layer: i32,
	/// Nonzero for motor pins
	pub rotation_speed: f32,
	/// Base pins are drawn as sockets in the board, the rest as axles on gears
	pub is_base: bool,
	pub outline: PinOutline,
	pub(crate) nested_gear: Option<GearId>,
	pub(crate) base_gear: Option<GearId>,
}

impl Pin {
	pub fn new(position: Vec2, layer: i32) -> Self {
		Self {
			position,
			angle: 0.0,
			layer,
			rotation_speed: 0.0,
			is_base: true,
			outline: PinOutline::Hidden,
			nested_gear: None,
			base_gear: None,
		}
	}

	pub fn motor(mut self, rotation_speed: f32) -> Self {
		self.rotation_speed = rotation_speed;
		self
	}

	pub fn is_motor(&self) -> bool {
		self.rotation_speed != 0.0
	}

	/// Gear mounted on this pin
	pub fn nested_gear(&self) -> Option<GearId> {
		self.nested_gear
	}

	/// Gear this pin is carried on
	pub fn base_gear(&self) -> Option<GearId> {
		self.base_gear
	}

	/// Sorting depth of the pin sprite, pins are drawn under gears of the same layer
	pub fn sorting_order(&self) -> i32 {
		self.layer * 10 - 4
	}
}
