use bevy::{color::palettes, prelude::*};

pub(super) fn plugin(app: &mut App) {
	app.register_type::<GearPalette>()
		.init_resource::<GearPalette>()
		.insert_resource(ClearColor(palettes::tailwind::STONE_800.into()));
}

/// World units of free space kept around the level when framing it
pub const VIEW_MARGIN: f32 = 3.0;

/// Size of the view when there is no level to frame
pub const DEFAULT_VIEW_SIZE: Vec2 = Vec2::new(32.0, 18.0);

/// Fraction of a tooth pitch taken up by the tooth itself
pub const TOOTH_FILL: f32 = 0.5;

/// Width of the outline ring drawn around pins
pub const PIN_OUTLINE_WIDTH: f32 = 0.15;

/// Defines Z depth of various objects to layer them properly
pub mod layers {
	/// Depth difference between two consecutive sorting orders
	pub const SORTING_STEP: f32 = 0.01;
	pub const TEETH: f32 = -0.001; // Relative to the gear body
	pub const PIN_OUTLINE: f32 = 0.001; // Relative to the pin
}

/// Depth of a sprite with the given sorting order
pub fn sorting_depth(sorting_order: i32) -> f32 {
	sorting_order as f32 * layers::SORTING_STEP
}

/// Contains colors used for rendering gears and pins
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct GearPalette {
	pub gear: Color,
	pub fixed_gear: Color,
	pub target_idle: Color,
	pub target_turning: Color,
	pub selected_gear: Color,
	pub pin: Color,
	pub motor_pin: Color,
	pub nested_pin: Color,
	pub outline_allowed: Color,
	pub outline_denied: Color,
	pub hud_text: Color,
	pub hud_solved: Color,
	pub signal_lit: Color,
	pub signal_off: Color,
}

impl Default for GearPalette {
	fn default() -> Self {
		use palettes::tailwind as p;
		Self {
			gear: p::AMBER_600.into(),
			fixed_gear: p::STONE_500.into(),
			target_idle: p::SKY_800.into(),
			target_turning: p::SKY_400.into(),
			selected_gear: p::AMBER_300.into(),
			pin: p::STONE_400.into(),
			motor_pin: p::ROSE_500.into(),
			nested_pin: p::STONE_300.into(),
			outline_allowed: p::GREEN_500.into(),
			outline_denied: p::RED_600.into(),
			hud_text: p::STONE_100.into(),
			hud_solved: p::GREEN_400.into(),
			signal_lit: p::YELLOW_300.into(),
			signal_off: p::STONE_700.into(),
		}
	}
}
