//! Gears minigame core: gears meshed on pins, rotation propagation and win tracking.
//!
//! Nothing in here depends on the ECS, the bevy layer drives a [`GearScene`]
//! together with an [`InteractionController`] and listens through a [`GearsHost`].

mod gamepad;
mod graph;
mod host;
mod interaction;
mod model;
mod placement;
mod scene;
mod simulation;
#[cfg(test)]
mod test;

pub use graph::GearGraph;
pub use host::{GearsHost, HostEvent, HostQueue, SfxCue};
pub use interaction::{
	GamepadMode, InteractionController, InteractionState, MotionKind, MotionTask, MOVE_SPEED,
};
pub use model::*;
pub use scene::{ConfigurationError, GearScene};
pub use simulation::is_on_same_shaft;

/// Largest difference between a speed and a speed goal that still counts as reaching it
pub const SPEED_THRESHOLD: f32 = 0.2;
/// Parts closer than this share a shaft and turn together
pub const SAME_SHAFT_DISTANCE: f32 = 0.1;
/// Layer of the gear being dragged, above everything else
pub const DRAG_LAYER: i32 = 1000;
/// Pins on this layer or above do not take gears
pub const INACTIVE_PIN_LAYER: i32 = 100;
/// Radius of the area a pin occupies
pub const PIN_COLLIDER_RADIUS: f32 = 0.4;
