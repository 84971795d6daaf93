//! Events that drive the level lifecycle

use super::level::ValidLevelData;
use bevy::prelude::*;

/// Trigger event that tears down the level being played and starts the given one.
/// `None` leaves the board empty.
#[derive(Event, Debug, Clone)]
pub struct EnterLevel(pub Option<ValidLevelData>);

/// Sent once every required target gear turns
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelSolved;
