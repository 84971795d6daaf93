//! Components tying entities to the parts of the gears scene they show

use super::gears::{GearId, PinId};
use bevy::prelude::*;

/// Entity that belongs to the level being played, despawned together with it
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;

/// Body of a gear, its teeth are children of it
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GearSprite(pub GearId);

/// Pin or motor axle
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSprite(pub PinId);

/// Ring around a pin telling whether the moved gear fits on it
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinOutlineSprite(pub PinId);

/// One of the signal lights, lit while [`SignalLevel`](super::resources::SignalLevel)
/// is above its index
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalLight(pub usize);

/// Text with the name and hint of the level
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelHud;
