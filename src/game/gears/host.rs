//! Collaborators the gears simulation reports to

use super::GearId;

/// Sound cues requested by the simulation
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SfxCue {
	/// A gear was lifted
	Pickup,
	/// A gear was let go without finding a place
	Drop,
	/// A gear slides back home
	Slide,
	/// A gear snapped onto a pin
	Install,
	/// A pin or gear got highlighted
	Highlight,
	/// The level has been solved
	Victory,
	/// A level has been loaded
	LevelStart,
}

/// Outer surface of the gears minigame.
///
/// Implementations must not call back into the scene.
pub trait GearsHost {
	/// Fire-and-forget sound effect
	fn play_sound(&mut self, cue: SfxCue);
	/// All target gears turn, raised at most once per level attempt
	fn level_solved(&mut self);
	/// Intensity of the machinery hum, `0..=3`
	fn hum_level_changed(&mut self, _level: u8) {}
	/// A gear reached one of its intermediate speeds
	fn gear_reached_level(&mut self, _gear: GearId, _level: usize) {}
}

/// Everything the simulation reported, in order
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HostEvent {
	Sound(SfxCue),
	LevelSolved,
	HumLevel(u8),
	GearReachedLevel(GearId, usize),
}

/// Host that queues up reports to be consumed later
#[derive(Clone, Debug, Default)]
pub struct HostQueue(pub Vec<HostEvent>);

impl HostQueue {
	pub fn drain(&mut self) -> std::vec::Drain<'_, HostEvent> {
		self.0.drain(..)
	}

	pub fn count(&self, event: HostEvent) -> usize {
		self.0.iter().filter(|&&e| e == event).count()
	}
}

impl GearsHost for HostQueue {
	fn play_sound(&mut self, cue: SfxCue) {
		self.0.push(HostEvent::Sound(cue));
	}

	fn level_solved(&mut self) {
		self.0.push(HostEvent::LevelSolved);
	}

	fn hum_level_changed(&mut self, level: u8) {
		self.0.push(HostEvent::HumLevel(level));
	}

	fn gear_reached_level(&mut self, gear: GearId, level: usize) {
		self.0.push(HostEvent::GearReachedLevel(gear, level));
	}
}
