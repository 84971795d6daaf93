use bevy::math::Vec2;

use super::*;

/// Scene with a controller, gears start lined up far below the board
struct Bench {
	scene: GearScene<HostQueue>,
	controller: InteractionController,
}

impl Bench {
	fn new() -> Self {
		Self {
			scene: GearScene::new(HostQueue::default()),
			controller: InteractionController::new(),
		}
	}

	fn pin(&mut self, x: f32, y: f32) -> PinId {
		self.scene.add_pin(Pin::new(Vec2::new(x, y), 0))
	}

	fn motor(&mut self, x: f32, y: f32, speed: f32) -> PinId {
		self.scene.add_pin(Pin::new(Vec2::new(x, y), 0).motor(speed))
	}

	fn home(&self) -> Vec2 {
		Vec2::new(10.0 * self.scene.gears().count() as f32, -40.0)
	}

	fn gear(&mut self) -> GearId {
		self.gear_with(GearSettings::default())
	}

	fn gear_with(&mut self, settings: GearSettings) -> GearId {
		let home = self.home();
		self.scene.add_gear(Gear::new(settings, home, 0))
	}

	fn target(&mut self) -> GearId {
		let home = self.home();
		self.scene
			.add_gear(Gear::new(GearSettings::default(), home, 0).with_target(0.0))
	}

	/// Sends a gear to a pin and lets every slide finish
	fn place(&mut self, gear: GearId, pin: PinId) {
		self.controller.apply_gear(&mut self.scene, gear, Some(pin));
		self.settle();
	}

	fn settle(&mut self) {
		self.controller.tick(&mut self.scene, 100.0);
		self.controller.tick(&mut self.scene, 100.0);
	}

	fn speed(&self, gear: GearId) -> f32 {
		self.scene.gear(gear).unwrap().rotation_speed()
	}

	fn angle(&self, gear: GearId) -> f32 {
		self.scene.gear(gear).unwrap().angle
	}

	fn base_pin(&self, gear: GearId) -> Option<PinId> {
		self.scene.gear(gear).unwrap().base_pin()
	}

	fn events(&self) -> &[HostEvent] {
		&self.scene.host().0
	}

	fn count(&self, event: HostEvent) -> usize {
		self.scene.host().count(event)
	}
}

/// Motor at the origin with a triangle of pins four units apart
fn triangle() -> (Bench, [PinId; 3]) {
	let mut bench = Bench::new();
	let pins = [
		bench.motor(0.0, 0.0, 10.0),
		bench.pin(4.0, 0.0),
		bench.pin(2.0, 3.464),
	];
	(bench, pins)
}

/// Motor at the origin with a square of pins four units apart
fn square() -> (Bench, [PinId; 4]) {
	let mut bench = Bench::new();
	let pins = [
		bench.motor(0.0, 0.0, 10.0),
		bench.pin(4.0, 0.0),
		bench.pin(4.0, 4.0),
		bench.pin(0.0, 4.0),
	];
	(bench, pins)
}

#[test]
fn missing_level_content() {
	let result = GearScene::load_level(None, HostQueue::default());
	assert_eq!(result.err(), Some(ConfigurationError::MissingContent));
}

#[test]
fn gear_ratio() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let pin = bench.pin(5.5, 0.0);
	let small = bench.gear();
	let large = bench.gear_with(GearSettings {
		teeth: 24,
		gear_radius: 3.05,
		tip_radius: 3.8,
		..GearSettings::default()
	});

	bench.place(small, motor);
	bench.place(large, pin);

	assert_eq!(bench.base_pin(small), Some(motor));
	assert_eq!(bench.base_pin(large), Some(pin));
	assert_eq!(bench.speed(small), 10.0);
	assert_eq!(bench.speed(large), -5.0);
	let large_gear = bench.scene.gear(large).unwrap();
	assert_eq!(large_gear.drive_gear(), Some(small));
	assert_eq!(bench.scene.gear(small).unwrap().drive_gear(), Some(small));
	assert_eq!(bench.count(HostEvent::Sound(SfxCue::Install)), 2);
}

#[test]
fn same_shaft() {
	assert!(is_on_same_shaft(Vec2::ZERO, Vec2::new(0.05, 0.0)));
	assert!(is_on_same_shaft(Vec2::ZERO, Vec2::new(0.0, 0.1)));
	assert!(!is_on_same_shaft(Vec2::ZERO, Vec2::new(0.2, 0.0)));
}

#[test]
fn meshed_teeth_interlock() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let pin = bench.pin(4.0, 0.0);
	let driver = bench.gear();
	let follower = bench.gear();

	bench.place(driver, motor);
	bench.place(follower, pin);
	assert_eq!(bench.angle(driver), 0.0);
	// Half a tooth behind the line between the centres
	assert_eq!(bench.angle(follower), 345.0);
}

#[test]
fn teeth_interlock_with_a_turned_driver() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let pin = bench.pin(0.0, 5.5);
	let small = bench.gear();
	let large = bench.gear_with(GearSettings {
		teeth: 24,
		gear_radius: 3.05,
		tip_radius: 3.8,
		..GearSettings::default()
	});

	bench.place(small, motor);
	bench.scene.tick();
	bench.scene.tick();
	assert!((bench.angle(small) - 20.0).abs() < 1e-3);

	bench.place(large, pin);
	assert!((bench.angle(large) - 12.5).abs() < 1e-3);
	// The driver keeps its angle
	assert!((bench.angle(small) - 20.0).abs() < 1e-3);
}

#[test]
fn gear_on_the_same_shaft_keeps_the_pin_angle() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let carrier = bench.gear();
	let nested_pin = bench.scene.add_nested_pin(carrier).unwrap();
	let rider = bench.gear_with(GearSettings {
		teeth: 24,
		gear_radius: 3.05,
		tip_radius: 3.8,
		..GearSettings::default()
	});

	bench.place(carrier, motor);
	bench.scene.tick();
	bench.scene.tick();
	assert!((bench.scene.pin(nested_pin).unwrap().angle - 20.0).abs() < 1e-3);

	bench.place(rider, nested_pin);
	assert_eq!(bench.base_pin(rider), Some(nested_pin));
	assert!((bench.angle(rider) - 20.0).abs() < 1e-3);
}

#[test]
fn nested_gear_shares_the_shaft() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let carrier = bench.gear();
	let nested_pin = bench.scene.add_nested_pin(carrier).unwrap();
	let rider = bench.gear_with(GearSettings {
		teeth: 24,
		gear_radius: 3.05,
		tip_radius: 3.8,
		..GearSettings::default()
	});

	bench.place(carrier, motor);
	assert_eq!(bench.scene.pin(nested_pin).unwrap().position, Vec2::ZERO);
	assert_eq!(bench.scene.pin(nested_pin).unwrap().layer, 1);

	bench.place(rider, nested_pin);
	assert_eq!(bench.base_pin(rider), Some(nested_pin));
	assert_eq!(bench.scene.gear(rider).unwrap().layer, 1);
	assert_eq!(bench.speed(rider), 10.0);
}

#[test]
fn lifting_a_carrier_evicts_the_nested_gear() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let carrier = bench.gear();
	let nested_pin = bench.scene.add_nested_pin(carrier).unwrap();
	let rider = bench.gear();
	let rider_home = bench.scene.gear(rider).unwrap().home_position;
	bench.place(carrier, motor);
	bench.place(rider, nested_pin);

	assert!(bench
		.controller
		.pointer_down(&mut bench.scene, carrier, Vec2::ZERO));
	assert_eq!(
		bench.controller.state(),
		InteractionState::Dragging { gear: carrier }
	);
	assert_eq!(bench.speed(carrier), 0.0);
	assert_eq!(bench.speed(rider), 0.0);
	assert_eq!(bench.base_pin(rider), None);
	assert_eq!(bench.scene.pin(nested_pin).unwrap().nested_gear(), None);
	assert_eq!(bench.scene.pin(motor).unwrap().nested_gear(), None);
	assert_eq!(bench.scene.pin(nested_pin).unwrap().layer, DRAG_LAYER + 1);

	bench.settle();
	assert_eq!(bench.scene.gear(rider).unwrap().position, rider_home);
	assert_eq!(bench.scene.gear(rider).unwrap().layer, 0);
}

#[test]
fn propagation_is_idempotent() {
	let (mut bench, pins) = square();
	let gears = [bench.gear(), bench.gear(), bench.gear(), bench.gear()];
	for (gear, pin) in gears.into_iter().zip(pins) {
		bench.place(gear, pin);
	}
	let speeds = gears.map(|gear| bench.speed(gear));
	assert_eq!(speeds, [10.0, -10.0, 10.0, -10.0]);

	let event_count = bench.events().len();
	bench.scene.recalculate_movement();
	assert_eq!(gears.map(|gear| bench.speed(gear)), speeds);
	assert_eq!(bench.events().len(), event_count);
}

#[test]
fn odd_loop_is_rejected() {
	let (mut bench, pins) = triangle();
	let gears = [bench.gear(), bench.gear(), bench.gear()];
	bench.place(gears[0], pins[0]);
	bench.place(gears[1], pins[1]);
	bench.place(gears[2], pins[2]);

	assert_eq!(bench.base_pin(gears[2]), None);
	assert_eq!(bench.scene.pin(pins[2]).unwrap().nested_gear(), None);
	assert_eq!(bench.speed(gears[0]), 10.0);
	assert_eq!(bench.speed(gears[1]), -10.0);
	assert_eq!(bench.speed(gears[2]), 0.0);
	assert!(bench.scene.graph().neighbors(gears[2]).is_empty());
	assert_eq!(bench.scene.graph().edge_count(), 1);
}

#[test]
fn even_loop_is_accepted() {
	let (mut bench, pins) = square();
	let gears = [bench.gear(), bench.gear(), bench.gear(), bench.gear()];
	for (gear, pin) in gears.into_iter().zip(pins) {
		bench.place(gear, pin);
	}
	for (gear, pin) in gears.into_iter().zip(pins) {
		assert_eq!(bench.base_pin(gear), Some(pin));
	}
	assert_eq!(bench.scene.graph().edge_count(), 4);
	assert_eq!(bench.speed(gears[3]), -10.0);
}

#[test]
fn opposing_motors_are_rejected() {
	let mut bench = Bench::new();
	let left = bench.motor(0.0, 0.0, 10.0);
	let right = bench.motor(4.0, 0.0, 10.0);
	let first = bench.gear();
	let second = bench.gear();
	bench.place(first, left);
	bench.place(second, right);

	assert_eq!(bench.base_pin(second), None);
	assert_eq!(bench.speed(first), 10.0);
	assert_eq!(bench.speed(second), 0.0);
	assert_eq!(bench.scene.active_gears(), 1);
}

#[test]
fn agreeing_motors_are_accepted() {
	let mut bench = Bench::new();
	let left = bench.motor(0.0, 0.0, 10.0);
	let right = bench.motor(4.0, 0.0, -10.0);
	let first = bench.gear();
	let second = bench.gear();
	bench.place(first, left);
	bench.place(second, right);

	assert_eq!(bench.base_pin(second), Some(right));
	assert_eq!(bench.speed(second), -10.0);
	assert_eq!(bench.scene.gear(second).unwrap().drive_gear(), Some(second));
}

#[test]
fn stopping_keeps_the_alternate_path() {
	let (mut bench, pins) = square();
	let gears = [bench.gear(), bench.gear(), bench.gear(), bench.gear()];
	for (gear, pin) in gears.into_iter().zip(pins) {
		bench.place(gear, pin);
	}
	assert_eq!(bench.scene.gear(gears[2]).unwrap().drive_gear(), Some(gears[1]));

	bench
		.controller
		.pointer_down(&mut bench.scene, gears[1], Vec2::new(4.0, 0.0));
	assert_eq!(bench.speed(gears[1]), 0.0);
	assert_eq!(bench.speed(gears[3]), -10.0);
	assert_eq!(bench.speed(gears[2]), 10.0);
	assert_eq!(bench.scene.gear(gears[2]).unwrap().drive_gear(), Some(gears[3]));
}

#[test]
fn cascading_stop() {
	let mut bench = Bench::new();
	let pins = [
		bench.motor(0.0, 0.0, 10.0),
		bench.pin(4.0, 0.0),
		bench.pin(8.0, 0.0),
	];
	let gears = [bench.gear(), bench.gear(), bench.gear()];
	for (gear, pin) in gears.into_iter().zip(pins) {
		bench.place(gear, pin);
	}
	assert_eq!(gears.map(|gear| bench.speed(gear)), [10.0, -10.0, 10.0]);

	bench.scene.stop_connected_gears(gears[0]);
	assert_eq!(gears.map(|gear| bench.speed(gear)), [10.0, 0.0, 0.0]);
	assert_eq!(bench.scene.gear(gears[2]).unwrap().drive_gear(), None);

	bench.scene.recalculate_movement();
	assert_eq!(gears.map(|gear| bench.speed(gear)), [10.0, -10.0, 10.0]);
}

#[test]
fn win_is_reported_once() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let pins = [
		bench.pin(4.0, 0.0),
		bench.pin(-4.0, 0.0),
		bench.pin(0.0, 4.0),
		bench.pin(0.0, -4.0),
	];
	let driver = bench.gear();
	let targets = [bench.target(), bench.target(), bench.target(), bench.target()];
	bench.scene.set_targets_to_win(3);
	bench.place(driver, motor);

	bench.place(targets[0], pins[0]);
	bench.place(targets[1], pins[1]);
	assert_eq!(bench.count(HostEvent::LevelSolved), 0);
	assert_eq!(bench.scene.targets_remaining(), 1);

	bench.place(targets[2], pins[2]);
	assert_eq!(bench.count(HostEvent::LevelSolved), 1);
	assert_eq!(bench.count(HostEvent::Sound(SfxCue::Victory)), 1);
	assert!(bench.scene.is_solved());

	bench.place(targets[3], pins[3]);
	assert_eq!(bench.scene.targets_remaining(), -1);
	assert_eq!(bench.count(HostEvent::LevelSolved), 1);

	bench
		.controller
		.pointer_down(&mut bench.scene, targets[0], Vec2::new(4.0, 0.0));
	bench
		.controller
		.pointer_move(&mut bench.scene, Vec2::new(50.0, 50.0));
	bench.controller.pointer_up(&mut bench.scene);
	bench.settle();
	assert_eq!(bench.scene.targets_remaining(), 0);
	bench.place(targets[0], pins[0]);
	assert_eq!(bench.count(HostEvent::LevelSolved), 1);
}

#[test]
fn target_speed_has_to_match() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let pin = bench.pin(4.0, 0.0);
	let driver = bench.gear();
	let home = bench.home();
	let target = bench.scene.add_gear(
		Gear::new(GearSettings::default(), home, 0)
			.with_target(5.0)
			.with_level_speeds(vec![2.0, 10.0]),
	);
	bench.scene.set_targets_to_win(1);
	bench.place(driver, motor);
	bench.place(target, pin);

	assert_eq!(bench.speed(target), -10.0);
	assert!(!bench.scene.gear(target).unwrap().is_moving());
	assert!(!bench.scene.is_solved());
	assert_eq!(bench.count(HostEvent::GearReachedLevel(target, 1)), 1);
}

#[test]
fn rejected_placement_leaves_no_trace() {
	let (mut bench, pins) = triangle();
	let gears = [bench.gear(), bench.gear(), bench.gear()];
	bench.place(gears[0], pins[0]);
	bench.place(gears[1], pins[1]);
	bench.scene.gear_mut(gears[2]).unwrap().set_angle(7.0);

	let snapshot = |scene: &GearScene<HostQueue>| {
		let gears = scene
			.gears()
			.map(|(_, gear)| {
				(
					gear.position,
					gear.angle,
					gear.layer,
					gear.base_pin(),
					gear.rotation_speed(),
					gear.drive_gear(),
				)
			})
			.collect::<Vec<_>>();
		let pins = scene
			.pins()
			.map(|(_, pin)| pin.nested_gear())
			.collect::<Vec<_>>();
		(scene.graph().clone(), gears, pins, scene.active_gears())
	};
	let before = snapshot(&bench.scene);

	bench.place(gears[2], pins[2]);
	assert_eq!(snapshot(&bench.scene), before);
	assert_eq!(bench.count(HostEvent::Sound(SfxCue::Drop)), 1);
	assert_eq!(bench.count(HostEvent::Sound(SfxCue::Slide)), 1);
	assert_eq!(bench.count(HostEvent::Sound(SfxCue::Install)), 2);
}

#[test]
fn interrupted_placement_is_dropped() {
	let mut bench = Bench::new();
	let pin = bench.pin(4.0, 0.0);
	let gear = bench.gear();
	let home = bench.scene.gear(gear).unwrap().home_position;

	bench.controller.apply_gear(&mut bench.scene, gear, Some(pin));
	bench.controller.tick(&mut bench.scene, 0.1);
	assert_eq!(
		bench.controller.state(),
		InteractionState::Placing { gear, pin }
	);

	let grabbed_at = bench.scene.gear(gear).unwrap().position;
	assert!(bench.controller.pointer_down(&mut bench.scene, gear, grabbed_at));
	assert!(bench.controller.tasks().is_empty());
	bench
		.controller
		.pointer_move(&mut bench.scene, Vec2::new(100.0, 100.0));
	bench.controller.pointer_up(&mut bench.scene);
	bench.settle();

	assert_eq!(bench.controller.state(), InteractionState::Idle);
	assert_eq!(bench.base_pin(gear), None);
	assert_eq!(bench.scene.pin(pin).unwrap().nested_gear(), None);
	assert_eq!(bench.scene.gear(gear).unwrap().position, home);
}

#[test]
fn carrier_leaving_sends_the_arriving_gear_home() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let carrier = bench.gear();
	let nested_pin = bench.scene.add_nested_pin(carrier).unwrap();
	let rider = bench.gear();
	let rider_home = bench.scene.gear(rider).unwrap().home_position;
	bench.place(carrier, motor);

	bench
		.controller
		.apply_gear(&mut bench.scene, rider, Some(nested_pin));
	bench.controller.tick(&mut bench.scene, 0.1);
	assert!(bench
		.controller
		.pointer_down(&mut bench.scene, carrier, Vec2::ZERO));
	assert!(!bench
		.controller
		.tasks()
		.iter()
		.any(|task| task.kind == MotionKind::Place(nested_pin)));
	bench
		.controller
		.pointer_move(&mut bench.scene, Vec2::new(20.0, 0.0));
	bench.controller.pointer_up(&mut bench.scene);
	bench.settle();

	assert_eq!(bench.base_pin(rider), None);
	assert_eq!(bench.scene.pin(nested_pin).unwrap().nested_gear(), None);
	assert!(bench.scene.graph().neighbors(rider).is_empty());
	let rider_gear = bench.scene.gear(rider).unwrap();
	assert_eq!(rider_gear.position, rider_home);
	assert_eq!(rider_gear.layer, 0);
}

#[test]
fn pin_blocked_during_the_slide_is_refused() {
	let mut bench = Bench::new();
	let near = bench.pin(4.0, 0.0);
	let next = bench.pin(7.0, 0.0);
	let late = bench.gear();
	let early = bench.gear();
	let late_home = bench.scene.gear(late).unwrap().home_position;

	bench
		.controller
		.apply_gear(&mut bench.scene, early, Some(next));
	bench.controller.tick(&mut bench.scene, 0.5);
	assert!(bench.scene.fits(late, near));
	bench
		.controller
		.apply_gear(&mut bench.scene, late, Some(near));
	bench.controller.tick(&mut bench.scene, 1.0);
	assert_eq!(bench.base_pin(early), Some(next));
	assert!(!bench.scene.fits(late, near));

	bench.settle();
	assert_eq!(bench.base_pin(late), None);
	assert_eq!(bench.scene.pin(near).unwrap().nested_gear(), None);
	assert!(bench.scene.graph().neighbors(late).is_empty());
	assert_eq!(bench.scene.gear(late).unwrap().position, late_home);
}

#[test]
fn second_gear_on_a_taken_pin_goes_home() {
	let mut bench = Bench::new();
	let pin = bench.pin(4.0, 0.0);
	let first = bench.gear();
	let second = bench.gear();
	let home = bench.scene.gear(second).unwrap().home_position;

	bench.controller.apply_gear(&mut bench.scene, first, Some(pin));
	bench.controller.apply_gear(&mut bench.scene, second, Some(pin));
	bench.settle();

	assert_eq!(bench.scene.pin(pin).unwrap().nested_gear(), Some(first));
	assert_eq!(bench.base_pin(second), None);
	assert_eq!(bench.scene.gear(second).unwrap().position, home);
}

#[test]
fn dropping_onto_a_pin() {
	let mut bench = Bench::new();
	let pin = bench.pin(4.0, 0.0);
	let gear = bench.gear();
	let start = bench.scene.gear(gear).unwrap().position;

	assert!(bench.controller.pointer_down(&mut bench.scene, gear, start));
	assert_eq!(bench.scene.pin(pin).unwrap().outline, PinOutline::Allowed);
	assert_eq!(bench.scene.gear(gear).unwrap().layer, DRAG_LAYER);
	bench
		.controller
		.pointer_move(&mut bench.scene, Vec2::new(4.5, 0.5));
	assert_eq!(bench.scene.pin_under(gear), Some(pin));
	bench.controller.pointer_up(&mut bench.scene);
	assert_eq!(bench.scene.pin(pin).unwrap().outline, PinOutline::Hidden);
	bench.settle();

	assert_eq!(bench.base_pin(gear), Some(pin));
	assert_eq!(bench.scene.gear(gear).unwrap().position, Vec2::new(4.0, 0.0));
	assert_eq!(bench.scene.gear(gear).unwrap().layer, 0);
}

#[test]
fn fixed_gears_cannot_be_picked_up() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let home = bench.home();
	let gear = bench
		.scene
		.add_gear(Gear::new(GearSettings::default(), home, 0).fixed());
	bench.place(gear, motor);

	assert!(!bench.controller.pointer_down(&mut bench.scene, gear, Vec2::ZERO));
	assert_eq!(bench.speed(gear), 10.0);
	assert_eq!(bench.controller.state(), InteractionState::Idle);
}

#[test]
fn pointer_finds_the_topmost_draggable_gear() {
	let mut bench = Bench::new();
	bench
		.scene
		.add_gear(Gear::new(GearSettings::default(), Vec2::ZERO, 0).fixed());
	let low = bench
		.scene
		.add_gear(Gear::new(GearSettings::default(), Vec2::new(0.5, 0.0), 0));
	let high = bench
		.scene
		.add_gear(Gear::new(GearSettings::default(), Vec2::new(0.0, 0.5), 2));

	assert_eq!(bench.scene.gear_at(Vec2::new(0.2, 0.2)), Some(high));
	assert_eq!(bench.scene.gear_at(Vec2::new(1.8, 0.0)), Some(low));
	assert_eq!(bench.scene.gear_at(Vec2::new(-1.4, -0.3)), None);
	assert_eq!(bench.scene.gear_at(Vec2::new(10.0, 10.0)), None);
}

#[test]
fn fixed_gears_are_mounted_on_level_start() {
	let mut bench = Bench::new();
	let motor = bench.motor(0.0, 0.0, 10.0);
	let pin = bench.pin(4.0, 0.0);
	let driver = bench
		.scene
		.add_gear(Gear::new(GearSettings::default(), Vec2::ZERO, 0).fixed());
	let target = bench.scene.add_gear(
		Gear::new(GearSettings::default(), Vec2::new(4.0, 0.0), 0)
			.fixed()
			.with_target(0.0),
	);
	bench.scene.set_targets_to_win(1);

	bench.controller.start_level(&mut bench.scene);
	assert_eq!(bench.base_pin(driver), Some(motor));
	assert_eq!(bench.base_pin(target), Some(pin));
	assert_eq!(bench.speed(target), -10.0);
	assert!(bench.scene.is_solved());
	assert_eq!(bench.count(HostEvent::Sound(SfxCue::LevelStart)), 1);
	assert_eq!(bench.count(HostEvent::Sound(SfxCue::Install)), 0);
}

#[test]
fn hum_follows_active_gears() {
	let mut bench = Bench::new();
	let pins = [
		bench.motor(0.0, 0.0, 10.0),
		bench.pin(4.0, 0.0),
		bench.pin(8.0, 0.0),
		bench.pin(12.0, 0.0),
	];
	let gears = [bench.gear(), bench.gear(), bench.gear(), bench.gear()];
	for (gear, pin) in gears.into_iter().zip(pins) {
		bench.place(gear, pin);
	}
	assert_eq!(bench.scene.hum_level(), 3);

	bench
		.controller
		.pointer_down(&mut bench.scene, gears[0], Vec2::ZERO);
	assert_eq!(bench.scene.active_gears(), 0);
	assert_eq!(bench.scene.hum_level(), 0);

	let levels = bench
		.events()
		.iter()
		.filter_map(|event| match event {
			HostEvent::HumLevel(level) => Some(*level),
			_ => None,
		})
		.collect::<Vec<_>>();
	assert_eq!(levels, [1, 2, 3, 2, 1, 0]);
}

#[test]
fn type_mismatch_does_not_fit() {
	let mut bench = Bench::new();
	let left = bench.pin(0.0, 0.0);
	let right = bench.pin(4.0, 0.0);
	let first = bench.gear();
	let second = bench.gear_with(GearSettings {
		gear_type: GearType::ModuleB,
		..GearSettings::default()
	});
	bench.place(first, left);

	assert!(bench.scene.fits_by_size(second, right));
	assert!(!bench.scene.fits_by_type(second, right));
	bench.place(second, right);
	assert_eq!(bench.base_pin(second), None);
}

#[test]
fn crowded_pin_does_not_fit() {
	let mut bench = Bench::new();
	let left = bench.pin(0.0, 0.0);
	let right = bench.pin(3.0, 0.0);
	let first = bench.gear();
	let second = bench.gear();
	bench.place(first, left);

	assert!(!bench.scene.fits_by_size(second, right));
	bench.scene.show_pin_outlines(second);
	assert_eq!(bench.scene.pin(right).unwrap().outline, PinOutline::Denied);
	assert_eq!(bench.scene.pin(left).unwrap().outline, PinOutline::Hidden);
}

#[test]
fn gamepad_selection() {
	let mut bench = Bench::new();
	let center = bench.pin(0.0, -36.0);
	let right = bench.pin(4.0, -36.0);
	let left = bench.pin(-4.0, -36.0);
	let gear = bench.gear();
	let home = bench.scene.gear(gear).unwrap().home_position;

	bench.controller.enable_gamepad(&mut bench.scene);
	assert_eq!(bench.controller.selected_gear(), Some(gear));
	assert_eq!(bench.controller.selected_pin(), Some(center));
	assert_eq!(bench.scene.pin(center).unwrap().outline, PinOutline::Allowed);

	bench
		.controller
		.gamepad_direction(&mut bench.scene, Vec2::X);
	assert_eq!(bench.controller.selected_pin(), Some(right));
	assert_eq!(bench.scene.pin(center).unwrap().outline, PinOutline::Hidden);
	bench
		.controller
		.gamepad_direction(&mut bench.scene, Vec2::NEG_X);
	assert_eq!(bench.controller.selected_pin(), Some(center));
	bench
		.controller
		.gamepad_direction(&mut bench.scene, Vec2::NEG_X);
	assert_eq!(bench.controller.selected_pin(), Some(left));

	bench.controller.gamepad_select(&mut bench.scene);
	assert_eq!(
		bench.controller.state(),
		InteractionState::Placing { gear, pin: left }
	);
	bench.settle();
	assert_eq!(bench.base_pin(gear), Some(left));
	assert_eq!(
		bench.controller.state(),
		InteractionState::GamepadSelectingGear { gear: Some(gear) }
	);

	bench.controller.gamepad_to_inventory(&mut bench.scene);
	bench.settle();
	assert_eq!(bench.base_pin(gear), None);
	assert_eq!(bench.scene.gear(gear).unwrap().position, home);
}

#[test]
fn gamepad_back_leaves_pin_selection() {
	let mut bench = Bench::new();
	let pin = bench.pin(0.0, -36.0);
	let gear = bench.gear();

	bench.controller.enable_gamepad(&mut bench.scene);
	bench.controller.gamepad_back(&mut bench.scene);
	assert_eq!(
		bench.controller.state(),
		InteractionState::GamepadSelectingGear { gear: Some(gear) }
	);
	assert_eq!(bench.scene.pin(pin).unwrap().outline, PinOutline::Hidden);

	bench.controller.gamepad_select(&mut bench.scene);
	assert_eq!(bench.controller.selected_pin(), Some(pin));
}
