//! Plain text overview of how a level behaves before the player touches it

use crate::game::{
	gears::{GearScene, HostQueue, InteractionController},
	level::{parser::parse, ValidLevelData},
};
use std::io::Write;

pub fn run_level_report(level_source: &str, output: &mut impl Write) -> Result<(), String> {
	let mut warnings = Vec::new();
	let level = parse(level_source, |w| warnings.push(w))
		.map_err(|e| format!("Could not parse level: {e}"))?;
	let level = ValidLevelData::try_from(level).map_err(|e| format!("Level is not valid: {e}"))?;
	let mut scene = GearScene::load_level(Some(&level), HostQueue::default())
		.map_err(|e| format!("Could not build level: {e}"))?;
	InteractionController::new().start_level(&mut scene);

	write_report(&level, &scene, &warnings, output)
		.map_err(|e| format!("Could not write the report: {e}"))
}

fn write_report(
	level: &ValidLevelData,
	scene: &GearScene<HostQueue>,
	warnings: &[impl std::fmt::Display],
	output: &mut impl Write,
) -> std::io::Result<()> {
	for warning in warnings {
		writeln!(output, "# warning: {warning}")?;
	}
	if let Some(name) = &level.name {
		writeln!(output, "# {name}")?;
	}
	for (def, (id, gear)) in level.gears.iter().zip(scene.gears()) {
		let driver = match gear.drive_gear() {
			None => "-",
			Some(driver) if driver == id => "motor",
			Some(driver) => level
				.gears
				.get(driver.index())
				.map_or("?", |driver| driver.id.as_str()),
		};
		writeln!(
			output,
			"{}\tteeth={}\tspeed={}\tdriver={}",
			def.id,
			gear.settings.teeth,
			gear.rotation_speed(),
			driver
		)?;
	}
	writeln!(
		output,
		"# targets remaining: {}, solved: {}",
		scene.targets_remaining(),
		scene.is_solved()
	)
}
