// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

use bevy::ecs::error::{warn, GLOBAL_ERROR_HANDLER};
use bevy::prelude::*;
use gear_train_puzzle::{report::run_level_report, AppPlugin};

fn start_game() -> AppExit {
	// Configure the ECS error handler to not explode, hopefully.
	if GLOBAL_ERROR_HANDLER.set(warn).is_err() {
		eprintln!("The error handler has already been set.");
	}

	App::new().add_plugins(AppPlugin).run()
}

fn report_level(level_file: &str) -> AppExit {
	let result = std::fs::read_to_string(level_file)
		.map_err(|e| format!("Could not open {level_file}: {e}"))
		.and_then(|source| run_level_report(&source, &mut std::io::stdout().lock()));
	match result {
		Ok(()) => AppExit::Success,
		Err(err) => {
			eprintln!("{err}");
			AppExit::error()
		}
	}
}

fn main() -> AppExit {
	let argv = std::env::args().collect::<Vec<_>>();
	match &argv[..] {
		[] | [_] => start_game(),
		[_, level_file] => report_level(level_file),
		_ => {
			eprintln!("Too many arguments. Run without arguments to launch the game, or supply a path to a level file to print how its fixed gears turn.");
			AppExit::error()
		}
	}
}
