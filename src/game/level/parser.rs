//! Turning level file statements into [`LevelData`]

use std::collections::HashMap;

use bevy::math::Vec2;

use super::{
	lex::{self, LexError, RawActionStatement, RawStatement},
	GearDef, LevelData, PinDef,
};
use crate::game::gears::{GearSettings, GearType};

/// Gear dimensions available to every level
fn builtin_presets() -> HashMap<String, GearSettings> {
	let small = GearSettings::default();
	let medium = GearSettings {
		teeth: 18,
		gear_radius: 2.2875,
		tip_radius: 3.0375,
		..small
	};
	let large = GearSettings {
		teeth: 24,
		gear_radius: 3.05,
		tip_radius: 3.8,
		..small
	};
	HashMap::from([
		("small".to_owned(), small),
		("medium".to_owned(), medium),
		("large".to_owned(), large),
	])
}

pub fn parse(
	level_file: &str,
	mut warning_handler: impl FnMut(LevelParsingWarning),
) -> Result<LevelData, LevelParsingError> {
	let mut parser = Parser {
		data: LevelData::default(),
		presets: builtin_presets(),
		used_presets: Vec::new(),
	};

	for line in lex::parse(level_file) {
		let (line_number, statement) = line?;
		parser
			.statement(statement, &mut warning_handler)
			.map_err(|code| code.at_line(line_number))?;
	}

	let Parser {
		data,
		presets,
		used_presets,
	} = parser;
	let builtin = builtin_presets();
	for name in presets.keys() {
		if !builtin.contains_key(name) && !used_presets.contains(name) {
			warning_handler(LevelParsingWarning::UnusedPreset(name.clone()));
		}
	}
	if data.name.is_none() {
		warning_handler(LevelParsingWarning::LevelNameNotSet);
	}
	Ok(data)
}

struct Parser {
	data: LevelData,
	presets: HashMap<String, GearSettings>,
	used_presets: Vec<String>,
}

impl Parser {
	fn statement(
		&mut self,
		statement: RawStatement,
		warning_handler: &mut impl FnMut(LevelParsingWarning),
	) -> Result<(), ParsingErrorCode> {
		match statement {
			RawStatement::Assignment(assignment) => match assignment.key {
				"name" => self.data.name = Some(assignment.value.to_owned()),
				"hint" => self.data.hint = Some(assignment.value.to_owned()),
				"targets" => self.data.targets_to_win = Some(parse_number(assignment.value)?),
				other => return Err(ParsingErrorCode::UnknownAssignmentKey(other.to_owned())),
			},
			RawStatement::Action(action) => match action.verb {
				"SETTINGS" => self.settings(action)?,
				"PIN" => self.pin(action)?,
				"GEAR" => self.gear(action)?,
				"LEVELS" => self.levels(action, warning_handler)?,
				other => return Err(ParsingErrorCode::UnknownVerb(other.to_owned())),
			},
		}
		Ok(())
	}

	/// `SETTINGS[A|B] preset teeth gear_radius tip_radius pin_radius`
	fn settings(&mut self, action: RawActionStatement) -> Result<(), ParsingErrorCode> {
		let mut gear_type = GearType::ModuleA;
		for modifier in &action.modifiers {
			match *modifier {
				"A" => gear_type = GearType::ModuleA,
				"B" => gear_type = GearType::ModuleB,
				other => return Err(ParsingErrorCode::UnknownModifier(other.to_owned())),
			}
		}
		let [name, teeth, gear_radius, tip_radius, pin_radius] = action.values[..] else {
			return Err(ParsingErrorCode::BadArgumentCount("SETTINGS"));
		};
		if self.presets.contains_key(name) {
			return Err(ParsingErrorCode::DuplicateIdentifier(name.to_owned()));
		}
		let settings = GearSettings {
			gear_type,
			teeth: parse_number(teeth)?,
			gear_radius: parse_number(gear_radius)?,
			tip_radius: parse_number(tip_radius)?,
			pin_radius: parse_number(pin_radius)?,
		};
		self.presets.insert(name.to_owned(), settings);
		Ok(())
	}

	/// `PIN[BASE] id x y layer [speed]`
	fn pin(&mut self, action: RawActionStatement) -> Result<(), ParsingErrorCode> {
		let mut is_base = false;
		for modifier in &action.modifiers {
			match *modifier {
				"BASE" => is_base = true,
				other => return Err(ParsingErrorCode::UnknownModifier(other.to_owned())),
			}
		}
		let (id, x, y, layer, speed) = match action.values[..] {
			[id, x, y, layer] => (id, x, y, layer, None),
			[id, x, y, layer, speed] => (id, x, y, layer, Some(speed)),
			_ => return Err(ParsingErrorCode::BadArgumentCount("PIN")),
		};
		if self.data.pins.iter().any(|pin| pin.id == id) {
			return Err(ParsingErrorCode::DuplicateIdentifier(id.to_owned()));
		}
		self.data.pins.push(PinDef {
			id: id.to_owned(),
			position: Vec2::new(parse_number(x)?, parse_number(y)?),
			layer: parse_number(layer)?,
			rotation_speed: speed.map(parse_number).transpose()?.unwrap_or(0.0),
			is_base,
		});
		Ok(())
	}

	/// `GEAR[FIXED:TARGET:NESTED] id preset x y layer [target_speed]`
	fn gear(&mut self, action: RawActionStatement) -> Result<(), ParsingErrorCode> {
		let (mut fixed, mut target, mut nested) = (false, false, false);
		for modifier in &action.modifiers {
			match *modifier {
				"FIXED" => fixed = true,
				"TARGET" => target = true,
				"NESTED" => nested = true,
				other => return Err(ParsingErrorCode::UnknownModifier(other.to_owned())),
			}
		}
		let (id, preset, x, y, layer, target_speed) = match action.values[..] {
			[id, preset, x, y, layer] => (id, preset, x, y, layer, None),
			[id, preset, x, y, layer, speed] if target => (id, preset, x, y, layer, Some(speed)),
			_ => return Err(ParsingErrorCode::BadArgumentCount("GEAR")),
		};
		if self.data.gears.iter().any(|gear| gear.id == id) {
			return Err(ParsingErrorCode::DuplicateIdentifier(id.to_owned()));
		}
		let settings = *self
			.presets
			.get(preset)
			.ok_or_else(|| ParsingErrorCode::UnknownPreset(preset.to_owned()))?;
		if !self.used_presets.iter().any(|used| used == preset) {
			self.used_presets.push(preset.to_owned());
		}
		let target_speed = match target_speed {
			Some(speed) => Some(parse_number(speed)?),
			None if target => Some(0.0),
			None => None,
		};
		self.data.gears.push(GearDef {
			id: id.to_owned(),
			settings,
			position: Vec2::new(parse_number(x)?, parse_number(y)?),
			layer: parse_number(layer)?,
			draggable: !fixed,
			target_speed,
			nested_pin: nested,
			level_speeds: Vec::new(),
		});
		Ok(())
	}

	/// `LEVELS gear speed...`
	fn levels(
		&mut self,
		action: RawActionStatement,
		warning_handler: &mut impl FnMut(LevelParsingWarning),
	) -> Result<(), ParsingErrorCode> {
		if let Some(modifier) = action.modifiers.first() {
			return Err(ParsingErrorCode::UnknownModifier((*modifier).to_owned()));
		}
		let [id, ref speeds @ ..] = action.values[..] else {
			return Err(ParsingErrorCode::BadArgumentCount("LEVELS"));
		};
		if speeds.is_empty() {
			return Err(ParsingErrorCode::BadArgumentCount("LEVELS"));
		}
		let speeds = speeds
			.iter()
			.map(|speed| parse_number(speed))
			.collect::<Result<Vec<f32>, _>>()?;
		let gear = self
			.data
			.gears
			.iter_mut()
			.find(|gear| gear.id == id)
			.ok_or_else(|| ParsingErrorCode::UnknownGear(id.to_owned()))?;
		if !gear.level_speeds.is_empty() {
			warning_handler(LevelParsingWarning::LevelSpeedsReplaced(id.to_owned()));
		}
		gear.level_speeds = speeds;
		Ok(())
	}
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, ParsingErrorCode> {
	value
		.parse()
		.map_err(|_| ParsingErrorCode::InvalidNumber(value.to_owned()))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsingErrorCode {
	UnknownVerb(String),
	UnknownModifier(String),
	UnknownAssignmentKey(String),
	BadArgumentCount(&'static str),
	InvalidNumber(String),
	UnknownPreset(String),
	UnknownGear(String),
	DuplicateIdentifier(String),
}

impl ParsingErrorCode {
	pub fn at_line(self, line_number: usize) -> LevelParsingError {
		LevelParsingError::Statement {
			code: self,
			line_number,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelParsingError {
	Lex(LexError),
	Statement {
		code: ParsingErrorCode,
		/// Zero-based
		line_number: usize,
	},
}

impl From<LexError> for LevelParsingError {
	fn from(value: LexError) -> Self {
		Self::Lex(value)
	}
}

impl std::error::Error for LevelParsingError {}

impl std::fmt::Display for ParsingErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownVerb(verb) => write!(f, "unknown statement {verb}"),
			Self::UnknownModifier(modifier) => write!(f, "unknown modifier {modifier}"),
			Self::UnknownAssignmentKey(key) => write!(f, "cannot assign to unknown key {key}"),
			Self::BadArgumentCount(verb) => write!(f, "wrong number of arguments for {verb}"),
			Self::InvalidNumber(value) => write!(f, "{value} is not a valid number"),
			Self::UnknownPreset(name) => write!(f, "gear settings {name} are not defined"),
			Self::UnknownGear(id) => write!(f, "gear {id} is not defined"),
			Self::DuplicateIdentifier(id) => write!(f, "{id} is already defined"),
		}
	}
}

impl std::fmt::Display for LevelParsingError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Lex(e) => e.fmt(f),
			Self::Statement { code, line_number } => write!(f, "line {}: {code}", line_number + 1),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelParsingWarning {
	/// Level name has not been set
	LevelNameNotSet,
	/// Intermediate speeds of a gear were given more than once
	LevelSpeedsReplaced(String),
	/// Gear settings were declared but no gear uses them
	UnusedPreset(String),
}

impl std::error::Error for LevelParsingWarning {}

impl std::fmt::Display for LevelParsingWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::LevelNameNotSet => f.write_str("no level name has been set"),
			Self::LevelSpeedsReplaced(id) => {
				write!(f, "intermediate speeds of gear {id} are declared more than once")
			}
			Self::UnusedPreset(name) => write!(f, "gear settings {name} are never used"),
		}
	}
}
