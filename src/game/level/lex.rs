//! Splitting of level files into statements

use regex::Regex;

/// Line in the form `VERB[MODIFIER:MODIFIER] values...`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawActionStatement<'a> {
	pub verb: &'a str,
	pub modifiers: Vec<&'a str>,
	pub values: Vec<&'a str>,
}

/// Line in the form `key=value`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawAssignmentStatement<'a> {
	pub key: &'a str,
	pub value: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawStatement<'a> {
	Action(RawActionStatement<'a>),
	Assignment(RawAssignmentStatement<'a>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorCode {
	/// A line contains non-ascii characters
	NonAsciiLine,
	/// A line does not match either statement pattern
	MalformedStatement,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
	pub code: LexErrorCode,
	/// Zero-based
	pub line_number: usize,
}

/// Splits a level file into statements along with their zero-based line numbers.
/// Empty lines and lines starting with `#` are skipped.
pub fn parse(raw_data: &str) -> impl Iterator<Item = Result<(usize, RawStatement), LexError>> {
	let assignment_regex = Regex::new(r"^(?<KEY>[a-zA-Z0-9_]+)\s*=\s*(?<VALUE>.*)$")
		.expect("I expected to be able to write a valid regex.");
	let action_regex = Regex::new(r"^(?<VERB>[A-Z_]+)(\[(?<MODIFIER>[\w\:]+)\])?(?<VALUES>\s.+)?$")
		.expect("I expected to be able to write a valid regex.");

	raw_data
		.lines()
		.map(str::trim)
		.enumerate()
		.filter(|(_, line)| !(line.starts_with('#') || line.is_empty()))
		.map(move |(i, line)| {
			if !line.is_ascii() {
				Err(LexErrorCode::NonAsciiLine.at_line(i))
			} else if let Some(captures) = assignment_regex.captures(line) {
				let key = captures
					.name("KEY")
					.expect("KEY clause should always be present")
					.as_str();
				let value = captures
					.name("VALUE")
					.expect("VALUE clause should always be present")
					.as_str()
					.trim_end();
				Ok((
					i,
					RawStatement::Assignment(RawAssignmentStatement { key, value }),
				))
			} else if let Some(captures) = action_regex.captures(line) {
				let verb = captures
					.name("VERB")
					.expect("VERB clause should always be present")
					.as_str();
				let modifiers = captures
					.name("MODIFIER")
					.map(|m| m.as_str().split(':').filter(|m| !m.is_empty()).collect())
					.unwrap_or_default();
				let values = captures
					.name("VALUES")
					.map(|m| m.as_str().split_ascii_whitespace().collect())
					.unwrap_or_default();
				Ok((
					i,
					RawStatement::Action(RawActionStatement {
						verb,
						modifiers,
						values,
					}),
				))
			} else {
				Err(LexErrorCode::MalformedStatement.at_line(i))
			}
		})
}

impl LexErrorCode {
	pub fn at_line(self, line_number: usize) -> LexError {
		LexError {
			code: self,
			line_number,
		}
	}
}

impl std::error::Error for LexError {}

impl std::fmt::Display for LexErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::NonAsciiLine => f.write_str("non-ascii characters found"),
			Self::MalformedStatement => f.write_str("line is neither an action nor an assignment"),
		}
	}
}

impl std::fmt::Display for LexError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "line {}: {}", self.line_number + 1, self.code)
	}
}
