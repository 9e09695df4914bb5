use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// State word reported when the battery status could not be read or parsed.
pub const ACPI_FAILURE: &str = "(acpi failure)";

const FALLBACK_PERCENT: u32 = 5;

static ACPI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^Battery 0:\s+([^,]+), (\d+)%").expect("acpi pattern must compile")
});

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusReading {
	pub state: String,
	pub percent: u32,
}
impl StatusReading {
	#[must_use]
	pub fn new(state: impl Into<String>, percent: u32) -> Self {
		Self { state: state.into(), percent }
	}

	/// Reading used whenever the source fails or its output is unrecognized.
	#[must_use]
	pub fn fallback() -> Self {
		Self::new(ACPI_FAILURE, FALLBACK_PERCENT)
	}

	#[must_use]
	pub fn is_failure(&self) -> bool {
		self.state == ACPI_FAILURE
	}

	#[must_use]
	pub fn tooltip(&self) -> String {
		format!("Battery 0 State: {}, {}%", self.state, self.percent)
	}
}

#[derive(Debug, Error)]
pub enum StatusError {
	#[error("failed to run `{program}`: {source}")]
	Spawn {
		program: String,
		#[source]
		source: std::io::Error,
	},

	#[error("`{program}` exited with {status}")]
	ExitStatus { program: String, status: std::process::ExitStatus },

	#[error("`{program}` produced non-UTF-8 output")]
	NotUtf8 { program: String },
}

/// Where raw battery status text comes from.
pub trait StatusSource {
	fn read_output(&mut self) -> Result<String, StatusError>;
}

/// Runs an external command (`acpi` by default) and captures its standard output.
#[derive(Clone, Debug)]
pub struct CommandSource {
	program: String,
	args: Vec<String>,
}
impl CommandSource {
	#[must_use]
	pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
		Self { program: program.into(), args }
	}

	#[must_use]
	pub fn acpi() -> Self {
		Self::new("acpi", Vec::new())
	}

	#[must_use]
	pub fn program(&self) -> &str {
		&self.program
	}
}

impl Default for CommandSource {
	fn default() -> Self {
		Self::acpi()
	}
}

impl StatusSource for CommandSource {
	fn read_output(&mut self) -> Result<String, StatusError> {
		let output = Command::new(&self.program).args(&self.args).output().map_err(|source| {
			StatusError::Spawn { program: self.program.clone(), source }
		})?;

		if !output.status.success() {
			return Err(StatusError::ExitStatus {
				program: self.program.clone(),
				status: output.status,
			});
		}

		let text = String::from_utf8(output.stdout)
			.map_err(|_| StatusError::NotUtf8 { program: self.program.clone() })?;

		Ok(text.trim_end().to_owned())
	}
}

/// Returns the same text on every read instead of running a command.
#[derive(Clone, Debug)]
pub struct FixedSource(pub String);
impl FixedSource {
	#[must_use]
	pub fn new(text: impl Into<String>) -> Self {
		Self(text.into())
	}
}

impl StatusSource for FixedSource {
	fn read_output(&mut self) -> Result<String, StatusError> {
		Ok(self.0.clone())
	}
}

/// Extracts the state word and percent from `Battery 0: <state>, <percent>%`.
#[must_use]
pub fn parse_status(text: &str) -> Option<StatusReading> {
	let captures = ACPI_PATTERN.captures(text)?;
	let state = captures.get(1)?.as_str();
	let percent = captures.get(2)?.as_str().parse::<u32>().ok()?;

	Some(StatusReading::new(state, percent))
}

pub fn read_status(source: &mut dyn StatusSource) -> StatusReading {
	let text = match source.read_output() {
		Ok(text) => text,
		Err(err) => {
			tracing::warn!(error = %err, "Battery status source failed.");

			return StatusReading::fallback();
		},
	};

	tracing::debug!(output = %text, "Battery status output.");

	match parse_status(&text) {
		Some(reading) => reading,
		None => {
			tracing::warn!(output = %text, "Unrecognized battery status output.");

			StatusReading::fallback()
		},
	}
}
