use std::fs;
use std::io::{self};
use std::path::{Path, PathBuf};
use std::time::Duration;

use battray_core::{CommandSource, DEFAULT_INTERVAL, MAX_INTERVAL};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const MIN_UPDATE_INTERVAL_SECS: u64 = 1;
const MAX_UPDATE_INTERVAL_SECS: u64 = MAX_INTERVAL.as_secs();

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
	#[serde(default = "default_update_interval_secs")]
	pub update_interval_secs: u64,
	#[serde(default = "default_command")]
	pub command: String,
	#[serde(default)]
	pub args: Vec<String>,
}
impl AppSettings {
	#[must_use]
	pub fn load() -> Self {
		let Some(path) = Self::path() else {
			return Self::default();
		};

		Self::load_from(&path)
	}

	#[must_use]
	pub fn load_from(path: &Path) -> Self {
		let text = match fs::read_to_string(path) {
			Ok(text) => text,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Self::default(),
			Err(err) => {
				tracing::warn!(error = %err, path = %path.display(), "Failed to read settings.");

				return Self::default();
			},
		};

		match Self::from_toml_str(&text) {
			Ok(settings) => settings,
			Err(err) => {
				tracing::warn!(
					error = %err,
					path = %path.display(),
					"Invalid settings; using defaults."
				);

				Self::default()
			},
		}
	}

	pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
		let settings: Self = toml::from_str(text)?;

		Ok(settings.sanitize())
	}

	pub fn save(&self) -> io::Result<PathBuf> {
		let Some(path) = Self::path() else {
			return Err(io::Error::new(
				io::ErrorKind::NotFound,
				"no configuration directory for this platform",
			));
		};

		self.save_to(&path)?;

		Ok(path)
	}

	pub fn save_to(&self, path: &Path) -> io::Result<()> {
		if let Some(dir) = path.parent() {
			fs::create_dir_all(dir)?;
		}

		let text = toml::to_string_pretty(self)
			.map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

		write_atomic(path, text.as_bytes())
	}

	#[must_use]
	pub fn path() -> Option<PathBuf> {
		let dirs = ProjectDirs::from("ink", "hack", "battray")?;

		Some(dirs.config_dir().join("settings.toml"))
	}

	#[must_use]
	pub fn update_interval(&self) -> Duration {
		Duration::from_secs(self.update_interval_secs)
	}

	#[must_use]
	pub fn command_source(&self) -> CommandSource {
		CommandSource::new(self.command.clone(), self.args.clone())
	}

	#[must_use]
	pub fn sanitize(mut self) -> Self {
		self.update_interval_secs =
			self.update_interval_secs.clamp(MIN_UPDATE_INTERVAL_SECS, MAX_UPDATE_INTERVAL_SECS);

		if self.command.trim().is_empty() {
			self.command = default_command();
		}

		self
	}
}

impl Default for AppSettings {
	fn default() -> Self {
		Self {
			update_interval_secs: default_update_interval_secs(),
			command: default_command(),
			args: Vec::new(),
		}
	}
}

fn default_update_interval_secs() -> u64 {
	DEFAULT_INTERVAL.as_secs()
}

fn default_command() -> String {
	String::from("acpi")
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
	let tmp = path.with_extension("toml.tmp");

	fs::write(&tmp, bytes)?;
	fs::rename(&tmp, path)?;

	Ok(())
}
