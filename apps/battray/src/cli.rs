use std::path::PathBuf;

use battray_core::{FixedSource, StatusSource};
use clap::Parser;

use crate::settings::AppSettings;

#[derive(Debug, Parser)]
#[command(
	version,
	about = "Battery charge tray icon",
	long_about = "Shows battery charge and charging state from `acpi` in the system tray"
)]
pub struct Cli {
	/// Print the current battery status line and exit.
	#[arg(long)]
	pub once: bool,
	/// Render the current icon to a PNG file and exit.
	#[arg(long, value_name = "PATH")]
	pub dump_png: Option<PathBuf>,
	/// Use this text instead of running the status command.
	#[arg(long, value_name = "TEXT")]
	pub status_text: Option<String>,
	/// Status command to run instead of the configured one.
	#[arg(long, value_name = "CMD")]
	pub command: Option<String>,
	/// Seconds between refreshes.
	#[arg(long, value_name = "SECS")]
	pub interval: Option<u64>,
	/// Write the effective settings to the config file and exit.
	#[arg(long)]
	pub init_config: bool,
}
impl Cli {
	/// Applies command-line overrides on top of the loaded settings.
	#[must_use]
	pub fn apply(&self, mut settings: AppSettings) -> AppSettings {
		if let Some(command) = &self.command {
			settings.command = command.clone();
			settings.args.clear();
		}
		if let Some(interval) = self.interval {
			settings.update_interval_secs = interval;
		}

		settings.sanitize()
	}

	#[must_use]
	pub fn status_source(&self, settings: &AppSettings) -> Box<dyn StatusSource> {
		match &self.status_text {
			Some(text) => Box::new(FixedSource::new(text.clone())),
			None => Box::new(settings.command_source()),
		}
	}
}
