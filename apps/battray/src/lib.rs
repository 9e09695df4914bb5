pub mod app;
pub mod cli;
pub mod icon;
pub mod settings;

use std::fs;
use std::time::Instant;

use battray_core::RefreshCycle;
use color_eyre::eyre::{Result, WrapErr};

use crate::cli::Cli;
use crate::settings::AppSettings;

/// Runs the one-shot action selected by `cli`, or the tray when none is.
pub fn run(cli: Cli) -> Result<()> {
	let settings = cli.apply(AppSettings::load());

	if cli.init_config {
		let path = settings.save().wrap_err("Failed to write settings")?;

		println!("{}", path.display());

		return Ok(());
	}

	let source = cli.status_source(&settings);
	let mut cycle = RefreshCycle::new(source, settings.update_interval(), Instant::now());

	if cli.once || cli.dump_png.is_some() {
		let frame = cycle.refresh(Instant::now());

		if let Some(path) = &cli.dump_png {
			let png = frame.pixels.to_png()?;

			fs::write(path, png)
				.wrap_err_with(|| format!("Failed to write icon to {}", path.display()))?;

			tracing::info!(path = %path.display(), "Battery icon written.");
		}
		if cli.once {
			println!("{}", frame.tooltip);
		}

		return Ok(());
	}

	tracing::info!(
		core = battray_core::core_version(),
		command = %settings.command,
		interval_secs = settings.update_interval_secs,
		"Starting battray."
	);

	app::run(cycle)
}
