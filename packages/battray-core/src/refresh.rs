use std::time::{Duration, Instant};

use crate::palette::map_reading;
use crate::render::{PixelBuffer, render};
use crate::status::{StatusReading, StatusSource, read_status};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
/// Longest accepted refresh interval; longer ones are clamped to it.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RefreshState {
	Idle,
	Refreshing,
}

/// Everything the tray host needs to replace the displayed icon.
#[derive(Clone, Debug)]
pub struct IconFrame {
	pub reading: StatusReading,
	pub pixels: PixelBuffer,
	pub tooltip: String,
}

pub struct RefreshCycle {
	source: Box<dyn StatusSource>,
	interval: Duration,
	state: RefreshState,
	next_due: Instant,
}
impl RefreshCycle {
	#[must_use]
	pub fn new(source: Box<dyn StatusSource>, interval: Duration, now: Instant) -> Self {
		let interval = interval.min(MAX_INTERVAL);

		Self { source, interval, state: RefreshState::Idle, next_due: now }
	}

	#[must_use]
	pub fn state(&self) -> RefreshState {
		self.state
	}

	#[must_use]
	pub fn interval(&self) -> Duration {
		self.interval
	}

	#[must_use]
	pub fn next_due(&self) -> Instant {
		self.next_due
	}

	/// Refreshes only if the interval since the last refresh has elapsed.
	pub fn poll(&mut self, now: Instant) -> Option<IconFrame> {
		if now < self.next_due {
			return None;
		}

		Some(self.refresh(now))
	}

	pub fn refresh(&mut self, now: Instant) -> IconFrame {
		self.state = RefreshState::Refreshing;

		let reading = read_status(self.source.as_mut());
		let (color, percent) = map_reading(&reading);
		let pixels = render(color, percent);
		let tooltip = reading.tooltip();

		tracing::debug!(
			state = %reading.state,
			percent = reading.percent,
			color = ?color,
			"Battery icon refreshed."
		);

		self.next_due = now.checked_add(self.interval).unwrap_or(now + MAX_INTERVAL);
		self.state = RefreshState::Idle;

		IconFrame { reading, pixels, tooltip }
	}
}
