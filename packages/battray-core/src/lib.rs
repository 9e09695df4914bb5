pub mod palette;
pub mod refresh;
pub mod render;
pub mod status;

mod png;

pub use crate::palette::{ChargeColor, Rgb, map_reading};
pub use crate::refresh::{
	DEFAULT_INTERVAL, IconFrame, MAX_INTERVAL, RefreshCycle, RefreshState,
};
pub use crate::render::{HEIGHT, PixelBuffer, TRANSPARENCY_KEY, WIDTH, fill_height, render};
pub use crate::status::{
	ACPI_FAILURE, CommandSource, FixedSource, StatusError, StatusReading, StatusSource,
	parse_status, read_status,
};

pub fn core_version() -> &'static str {
	env!("CARGO_PKG_VERSION")
}
