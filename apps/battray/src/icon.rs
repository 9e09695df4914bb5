use battray_core::{PixelBuffer, TRANSPARENCY_KEY};
use color_eyre::eyre::{Result, WrapErr};
use tray_icon::Icon;

pub fn tray_icon_from_pixels(pixels: &PixelBuffer) -> Result<Icon> {
	let rgba = pixels.to_rgba(TRANSPARENCY_KEY);

	Icon::from_rgba(rgba, pixels.width(), pixels.height())
		.wrap_err("Failed to build tray icon from battery pixels")
}
