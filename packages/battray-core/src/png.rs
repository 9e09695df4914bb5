use color_eyre::eyre::{Result, WrapErr, eyre};
use image::{ImageFormat, RgbaImage};

use crate::render::{PixelBuffer, TRANSPARENCY_KEY};

impl PixelBuffer {
	/// Encodes the icon as PNG with the background keyed out.
	pub fn to_png(&self) -> Result<Vec<u8>> {
		let image = RgbaImage::from_raw(self.width(), self.height(), self.to_rgba(TRANSPARENCY_KEY))
			.ok_or_else(|| eyre!("icon buffer does not match its dimensions"))?;
		let mut bytes = Vec::new();

		image
			.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
			.wrap_err("failed to encode battery icon as PNG")?;

		Ok(bytes)
	}
}
