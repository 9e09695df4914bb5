//! Rasterizes the battery glyph shown in the tray.
//!
//! The icon is a bordered upright rectangle centered between transparent padding columns.
//! Charge fills it from the bottom up.

use crate::palette::{ChargeColor, Rgb};

pub const WIDTH: u32 = 32;
pub const HEIGHT: u32 = 32;
pub const BORDER: u32 = 1;
pub const PADDING_WIDTH: u32 = WIDTH / 5;
pub const BATTERY_WIDTH: u32 = WIDTH - (PADDING_WIDTH * 2) - (BORDER * 2);
pub const INTERIOR_HEIGHT: u32 = HEIGHT - (BORDER * 2);
/// Yellow fills at or below this many rows are drawn red.
pub const WARNING_ROWS: u32 = 3;

pub const BORDER_COLOR: Rgb = Rgb::BLACK;
/// Background color; hosts treat it as fully transparent.
pub const TRANSPARENCY_KEY: Rgb = Rgb::WHITE;

const BYTES_PER_PIXEL: usize = 3;

/// Row-major RGB pixels of one rendered icon.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
	bytes: Vec<u8>,
}
impl PixelBuffer {
	#[must_use]
	pub fn width(&self) -> u32 {
		WIDTH
	}

	#[must_use]
	pub fn height(&self) -> u32 {
		HEIGHT
	}

	#[must_use]
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	#[must_use]
	pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
		if x >= WIDTH || y >= HEIGHT {
			return None;
		}

		let i = (y * WIDTH + x) as usize * BYTES_PER_PIXEL;

		Some(Rgb::new(self.bytes[i], self.bytes[i + 1], self.bytes[i + 2]))
	}

	/// Expands to RGBA, making every pixel equal to `key` fully transparent.
	#[must_use]
	pub fn to_rgba(&self, key: Rgb) -> Vec<u8> {
		let key = key.to_bytes();
		let mut rgba = Vec::with_capacity((WIDTH * HEIGHT * 4) as usize);

		for px in self.bytes.chunks_exact(BYTES_PER_PIXEL) {
			let alpha = if px == key { 0 } else { 255 };

			rgba.extend_from_slice(&[px[0], px[1], px[2], alpha]);
		}

		rgba
	}
}

/// Number of interior rows, counted from the bottom, that represent `percent`.
#[must_use]
pub fn fill_height(percent: u32) -> u32 {
	percent.min(100) * INTERIOR_HEIGHT / 100
}

#[must_use]
pub fn render(color: ChargeColor, percent: u32) -> PixelBuffer {
	let fill_height = fill_height(percent);
	let color = if color == ChargeColor::Yellow && fill_height <= WARNING_ROWS {
		ChargeColor::Red
	} else {
		color
	};
	let charge = color.rgb();
	let mut bytes = Vec::with_capacity((WIDTH * HEIGHT) as usize * BYTES_PER_PIXEL);

	push_row(&mut bytes, BORDER_COLOR);

	for i in 0..INTERIOR_HEIGHT {
		let height_from_bottom = INTERIOR_HEIGHT - 1 - i;
		let row_color = if height_from_bottom > fill_height { TRANSPARENCY_KEY } else { charge };

		push_row(&mut bytes, row_color);
	}

	push_row(&mut bytes, BORDER_COLOR);

	PixelBuffer { bytes }
}

fn push_row(bytes: &mut Vec<u8>, inner: Rgb) {
	push_run(bytes, TRANSPARENCY_KEY, PADDING_WIDTH);
	push_run(bytes, BORDER_COLOR, BORDER);
	push_run(bytes, inner, BATTERY_WIDTH);
	push_run(bytes, BORDER_COLOR, BORDER);
	push_run(bytes, TRANSPARENCY_KEY, PADDING_WIDTH);
}

fn push_run(bytes: &mut Vec<u8>, color: Rgb, count: u32) {
	for _ in 0..count {
		bytes.extend_from_slice(&color.to_bytes());
	}
}

#[cfg(test)]
mod tests {
	use crate::palette::{ChargeColor, Rgb};
	use crate::render::{
		BATTERY_WIDTH, BORDER_COLOR, HEIGHT, INTERIOR_HEIGHT, PADDING_WIDTH, TRANSPARENCY_KEY,
		WIDTH, fill_height, render,
	};

	const FIRST_FILL_X: u32 = PADDING_WIDTH + 1;

	fn inner_row(buffer: &crate::render::PixelBuffer, y: u32) -> Vec<Rgb> {
		(FIRST_FILL_X..FIRST_FILL_X + BATTERY_WIDTH).map(|x| buffer.pixel(x, y).unwrap()).collect()
	}

	#[test]
	fn geometry_adds_up_to_icon_width() {
		assert_eq!(PADDING_WIDTH, 6);
		assert_eq!(BATTERY_WIDTH, 18);
		assert_eq!(PADDING_WIDTH * 2 + 2 + BATTERY_WIDTH, WIDTH);
	}

	#[test]
	fn buffer_length_is_constant() {
		for color in [ChargeColor::Green, ChargeColor::Yellow, ChargeColor::Red] {
			for percent in [0, 1, 13, 14, 50, 99, 100, 250] {
				let buffer = render(color, percent);

				assert_eq!(buffer.as_bytes().len(), (WIDTH * HEIGHT * 3) as usize);
			}
		}
	}

	#[test]
	fn fill_height_floors_and_clamps() {
		assert_eq!(fill_height(0), 0);
		assert_eq!(fill_height(57), 17);
		assert_eq!(fill_height(100), INTERIOR_HEIGHT);
		assert_eq!(fill_height(400), INTERIOR_HEIGHT);
	}

	#[test]
	fn full_green_fills_every_interior_row() {
		let buffer = render(ChargeColor::Green, 100);
		let green = ChargeColor::Green.rgb();

		assert!(inner_row(&buffer, 1).iter().all(|px| *px == green));
		assert!(inner_row(&buffer, HEIGHT - 2).iter().all(|px| *px == green));
	}

	#[test]
	fn border_rows_and_padding_frame_the_battery() {
		let buffer = render(ChargeColor::Green, 50);

		assert!(inner_row(&buffer, 0).iter().all(|px| *px == BORDER_COLOR));
		assert!(inner_row(&buffer, HEIGHT - 1).iter().all(|px| *px == BORDER_COLOR));

		for y in 0..HEIGHT {
			assert_eq!(buffer.pixel(0, y), Some(TRANSPARENCY_KEY));
			assert_eq!(buffer.pixel(WIDTH - 1, y), Some(TRANSPARENCY_KEY));
			assert_eq!(buffer.pixel(PADDING_WIDTH, y), Some(BORDER_COLOR));
			assert_eq!(buffer.pixel(WIDTH - 1 - PADDING_WIDTH, y), Some(BORDER_COLOR));
		}
	}

	#[test]
	fn empty_yellow_turns_red_in_bottom_row_only() {
		let buffer = render(ChargeColor::Yellow, 0);
		let red = ChargeColor::Red.rgb();

		assert!(inner_row(&buffer, HEIGHT - 2).iter().all(|px| *px == red));

		for y in 1..HEIGHT - 2 {
			assert!(inner_row(&buffer, y).iter().all(|px| *px == TRANSPARENCY_KEY), "row {y}");
		}
	}

	#[test]
	fn low_yellow_is_drawn_red() {
		let buffer = render(ChargeColor::Yellow, 13);
		let bottom = inner_row(&buffer, HEIGHT - 2);

		assert_eq!(fill_height(13), 3);
		assert!(bottom.iter().all(|px| *px == ChargeColor::Red.rgb()));
	}

	#[test]
	fn yellow_above_warning_stays_yellow() {
		let buffer = render(ChargeColor::Yellow, 14);

		assert_eq!(fill_height(14), 4);
		assert!(inner_row(&buffer, HEIGHT - 2).iter().all(|px| *px == ChargeColor::Yellow.rgb()));
	}

	#[test]
	fn low_green_is_not_overridden() {
		let buffer = render(ChargeColor::Green, 0);

		assert!(inner_row(&buffer, HEIGHT - 2).iter().all(|px| *px == ChargeColor::Green.rgb()));
	}

	#[test]
	fn fill_rises_with_percent() {
		let buffer = render(ChargeColor::Green, 50);
		let filled_rows = (1..HEIGHT - 1)
			.filter(|y| buffer.pixel(FIRST_FILL_X, *y) == Some(ChargeColor::Green.rgb()))
			.count();

		// Rows at heights 0..=fill_height are filled.
		assert_eq!(filled_rows as u32, fill_height(50) + 1);
	}

	#[test]
	fn rendering_is_idempotent() {
		assert_eq!(render(ChargeColor::Yellow, 42), render(ChargeColor::Yellow, 42));
	}

	#[test]
	fn rgba_keys_out_background() {
		let buffer = render(ChargeColor::Green, 100);
		let rgba = buffer.to_rgba(TRANSPARENCY_KEY);

		assert_eq!(rgba.len(), (WIDTH * HEIGHT * 4) as usize);
		assert_eq!(&rgba[0..4], &[255, 255, 255, 0]);

		let border = (PADDING_WIDTH * 4) as usize;

		assert_eq!(&rgba[border..border + 4], &[0, 0, 0, 255]);
	}
}
