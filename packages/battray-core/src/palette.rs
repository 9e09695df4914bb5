use crate::status::{ACPI_FAILURE, StatusReading};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}
impl Rgb {
	pub const BLACK: Self = Self::new(0, 0, 0);
	pub const WHITE: Self = Self::new(255, 255, 255);

	#[must_use]
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	#[must_use]
	pub const fn to_bytes(self) -> [u8; 3] {
		[self.r, self.g, self.b]
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ChargeColor {
	Green,
	Yellow,
	Red,
}
impl ChargeColor {
	#[must_use]
	pub const fn rgb(self) -> Rgb {
		match self {
			Self::Green => Rgb::new(0, 255, 0),
			Self::Yellow => Rgb::new(255, 255, 0),
			Self::Red => Rgb::new(255, 0, 0),
		}
	}

	/// Color for an `acpi` state word; unknown words get the discharging color.
	#[must_use]
	pub fn from_state(state: &str) -> Self {
		match state {
			"Full" | "Charging" => Self::Green,
			"Discharging" | "Not charging" => Self::Yellow,
			ACPI_FAILURE => Self::Red,
			_ => Self::Yellow,
		}
	}
}

#[must_use]
pub fn map_reading(reading: &StatusReading) -> (ChargeColor, u32) {
	(ChargeColor::from_state(&reading.state), reading.percent)
}

#[cfg(test)]
mod tests {
	use crate::palette::{ChargeColor, map_reading};
	use crate::status::StatusReading;

	#[test]
	fn known_states_map_to_their_colors() {
		assert_eq!(ChargeColor::from_state("Full"), ChargeColor::Green);
		assert_eq!(ChargeColor::from_state("Charging"), ChargeColor::Green);
		assert_eq!(ChargeColor::from_state("Discharging"), ChargeColor::Yellow);
		assert_eq!(ChargeColor::from_state("Not charging"), ChargeColor::Yellow);
		assert_eq!(ChargeColor::from_state("(acpi failure)"), ChargeColor::Red);
	}

	#[test]
	fn unknown_states_default_to_yellow() {
		for state in ["Unknown", "", "charging", "red"] {
			assert_eq!(ChargeColor::from_state(state), ChargeColor::Yellow, "state {state:?}");
		}
	}

	#[test]
	fn percent_passes_through() {
		assert_eq!(map_reading(&StatusReading::new("Charging", 57)), (ChargeColor::Green, 57));
		assert_eq!(map_reading(&StatusReading::new("Mystery", 140)), (ChargeColor::Yellow, 140));
		assert_eq!(map_reading(&StatusReading::fallback()), (ChargeColor::Red, 5));
	}
}
