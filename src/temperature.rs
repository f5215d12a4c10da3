//! Temperature values and units.
//!
//! A [`Temperature`] stores a single Kelvin value. Celsius and Fahrenheit are
//! derived on demand, so a value built from one unit reads back in any other.
//!
//! ```
//! # use mcp990x::temperature::{Temperature, Unit};
//! let t = Temperature::new(0.0, Unit::Celsius);
//! assert_eq!(t.fahrenheit(), 32.0);
//! assert_eq!(t.kelvin(), 273.15);
//! ```

use std::str::FromStr;

use crate::error::ParseUnitError;

const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

/// Size of one LSB of the temperature registers, in degrees Celsius.
pub const RESOLUTION: f64 = 0.125;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    /// Accepts the long or one-letter unit name, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "celsius" | "c" => Self::Celsius,
            "fahrenheit" | "f" => Self::Fahrenheit,
            "kelvin" | "k" => Self::Kelvin,
            _ => return Err(ParseUnitError(s.to_owned())),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature {
    kelvin: f64,
}

impl Temperature {
    pub fn new(value: f64, unit: Unit) -> Self {
        match unit {
            Unit::Celsius => Self::from_celsius(value),
            Unit::Fahrenheit => Self::from_fahrenheit(value),
            Unit::Kelvin => Self::from_kelvin(value),
        }
    }

    pub fn from_kelvin(kelvin: f64) -> Self {
        Self { kelvin }
    }

    pub fn from_celsius(celsius: f64) -> Self {
        Self::from_kelvin(celsius + ZERO_CELSIUS_IN_KELVIN)
    }

    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        Self::from_celsius((fahrenheit - 32.0) / 1.8)
    }

    pub fn kelvin(&self) -> f64 {
        self.kelvin
    }

    pub fn k(&self) -> f64 {
        self.kelvin()
    }

    pub fn celsius(&self) -> f64 {
        self.kelvin - ZERO_CELSIUS_IN_KELVIN
    }

    pub fn c(&self) -> f64 {
        self.celsius()
    }

    pub fn fahrenheit(&self) -> f64 {
        1.8 * self.celsius() + 32.0
    }

    pub fn f(&self) -> f64 {
        self.fahrenheit()
    }
}

/// Renders the Celsius value. Precision flags pass through, so `{:.1}` works.
impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.celsius(), f)
    }
}

/// Stitch the high and low temperature register bytes into degrees Celsius.
///
/// The reading is 11 bits wide: the high register holds the top 8 and the
/// low register carries the remaining 3 in its upper bits. The field is
/// taken as an unsigned magnitude; no sign extension is applied.
pub fn decode_celsius(bytes: [u8; 2]) -> f64 {
    let raw = u16::from_be_bytes(bytes);
    f64::from(raw >> 5) * RESOLUTION
}

pub fn decode(bytes: [u8; 2]) -> Temperature {
    Temperature::from_celsius(decode_celsius(bytes))
}
