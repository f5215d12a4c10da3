//! User-space driver for the Microchip MCP990x family of I2C temperature
//! sensors (one local and up to three remote diode channels).
//!
//! Any [`embedded_hal::i2c::I2c`] bus works. With the `linux` feature,
//! [`Sensor::open`] opens a `/dev/i2c-N` device directly.

mod eh_i2c;
mod error;
pub mod registers;
mod sensor;
pub mod temperature;

pub use error::{Error, ParseUnitError};
pub use registers::{Channel, Config, DEFAULT_ADDRESS};
pub use sensor::{BusOwnership, Sensor, SensorConfig};
pub use temperature::{Temperature, Unit};
