use crate::registers::InvalidChannel;

/// Errors returned by [`Sensor`](crate::Sensor) operations.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug)]
pub enum Error<E> {
    /// The bus transaction itself failed.
    I2c(E),
    /// The bus handle was never opened or has already been closed.
    BusClosed,
    InvalidChannel(u8),
    /// Register address above [`REG_ADDR_LAST`](crate::registers::REG_ADDR_LAST).
    InvalidRegister(u16),
    /// Register writes carry at most one data byte.
    InvalidDataLength(usize),
}

impl<E> From<InvalidChannel> for Error<E> {
    fn from(value: InvalidChannel) -> Self {
        Self::InvalidChannel(value.0)
    }
}

impl<E: embedded_hal::i2c::Error> Error<E> {
    /// The HAL error kind, if this error came from the bus.
    pub fn i2c_kind(&self) -> Option<embedded_hal::i2c::ErrorKind> {
        match self {
            Error::I2c(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl<E: std::fmt::Debug> std::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C bus error: {e:?}"),
            Error::BusClosed => f.write_str("bus not open"),
            Error::InvalidChannel(channel) => write!(f, "unknown channel {channel}"),
            Error::InvalidRegister(register) => {
                write!(f, "invalid register address {register:#x}")
            }
            Error::InvalidDataLength(len) => write!(f, "invalid data length {len}"),
        }
    }
}

impl<E: std::fmt::Debug> std::error::Error for Error<E> {}

/// A unit name that isn't one of celsius/c, fahrenheit/f or kelvin/k.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUnitError(pub String);

impl std::fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown unit {:?}", self.0)
    }
}

impl std::error::Error for ParseUnitError {}
