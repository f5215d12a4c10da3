//! MCP990x register map.
//!
//! Each temperature channel is read as a high/low register pair. The pairs
//! are not laid out at a fixed stride, so they are listed per channel.

use bit_field::BitField;

/// Default 7-bit I2C address of the MCP990x family.
pub const DEFAULT_ADDRESS: u8 = 0b1001100;

/// Highest valid register address.
pub const REG_ADDR_LAST: u16 = 0xFF;

pub const REG_ADDR_TEMP_HIGH: u8 = 0x00;
pub const REG_ADDR_TEMP_LOW: u8 = 0x29;

pub const REG_ADDR_EXT1_TEMP_HIGH: u8 = 0x01;
pub const REG_ADDR_EXT1_TEMP_LOW: u8 = 0x10;

pub const REG_ADDR_EXT2_TEMP_HIGH: u8 = 0x23;
pub const REG_ADDR_EXT2_TEMP_LOW: u8 = 0x24;

pub const REG_ADDR_EXT3_TEMP_HIGH: u8 = 0x2A;
pub const REG_ADDR_EXT3_TEMP_LOW: u8 = 0x2B;

/// Configuration register.
pub const REG_ADDR_CONFIG: u8 = 0x03;

/// A temperature measurement source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The on-die sensor.
    Local,
    Remote1,
    Remote2,
    Remote3,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Local,
        Channel::Remote1,
        Channel::Remote2,
        Channel::Remote3,
    ];

    /// The (high byte, low byte) register addresses for this channel.
    pub fn registers(&self) -> (u8, u8) {
        match self {
            Channel::Local => (REG_ADDR_TEMP_HIGH, REG_ADDR_TEMP_LOW),
            Channel::Remote1 => (REG_ADDR_EXT1_TEMP_HIGH, REG_ADDR_EXT1_TEMP_LOW),
            Channel::Remote2 => (REG_ADDR_EXT2_TEMP_HIGH, REG_ADDR_EXT2_TEMP_LOW),
            Channel::Remote3 => (REG_ADDR_EXT3_TEMP_HIGH, REG_ADDR_EXT3_TEMP_LOW),
        }
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidChannel(pub u8);

impl TryFrom<u8> for Channel {
    type Error = InvalidChannel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Local,
            1 => Self::Remote1,
            2 => Self::Remote2,
            3 => Self::Remote3,
            other => return Err(InvalidChannel(other)),
        })
    }
}

/// Contents of the configuration register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config(u8);

impl Config {
    /// Extended temperature range.
    pub const RANGE: usize = 2;

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn extended_range(&self) -> bool {
        self.0.get_bit(Self::RANGE)
    }

    #[must_use]
    pub fn with_extended_range(mut self, enable: bool) -> Self {
        self.0.set_bit(Self::RANGE, enable);
        self
    }
}
