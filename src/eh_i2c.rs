//! Single-register access on top of [`embedded_hal::i2c::I2c`].

use embedded_hal::i2c::I2c;

use crate::registers::REG_ADDR_LAST;
use crate::{Error, Sensor};

fn check_register<E>(register: u16) -> Result<u8, Error<E>> {
    if register > REG_ADDR_LAST {
        return Err(Error::InvalidRegister(register));
    }
    Ok(register as u8)
}

impl<I2C: I2c> Sensor<I2C> {
    /// Write `data` to the 8-bit register at `register`.
    ///
    /// At most one data byte is accepted. An empty `data` only sets the
    /// register pointer.
    pub fn write_register(&mut self, register: u16, data: &[u8]) -> Result<(), Error<I2C::Error>> {
        let address = self.address;
        let bus = self.bus_mut()?;
        let register = check_register(register)?;
        if data.len() > 1 {
            return Err(Error::InvalidDataLength(data.len()));
        }
        let mut frame = vec![register];
        frame.extend_from_slice(data);
        bus.write(address, &frame).map_err(Error::I2c)
    }

    /// Read the 8-bit register at `register`.
    pub fn read_register(&mut self, register: u16) -> Result<u8, Error<I2C::Error>> {
        let address = self.address;
        let bus = self.bus_mut()?;
        let register = check_register(register)?;
        let mut byte = [0u8];
        bus.write_read(address, &[register], &mut byte)
            .map_err(Error::I2c)?;
        Ok(byte[0])
    }
}
