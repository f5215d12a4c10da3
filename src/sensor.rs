use embedded_hal::i2c::I2c;
use log::debug;

use crate::registers::{Channel, Config, DEFAULT_ADDRESS, REG_ADDR_CONFIG};
use crate::temperature::{self, Temperature};
use crate::Error;

#[derive(Debug, Clone, Copy, bon::Builder)]
pub struct SensorConfig {
    /// Bus index for [`Sensor::open`]: 0 is `/dev/i2c-0`, 1 is `/dev/i2c-1` etc.
    /// Ignored when an open bus is handed to [`Sensor::new`].
    #[builder(default)]
    pub bus: u8,
    /// 7-bit device address.
    #[builder(default = DEFAULT_ADDRESS)]
    pub address: u8,
    /// Log raw register bytes and decoded readings.
    #[builder(default)]
    pub debug: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Who opened the bus the sensor is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOwnership {
    /// Opened by [`Sensor::open`].
    Opened,
    /// Handed over by the caller through [`Sensor::new`].
    Adopted,
}

/// MCP990x temperature sensor on an I2C bus.
///
/// Pass `&mut bus` to [`Sensor::new`] to keep the bus with the caller, or pass
/// it by value to let the sensor hold it until [`Sensor::close`].
pub struct Sensor<I2C> {
    bus: Option<I2C>,
    ownership: BusOwnership,
    pub(crate) address: u8,
    debug: bool,
}

impl<I2C: I2c> Sensor<I2C> {
    /// Use an already open bus.
    pub fn new(bus: I2C, config: SensorConfig) -> Self {
        if config.debug {
            debug!("using preinited bus, address {:#04x}", config.address);
        }
        Self::with_ownership(bus, config, BusOwnership::Adopted)
    }

    fn with_ownership(bus: I2C, config: SensorConfig, ownership: BusOwnership) -> Self {
        Self {
            bus: Some(bus),
            ownership,
            address: config.address,
            debug: config.debug,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn ownership(&self) -> BusOwnership {
        self.ownership
    }

    pub fn is_open(&self) -> bool {
        self.bus.is_some()
    }

    pub(crate) fn bus_mut(&mut self) -> Result<&mut I2C, Error<I2C::Error>> {
        self.bus.as_mut().ok_or(Error::BusClosed)
    }

    /// Disconnect from the bus and hand the bus back.
    ///
    /// Every later operation fails with [`Error::BusClosed`]. Closing twice
    /// returns `None` the second time.
    pub fn close(&mut self) -> Option<I2C> {
        let bus = self.bus.take();
        if self.debug && bus.is_some() {
            debug!("closed {:?} bus, address {:#04x}", self.ownership, self.address);
        }
        bus
    }

    /// Consume the sensor, returning the bus if it is still open.
    pub fn release(mut self) -> Option<I2C> {
        self.close()
    }

    /// Read the current temperature of `channel` (0 to 3).
    pub fn read(&mut self, channel: u8) -> Result<Temperature, Error<I2C::Error>> {
        let channel = Channel::try_from(channel)?;
        self.read_channel(channel)
    }

    pub fn read_channel(&mut self, channel: Channel) -> Result<Temperature, Error<I2C::Error>> {
        let (high_reg, low_reg) = channel.registers();
        let data = [
            self.read_register(high_reg.into())?,
            self.read_register(low_reg.into())?,
        ];

        if self.debug {
            for reg in data {
                debug!("reg: {reg:#04x}");
            }
        }

        let temp = temperature::decode(data);
        if self.debug {
            debug!("{channel:?}: {temp}");
        }
        Ok(temp)
    }

    /// Read every channel, local first.
    pub fn read_all(&mut self) -> Result<[Temperature; 4], Error<I2C::Error>> {
        let mut temps = [Temperature::from_kelvin(0.0); 4];
        for (temp, channel) in temps.iter_mut().zip(Channel::ALL) {
            *temp = self.read_channel(channel)?;
        }
        Ok(temps)
    }

    pub fn config(&mut self) -> Result<Config, Error<I2C::Error>> {
        self.read_register(REG_ADDR_CONFIG.into())
            .map(Config::from_bits)
    }

    pub fn set_config(&mut self, config: Config) -> Result<(), Error<I2C::Error>> {
        self.write_register(REG_ADDR_CONFIG.into(), &[config.bits()])
    }
}

#[cfg(feature = "linux")]
mod linux {
    use linux_embedded_hal::{I2CError, I2cdev};
    use log::debug;

    use super::{BusOwnership, Sensor, SensorConfig};
    use crate::Error;

    impl Sensor<I2cdev> {
        /// Open `/dev/i2c-{config.bus}` and talk to the sensor on it.
        pub fn open(config: SensorConfig) -> Result<Self, Error<I2CError>> {
            let path = format!("/dev/i2c-{}", config.bus);
            if config.debug {
                debug!("init-ing bus {path}, address {:#04x}", config.address);
            }
            let bus = I2cdev::new(&path).map_err(|e| Error::I2c(I2CError::from(e)))?;
            Ok(Self::with_ownership(bus, config, BusOwnership::Opened))
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;

    const ADDR: u8 = DEFAULT_ADDRESS;

    fn reg(register: u8, value: u8) -> I2cTransaction {
        I2cTransaction::write_read(ADDR, vec![register], vec![value])
    }

    #[test]
    fn default_config() {
        let config = SensorConfig::default();
        assert_eq!(config.bus, 0);
        assert_eq!(config.address, 0x4C);
        assert!(!config.debug);
    }

    #[test]
    fn reads_local_channel() {
        let mut i2c = I2cMock::new(&[reg(0x00, 0x19), reg(0x29, 0x20)]);
        let mut sensor = Sensor::new(i2c.clone(), SensorConfig::default());
        let temp = sensor.read(0).unwrap();
        assert!((temp.celsius() - 25.125).abs() < 1e-9);
        i2c.done();
    }

    #[test]
    fn reads_remote_channels_from_their_registers() {
        let expectations = [
            reg(0x01, 0x20),
            reg(0x10, 0x00),
            reg(0x23, 0x30),
            reg(0x24, 0x80),
            reg(0x2A, 0x00),
            reg(0x2B, 0xE0),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let config = SensorConfig::builder().debug(true).build();
        let mut sensor = Sensor::new(i2c.clone(), config);

        assert!((sensor.read(1).unwrap().c() - 32.0).abs() < 1e-9);
        assert!((sensor.read(2).unwrap().c() - 48.5).abs() < 1e-9);
        assert!((sensor.read(3).unwrap().c() - 0.875).abs() < 1e-9);
        i2c.done();
    }

    #[test]
    fn uses_configured_address() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write_read(0x3C, vec![0x00], vec![0x00]),
            I2cTransaction::write_read(0x3C, vec![0x29], vec![0x00]),
        ]);
        let config = SensorConfig::builder().address(0x3C).build();
        let mut sensor = Sensor::new(i2c.clone(), config);
        assert_eq!(sensor.address(), 0x3C);
        assert_eq!(sensor.read(0).unwrap().kelvin(), 273.15);
        i2c.done();
    }

    #[test]
    fn unknown_channel_touches_nothing() {
        let mut i2c = I2cMock::new(&[]);
        let mut sensor = Sensor::new(i2c.clone(), SensorConfig::default());
        assert!(matches!(sensor.read(4), Err(Error::InvalidChannel(4))));
        i2c.done();
    }

    #[test]
    fn read_after_close_fails() {
        let mut i2c = I2cMock::new(&[]);
        let mut sensor = Sensor::new(i2c.clone(), SensorConfig::default());
        assert!(sensor.is_open());
        assert!(sensor.close().is_some());
        assert!(!sensor.is_open());
        assert!(matches!(sensor.read(0), Err(Error::BusClosed)));
        assert!(matches!(sensor.config(), Err(Error::BusClosed)));
        i2c.done();
    }

    #[test]
    fn close_is_idempotent() {
        let mut i2c = I2cMock::new(&[]);
        let mut sensor = Sensor::new(i2c.clone(), SensorConfig::default());
        assert!(sensor.close().is_some());
        assert!(sensor.close().is_none());
        assert!(sensor.release().is_none());
        i2c.done();
    }

    #[test]
    fn adopted_bus_can_be_borrowed() {
        let mut i2c = I2cMock::new(&[reg(0x00, 0x10), reg(0x29, 0x00)]);
        {
            let mut sensor = Sensor::new(&mut i2c, SensorConfig::default());
            assert_eq!(sensor.ownership(), BusOwnership::Adopted);
            assert!((sensor.read(0).unwrap().c() - 16.0).abs() < 1e-9);
        }
        i2c.done();
    }

    #[test]
    fn bus_error_aborts_read() {
        let mut i2c = I2cMock::new(&[reg(0x00, 0x00).with_error(ErrorKind::Other)]);
        let mut sensor = Sensor::new(i2c.clone(), SensorConfig::default());
        let err = sensor.read(0).unwrap_err();
        assert_eq!(err.i2c_kind(), Some(ErrorKind::Other));
        i2c.done();
    }

    #[test]
    fn read_all_channels_in_order() {
        let mut i2c = I2cMock::new(&[
            reg(0x00, 0x01),
            reg(0x29, 0x00),
            reg(0x01, 0x02),
            reg(0x10, 0x00),
            reg(0x23, 0x03),
            reg(0x24, 0x00),
            reg(0x2A, 0x04),
            reg(0x2B, 0x00),
        ]);
        let mut sensor = Sensor::new(i2c.clone(), SensorConfig::default());
        let celsius = sensor.read_all().unwrap().map(|t| t.celsius().round());
        assert_eq!(celsius, [1.0, 2.0, 3.0, 4.0]);
        i2c.done();
    }

    #[test]
    fn enables_extended_range() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x03, 0b100]),
            reg(0x03, 0b100),
        ]);
        let mut sensor = Sensor::new(i2c.clone(), SensorConfig::default());
        sensor
            .set_config(Config::default().with_extended_range(true))
            .unwrap();
        assert!(sensor.config().unwrap().extended_range());
        i2c.done();
    }
}
