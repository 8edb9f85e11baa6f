//! Adapter from `embedded-hal` I2C masters to [`I2cBus`]
//!
//! Any blocking HAL that implements `embedded_hal::i2c::I2c` (embassy-rp,
//! rp2040-hal, stm32 HALs, linux-embedded-hal, ...) can carry the driver.

use embedded_hal::i2c::I2c;

use crate::i2c::I2cBus;

/// Wraps an `embedded_hal::i2c::I2c` master
///
/// embedded-hal addresses devices with 7-bit addresses, so the wire
/// address is shifted back down before each transfer. Errors from the
/// wrapped master are passed through unchanged.
pub struct EmbeddedHalBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> EmbeddedHalBus<I2C> {
    /// Wrap an I2C master
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give back the wrapped master
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> I2cBus for EmbeddedHalBus<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address >> 1, data)
    }

    // Every embedded-hal transaction ends with STOP, so `repeated_start`
    // cannot be carried across calls.
    fn read(
        &mut self,
        address: u8,
        buf: &mut [u8],
        _repeated_start: bool,
    ) -> Result<(), Self::Error> {
        self.i2c.read(address >> 1, buf)
    }
}
