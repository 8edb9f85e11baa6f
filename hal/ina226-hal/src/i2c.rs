//! I2C bus abstractions
//!
//! Provides the blocking master operations the driver consumes. Addresses
//! passed across this trait are 8-bit wire addresses: the 7-bit device
//! address shifted left by one, with bit 0 left for the R/W flag that the
//! transport fills in.

/// Convert a 7-bit device address into the 8-bit wire address
///
/// Bit 7 of the input is shifted out.
pub const fn to_wire_address(address_7bit: u8) -> u8 {
    address_7bit << 1
}

/// I2C bus master
///
/// # Invariants
///
/// - Only one owner per bus instance
/// - No concurrent access from multiple contexts without external locking
pub trait I2cBus {
    /// Error type for I2C operations (NACK, arbitration loss, timeout)
    type Error;

    /// Write data to a device
    ///
    /// Performs START - ADDR(W) - DATA - STOP.
    ///
    /// # Arguments
    /// * `address` - 8-bit wire address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device
    ///
    /// # Arguments
    /// * `address` - 8-bit wire address
    /// * `buf` - Buffer to read into
    /// * `repeated_start` - Leave the bus claimed instead of issuing STOP,
    ///   so the next transaction starts with a repeated START
    fn read(&mut self, address: u8, buf: &mut [u8], repeated_start: bool)
        -> Result<(), Self::Error>;
}

/// Bus transports that can be brought up on a pair of pins
///
/// Lets a driver be built from configuration alone, the pin numbers being
/// opaque to everything above the transport.
pub trait OpenI2cBus: I2cBus + Sized {
    /// Claim the SDA/SCL pins and initialise the peripheral
    fn open(sda: u8, scl: u8, config: I2cConfig) -> Result<Self, Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}
