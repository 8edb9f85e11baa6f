//! INA226 register map
//!
//! Every register is 16 bits wide and addressed through a one-byte
//! register pointer. Addresses are fixed by the datasheet.

use core::ops::{BitAnd, BitOr, BitOrAssign};

/// INA226 register addresses
pub mod reg {
    /// Operating mode, conversion times, averaging, reset
    pub const CONFIG: u8 = 0x00;
    /// Measured voltage (shunt voltage channel)
    pub const VOLTAGE: u8 = 0x01;
    /// Bus voltage
    pub const BUS_VOLTAGE: u8 = 0x02;
    /// Calculated power
    pub const POWER: u8 = 0x03;
    /// Calculated current
    pub const CURRENT: u8 = 0x04;
    /// Full-scale range and current LSB
    pub const CALIBRATION: u8 = 0x05;
    /// Alert configuration and conversion ready flags
    pub const MASK_ENABLE: u8 = 0x06;
    /// Limit compared against the selected alert function
    pub const ALERT_LIMIT: u8 = 0x07;
    /// Manufacturer ID
    pub const MANUFACTURER_ID: u8 = 0xFE;
    /// Die ID
    pub const DIE_ID: u8 = 0xFF;
}

/// Value of the manufacturer ID register ("TI")
pub const MANUFACTURER_ID_TI: u16 = 0x5449;

/// Value of the die ID register on an INA226
pub const DIE_ID_INA226: u16 = 0x2260;

/// Named register addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    Config = reg::CONFIG,
    Voltage = reg::VOLTAGE,
    BusVoltage = reg::BUS_VOLTAGE,
    Power = reg::POWER,
    Current = reg::CURRENT,
    Calibration = reg::CALIBRATION,
    MaskEnable = reg::MASK_ENABLE,
    AlertLimit = reg::ALERT_LIMIT,
    ManufacturerId = reg::MANUFACTURER_ID,
    DieId = reg::DIE_ID,
}

impl Register {
    /// Register pointer byte
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Build the three-byte register write `[register, low, high]`
pub const fn write_frame(register: Register, value: u16) -> [u8; 3] {
    let [low, high] = value.to_le_bytes();
    [register.addr(), low, high]
}

/// Reassemble a register value from the two bytes read off the wire
///
/// The first byte received is the low byte.
pub const fn from_wire(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

/// Mask/Enable register contents
///
/// Bits 15-10 select which condition drives the ALERT pin; the low bits
/// are status flags and pin behaviour. Only one alert function should be
/// enabled at a time since they share the alert limit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MaskEnable(pub u16);

impl MaskEnable {
    /// Shunt voltage exceeds the alert limit
    pub const SHUNT_OVER_VOLTAGE: Self = Self(1 << 15);
    /// Shunt voltage drops below the alert limit
    pub const SHUNT_UNDER_VOLTAGE: Self = Self(1 << 14);
    /// Bus voltage exceeds the alert limit
    pub const BUS_OVER_VOLTAGE: Self = Self(1 << 13);
    /// Bus voltage drops below the alert limit
    pub const BUS_UNDER_VOLTAGE: Self = Self(1 << 12);
    /// Power exceeds the alert limit
    pub const POWER_OVER_LIMIT: Self = Self(1 << 11);
    /// Assert ALERT when a conversion is ready
    pub const CONVERSION_READY: Self = Self(1 << 10);
    /// Alert function flag
    ///
    /// In latch mode this clears only when the register is read; in
    /// transparent mode it clears after the next conversion without an
    /// alert condition.
    pub const ALERT_FUNCTION_FLAG: Self = Self(1 << 4);
    /// Set after conversions, averaging and multiplications complete.
    /// Cleared by writing the config register or reading this register.
    pub const CONVERSION_READY_FLAG: Self = Self(1 << 3);
    /// Arithmetic overflow in current or power
    pub const MATH_OVERFLOW: Self = Self(1 << 2);
    /// 1 = inverted (active-high), 0 = normal (active-low)
    pub const ALERT_POLARITY: Self = Self(1 << 1);
    /// 1 = latch, 0 = transparent
    pub const ALERT_LATCH: Self = Self(1);

    /// No bits set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw register word
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// All bits of `other` are set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for MaskEnable {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MaskEnable {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for MaskEnable {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<MaskEnable> for u16 {
    fn from(mask: MaskEnable) -> u16 {
        mask.0
    }
}

impl From<u16> for MaskEnable {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}
