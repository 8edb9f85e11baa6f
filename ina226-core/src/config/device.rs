//! Device configuration types
//!
//! Supplied once by the caller when the driver is constructed and never
//! changed afterwards.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;

/// Highest valid 7-bit I2C address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Address with A0 and A1 both tied to GND
pub const DEFAULT_ADDRESS: u8 = 0x40;

/// I2C pin assignment
///
/// Opaque to the driver; handed to the bus transport when it is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusPins {
    /// Data line
    pub sda: u8,
    /// Clock line
    pub scl: u8,
}

impl Default for BusPins {
    fn default() -> Self {
        Self { sda: 4, scl: 5 }
    }
}

/// What register writes report when the bus write fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WriteStatusPolicy {
    /// Return the transport error
    #[default]
    Propagate,
    /// Log the failure and report success anyway
    AlwaysSucceed,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address does not fit in 7 bits
    AddressOutOfRange,
    /// Max expected current must be positive and finite
    InvalidMaxCurrent,
    /// Shunt resistance must be positive and finite
    InvalidShuntResistance,
    /// Input could not be parsed
    Parse,
}

/// Per-chip configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// Largest current the board is expected to see, in amps
    pub max_expected_current: f32,
    /// Shunt resistor value in ohms
    pub shunt_resistance: f32,
    /// 7-bit I2C address (0x40-0x4F depending on A0/A1 strapping)
    pub address: u8,
    /// I2C pins
    pub pins: BusPins,
    /// Write error reporting
    pub write_status: WriteStatusPolicy,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            max_expected_current: 1.0,
            shunt_resistance: 0.002,
            address: DEFAULT_ADDRESS,
            pins: BusPins::default(),
            write_status: WriteStatusPolicy::Propagate,
        }
    }
}

impl DeviceConfig {
    /// Create a config with default pins and write policy
    pub fn new(max_expected_current: f32, shunt_resistance: f32, address: u8) -> Self {
        Self {
            max_expected_current,
            shunt_resistance,
            address,
            ..Self::default()
        }
    }

    /// Calibration derived from this config
    pub fn calibration(&self) -> Calibration {
        Calibration::new(self.max_expected_current, self.shunt_resistance)
    }

    /// Check ranges
    ///
    /// The driver itself accepts any config; this is for loaders and
    /// callers that want to reject bad values up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > MAX_ADDRESS {
            return Err(ConfigError::AddressOutOfRange);
        }
        if !(self.max_expected_current.is_finite() && self.max_expected_current > 0.0) {
            return Err(ConfigError::InvalidMaxCurrent);
        }
        if !(self.shunt_resistance.is_finite() && self.shunt_resistance > 0.0) {
            return Err(ConfigError::InvalidShuntResistance);
        }
        Ok(())
    }
}
