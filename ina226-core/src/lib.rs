//! Board-agnostic core logic for the INA226 driver
//!
//! This crate contains everything about the chip that does not touch the
//! bus:
//!
//! - Register map and alert mask bits
//! - Configuration word packing (operating mode, conversion times, averaging)
//! - Raw register to physical unit conversion
//! - Calibration register math
//! - Device configuration types and TOML loading
//! - The `PowerMonitor` measurement trait

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod calibration;
pub mod config;
pub mod modes;
pub mod registers;
pub mod traits;
pub mod units;

pub use calibration::Calibration;
pub use config::{BusPins, ConfigError, DeviceConfig, WriteStatusPolicy};
pub use modes::{Averaging, ConversionTime, ModeError, ModeField, OperatingMode, SensorModes};
pub use registers::{MaskEnable, Register};
pub use traits::{Measurement, PowerMonitor};
