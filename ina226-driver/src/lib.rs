//! INA226 driver
//!
//! Blocking driver for the INA226 current/power monitor on any transport
//! implementing [`ina226_hal::I2cBus`]:
//!
//! - Current, voltage and power reads scaled to amps, volts and watts
//! - Configuration word and calibration register writes
//! - Alert mask and alert limit access
//!
//! ```ignore
//! let config = DeviceConfig::new(1.0, 0.002, 0x40);
//! let mut ina = Ina226::new(EmbeddedHalBus::new(i2c), &config);
//!
//! ina.calibrate()?;
//! ina.configure(SensorModes::default())?;
//!
//! loop {
//!     let amps = ina.current()?;
//!     let volts = ina.voltage()?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ina226;

pub use ina226::Ina226;
pub use ina226_core::{
    BusPins, Calibration, DeviceConfig, MaskEnable, Measurement, PowerMonitor, SensorModes,
    WriteStatusPolicy,
};
pub use ina226_hal::{EmbeddedHalBus, I2cBus, I2cConfig, OpenI2cBus};
