//! INA226 bus transport layer
//!
//! This crate defines the blocking I2C transport the INA226 driver sits on.
//! Chip-specific HALs either implement [`I2cBus`] directly or are wrapped
//! in [`EmbeddedHalBus`], which adapts any `embedded_hal::i2c::I2c`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (polls the driver)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ina226-driver  (register transactions) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ina226-hal (this crate - bus traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │   MockI2c     │
//! │  I2c master   │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Features
//!
//! - `defmt` - Enable debug formatting support
//! - `mock` - Register-file bus double for tests

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod i2c;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use embedded::EmbeddedHalBus;
pub use i2c::{to_wire_address, I2cBus, I2cConfig, OpenI2cBus};
#[cfg(any(test, feature = "mock"))]
pub use mock::{I2cTransaction, MockError, MockI2c};
