//! Configuration types
//!
//! Board-level settings for one INA226, optionally loaded from TOML.

pub mod device;
#[cfg(feature = "toml")]
pub mod toml;

pub use device::*;
