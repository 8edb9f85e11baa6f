//! TOML loading for [`DeviceConfig`]
//!
//! Settings live under an `[ina226]` table so the file can be shared with
//! the rest of a board's configuration:
//!
//! ```toml
//! [ina226]
//! max_expected_current = 3.2768
//! shunt_resistance = 0.1
//! address = 0x41
//! write_status = "always_succeed"
//!
//! [ina226.pins]
//! sda = 8
//! scl = 9
//! ```
//!
//! Missing keys take their [`Default`] values. Other top-level tables are
//! ignored.

use serde::Deserialize;

use super::device::{ConfigError, DeviceConfig};

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    ina226: DeviceConfig,
}

/// Parse and validate a configuration file
pub fn parse_config(input: &str) -> Result<DeviceConfig, ConfigError> {
    let file: ConfigFile = ::toml::from_str(input).map_err(|_| ConfigError::Parse)?;
    file.ina226.validate()?;
    Ok(file.ina226)
}

impl DeviceConfig {
    /// Load from the `[ina226]` table of a TOML document
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        parse_config(input)
    }
}
