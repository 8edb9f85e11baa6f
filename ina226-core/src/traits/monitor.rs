//! Power monitor trait

/// One reading of every measured quantity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Current in amps
    pub current: f32,
    /// Voltage in volts
    pub voltage: f32,
    /// Power in watts
    pub power: f32,
}

/// Trait for current/voltage/power monitors
///
/// Every read is a fresh transaction with the device; nothing is cached.
/// Reads take `&mut self` because they drive the bus.
pub trait PowerMonitor {
    /// Error type for bus operations
    type Error;

    /// Read the current in amps
    fn read_current_amps(&mut self) -> Result<f32, Self::Error>;

    /// Read the voltage in volts
    fn read_voltage_volts(&mut self) -> Result<f32, Self::Error>;

    /// Read the power in watts
    fn read_power_watts(&mut self) -> Result<f32, Self::Error>;

    /// Read all three quantities
    ///
    /// The values come from three separate transactions and may straddle
    /// a conversion boundary.
    fn read_all(&mut self) -> Result<Measurement, Self::Error> {
        Ok(Measurement {
            current: self.read_current_amps()?,
            voltage: self.read_voltage_volts()?,
            power: self.read_power_watts()?,
        })
    }
}
