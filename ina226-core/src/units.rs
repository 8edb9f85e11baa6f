//! Raw register to physical unit conversion

/// Current register resolution (A/bit)
pub const CURRENT_LSB_A: f32 = 0.001;

/// Voltage register resolution (V/bit)
pub const VOLTAGE_LSB_V: f32 = 0.00125;

/// Power register resolution (W/bit), always 25 × the current LSB
pub const POWER_LSB_W: f32 = 0.025;

/// Shunt voltage resolution (V/bit)
pub const SHUNT_VOLTAGE_LSB_V: f32 = 0.000_002_5;

/// The current register is a signed 15-bit magnitude: 2^15 steps
pub const CURRENT_STEPS: f32 = 32768.0;

/// Current register value in amps
pub fn current_amps(raw: u16) -> f32 {
    raw as f32 * CURRENT_LSB_A
}

/// Voltage register value in volts
pub fn voltage_volts(raw: u16) -> f32 {
    raw as f32 * VOLTAGE_LSB_V
}

/// Power register value in watts
pub fn power_watts(raw: u16) -> f32 {
    raw as f32 * POWER_LSB_W
}

/// Shunt voltage register (two's complement) in volts
pub fn shunt_volts(raw: i16) -> f32 {
    raw as f32 * SHUNT_VOLTAGE_LSB_V
}

/// Current resolution for a given full-scale current
pub fn current_lsb(max_expected_current: f32) -> f32 {
    max_expected_current / CURRENT_STEPS
}
