//! Calibration register math
//!
//! The chip computes current and power from the shunt voltage using the
//! calibration register:
//!
//! ```text
//! CAL = 0.00512 / (current_lsb × R_shunt)
//! ```

use crate::units;

/// Internal scaling constant fixed by the datasheet
pub const CALIBRATION_CONSTANT: f32 = 0.00512;

/// Round a non-negative float to the nearest integer, ties away from zero
///
/// NaN and negative inputs give 0; values past `u32::MAX` saturate.
fn round_to_u32(value: f32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }

    // Truncate first: adding 0.5 in f32 can itself round
    let whole = value as u32;
    if value - whole as f32 >= 0.5 {
        whole.saturating_add(1)
    } else {
        whole
    }
}

/// Calibration derived from the board's shunt and current range
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Current resolution in A/bit
    pub current_lsb: f32,
    /// Shunt resistance in ohms
    pub shunt_resistance: f32,
}

impl Calibration {
    /// Derive the current LSB from the maximum expected current
    pub fn new(max_expected_current: f32, shunt_resistance: f32) -> Self {
        Self {
            current_lsb: units::current_lsb(max_expected_current),
            shunt_resistance,
        }
    }

    /// Calibration value before narrowing
    pub fn exact(&self) -> f32 {
        CALIBRATION_CONSTANT / (self.current_lsb * self.shunt_resistance)
    }

    /// Calibration value rounded to the nearest integer
    pub fn value(&self) -> u32 {
        round_to_u32(self.exact())
    }

    /// Word transmitted to the calibration register
    ///
    /// Low 16 bits of [`Calibration::value`]; anything above is dropped.
    pub fn register_word(&self) -> u16 {
        (self.value() & 0xFFFF) as u16
    }

    /// The rounded value does not fit the register
    pub fn overflows(&self) -> bool {
        self.value() > u16::MAX as u32
    }

    /// Power resolution in W/bit (25 × current LSB)
    pub fn power_lsb(&self) -> f32 {
        25.0 * self.current_lsb
    }
}
