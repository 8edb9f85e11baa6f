//! Configuration register packing
//!
//! Layout of the 16-bit configuration word:
//!
//! ```text
//!  15   14..12   11..9    8..6     5..3     2..0
//! ┌───┬────────┬───────┬────────┬────────┬──────┐
//! │RST│  ---   │  AVG  │ VBUSCT │ VSHCT  │ MODE │
//! └───┴────────┴───────┴────────┴────────┴──────┘
//! ```

/// Width mask for the 3-bit fields
const FIELD_MASK: u8 = 0b111;

const SHUNT_CT_SHIFT: u16 = 3;
const BUS_CT_SHIFT: u16 = 6;
const AVG_SHIFT: u16 = 9;
const RESET_SHIFT: u16 = 15;

/// Operating mode (bits 0-2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatingMode {
    PowerDown = 0b000,
    ShuntTriggered = 0b001,
    BusTriggered = 0b010,
    ShuntAndBusTriggered = 0b011,
    PowerDownAlt = 0b100,
    ShuntContinuous = 0b101,
    BusContinuous = 0b110,
    /// Power-on default
    ShuntAndBusContinuous = 0b111,
}

/// ADC conversion time for either channel (3-bit field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConversionTime {
    Us140 = 0,
    Us204 = 1,
    Us332 = 2,
    Us588 = 3,
    /// Power-on default
    Us1100 = 4,
    Us2116 = 5,
    Us4156 = 6,
    Us8244 = 7,
}

impl ConversionTime {
    /// Conversion time in microseconds
    pub const fn micros(self) -> u16 {
        match self {
            Self::Us140 => 140,
            Self::Us204 => 204,
            Self::Us332 => 332,
            Self::Us588 => 588,
            Self::Us1100 => 1100,
            Self::Us2116 => 2116,
            Self::Us4156 => 4156,
            Self::Us8244 => 8244,
        }
    }
}

/// Number of samples averaged per result (bits 9-11)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Averaging {
    /// Power-on default
    X1 = 0,
    X4 = 1,
    X16 = 2,
    X64 = 3,
    X128 = 4,
    X256 = 5,
    X512 = 6,
    X1024 = 7,
}

impl Averaging {
    /// Sample count
    pub const fn samples(self) -> u16 {
        match self {
            Self::X1 => 1,
            Self::X4 => 4,
            Self::X16 => 16,
            Self::X64 => 64,
            Self::X128 => 128,
            Self::X256 => 256,
            Self::X512 => 512,
            Self::X1024 => 1024,
        }
    }
}

/// Which sub-field of the configuration word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeField {
    OperationMode,
    ShuntConversion,
    BusConversion,
    Averaging,
}

/// Configuration value rejected by [`SensorModes::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeError {
    /// Field value does not fit in its 3 bits
    FieldOutOfRange { field: ModeField, value: u8 },
}

/// Configuration register contents
///
/// Fields hold raw datasheet codes so any value can be expressed; use
/// [`SensorModes::new`] for the typed form. Packing masks each field to
/// its width, so an out-of-range code never spills into its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorModes {
    /// Operating mode code (3 bits)
    pub operation_mode: u8,
    /// Shunt voltage conversion time code (3 bits)
    pub shunt_voltage_conversion_setting: u8,
    /// Bus voltage conversion time code (3 bits)
    pub bus_voltage_conversion_setting: u8,
    /// Averaging code (3 bits)
    pub average_mode_setting: u8,
    /// Reset all registers to power-on values (self-clearing)
    pub reset_registers: bool,
}

impl Default for SensorModes {
    /// Continuous shunt and bus, 1.1 ms conversions, no averaging
    fn default() -> Self {
        Self::new(
            OperatingMode::ShuntAndBusContinuous,
            ConversionTime::Us1100,
            ConversionTime::Us1100,
            Averaging::X1,
        )
    }
}

impl SensorModes {
    /// Create from typed fields, reset bit clear
    pub const fn new(
        mode: OperatingMode,
        shunt_conversion: ConversionTime,
        bus_conversion: ConversionTime,
        averaging: Averaging,
    ) -> Self {
        Self {
            operation_mode: mode as u8,
            shunt_voltage_conversion_setting: shunt_conversion as u8,
            bus_voltage_conversion_setting: bus_conversion as u8,
            average_mode_setting: averaging as u8,
            reset_registers: false,
        }
    }

    /// Only the reset bit set
    pub const fn reset() -> Self {
        Self {
            operation_mode: 0,
            shunt_voltage_conversion_setting: 0,
            bus_voltage_conversion_setting: 0,
            average_mode_setting: 0,
            reset_registers: true,
        }
    }

    /// Same settings with the reset bit set
    pub const fn with_reset(mut self) -> Self {
        self.reset_registers = true;
        self
    }

    fn fields(&self) -> [(ModeField, u8); 4] {
        [
            (ModeField::OperationMode, self.operation_mode),
            (ModeField::ShuntConversion, self.shunt_voltage_conversion_setting),
            (ModeField::BusConversion, self.bus_voltage_conversion_setting),
            (ModeField::Averaging, self.average_mode_setting),
        ]
    }

    /// Reject any field wider than 3 bits
    pub fn validate(&self) -> Result<(), ModeError> {
        for (field, value) in self.fields() {
            if value > FIELD_MASK {
                return Err(ModeError::FieldOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Pack into the configuration register word
    ///
    /// Out-of-range fields are masked to 3 bits.
    pub fn to_word(&self) -> u16 {
        #[cfg(feature = "defmt")]
        if let Err(ModeError::FieldOutOfRange { field, value }) = self.validate() {
            defmt::warn!("config field {} = {} masked to 3 bits", field, value);
        }

        let mask = |v: u8| (v & FIELD_MASK) as u16;

        mask(self.operation_mode)
            | (mask(self.shunt_voltage_conversion_setting) << SHUNT_CT_SHIFT)
            | (mask(self.bus_voltage_conversion_setting) << BUS_CT_SHIFT)
            | (mask(self.average_mode_setting) << AVG_SHIFT)
            | ((self.reset_registers as u16) << RESET_SHIFT)
    }
}

impl From<SensorModes> for u16 {
    fn from(modes: SensorModes) -> u16 {
        modes.to_word()
    }
}
