//! INA226 current/power monitor (I2C)
//!
//! # Register Protocol
//!
//! Every register is 16 bits, accessed through a register pointer:
//! - Read: write `[reg]`, then read 2 bytes (STOP in between, no repeated start)
//! - Write: write `[reg, low, high]` in one transaction
//!
//! Bytes travel low byte first in both directions.
//!
//! # Scaling
//!
//! `current`, `voltage` and `power` use the fixed resolutions 1 mA,
//! 1.25 mV and 25 mW per bit. `calibrated_current` and `calibrated_power`
//! use the current LSB derived from the configured maximum current.
//! The alert limit is always handled raw; its meaning depends on which
//! alert function is enabled in the mask/enable register.

use ina226_core::config::{DeviceConfig, WriteStatusPolicy};
use ina226_core::registers::{from_wire, write_frame, MaskEnable, Register};
use ina226_core::traits::PowerMonitor;
use ina226_core::{units, Calibration, SensorModes};
use ina226_hal::{to_wire_address, I2cBus, I2cConfig, OpenI2cBus};

/// INA226 driver
///
/// Owns the bus for its lifetime. Holds no register state: every call is
/// an independent transaction and the chip's configuration lives only on
/// the chip.
pub struct Ina226<B> {
    bus: B,
    /// 8-bit wire address
    address: u8,
    calibration: Calibration,
    write_status: WriteStatusPolicy,
}

impl<B> Ina226<B> {
    /// Create a driver on an already initialised bus
    ///
    /// Derives the current LSB from the config. No bus traffic.
    pub fn new(bus: B, config: &DeviceConfig) -> Self {
        Self {
            bus,
            address: to_wire_address(config.address),
            calibration: config.calibration(),
            write_status: config.write_status,
        }
    }

    /// 8-bit wire address (7-bit address << 1)
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Current resolution in A/bit
    pub fn current_lsb(&self) -> f32 {
        self.calibration.current_lsb
    }

    /// Shunt resistance in ohms
    pub fn shunt_resistance(&self) -> f32 {
        self.calibration.shunt_resistance
    }

    /// Calibration parameters
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Rounded calibration value before it is cut to 16 bits
    pub fn calibration_value(&self) -> u32 {
        self.calibration.value()
    }

    /// Borrow the bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Destroy the driver and give back the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: OpenI2cBus> Ina226<B> {
    /// Open the bus on the configured pins, then create the driver
    pub fn open(config: &DeviceConfig, i2c_config: I2cConfig) -> Result<Self, B::Error> {
        let bus = B::open(config.pins.sda, config.pins.scl, i2c_config)?;
        Ok(Self::new(bus, config))
    }
}

impl<B: I2cBus> Ina226<B> {
    /// Read a raw register value
    ///
    /// Pointer write, then a separate two-byte read.
    pub fn read_register(&mut self, register: Register) -> Result<u16, B::Error> {
        let mut buf = [register.addr(), 0x00];

        self.bus.write(self.address, &buf[..1])?;
        self.bus.read(self.address, &mut buf, false)?;

        let value = from_wire(buf);

        #[cfg(feature = "defmt")]
        defmt::trace!("INA226 read {} = {=u16:#x}", register, value);

        Ok(value)
    }

    /// Write a raw register value
    ///
    /// Always returns the transport result, whatever the write policy.
    pub fn write_register(&mut self, register: Register, value: u16) -> Result<(), B::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("INA226 write {} = {=u16:#x}", register, value);

        self.bus.write(self.address, &write_frame(register, value))
    }

    /// Write a register and apply the configured write policy
    fn write_with_policy(&mut self, register: Register, value: u16) -> Result<(), B::Error> {
        match (self.write_register(register, value), self.write_status) {
            (Err(_), WriteStatusPolicy::AlwaysSucceed) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("INA226 write to {} failed, reporting success", register);
                Ok(())
            }
            (result, _) => result,
        }
    }

    /// Current in amps (1 mA/bit)
    pub fn current(&mut self) -> Result<f32, B::Error> {
        self.read_register(Register::Current).map(units::current_amps)
    }

    /// Voltage in volts (1.25 mV/bit)
    pub fn voltage(&mut self) -> Result<f32, B::Error> {
        self.read_register(Register::Voltage).map(units::voltage_volts)
    }

    /// Power in watts (25 mW/bit)
    pub fn power(&mut self) -> Result<f32, B::Error> {
        self.read_register(Register::Power).map(units::power_watts)
    }

    /// Bus voltage in volts (1.25 mV/bit)
    pub fn bus_voltage(&mut self) -> Result<f32, B::Error> {
        self.read_register(Register::BusVoltage).map(units::voltage_volts)
    }

    /// Shunt voltage register as a signed value
    pub fn shunt_voltage_raw(&mut self) -> Result<i16, B::Error> {
        self.read_register(Register::Voltage).map(|raw| raw as i16)
    }

    /// Shunt voltage in volts (2.5 µV/bit)
    pub fn shunt_voltage(&mut self) -> Result<f32, B::Error> {
        self.shunt_voltage_raw().map(units::shunt_volts)
    }

    /// Current in amps using the calibrated current LSB
    ///
    /// Only meaningful after [`Ina226::calibrate`]. The register is two's
    /// complement, so reverse current reads negative.
    pub fn calibrated_current(&mut self) -> Result<f32, B::Error> {
        let lsb = self.calibration.current_lsb;
        self.read_register(Register::Current).map(|raw| raw as i16 as f32 * lsb)
    }

    /// Power in watts using the calibrated power LSB (25 × current LSB)
    pub fn calibrated_power(&mut self) -> Result<f32, B::Error> {
        let lsb = self.calibration.power_lsb();
        self.read_register(Register::Power).map(|raw| raw as f32 * lsb)
    }

    /// Raw alert limit register
    pub fn alert_limit(&mut self) -> Result<u16, B::Error> {
        self.read_register(Register::AlertLimit)
    }

    /// Read the mask/enable register
    ///
    /// Reading clears the conversion ready flag, and the alert flag in
    /// latch mode.
    pub fn mask_enable(&mut self) -> Result<MaskEnable, B::Error> {
        self.read_register(Register::MaskEnable).map(MaskEnable)
    }

    /// Manufacturer ID (0x5449 for TI parts)
    pub fn manufacturer_id(&mut self) -> Result<u16, B::Error> {
        self.read_register(Register::ManufacturerId)
    }

    /// Die ID (0x2260 for the INA226)
    pub fn die_id(&mut self) -> Result<u16, B::Error> {
        self.read_register(Register::DieId)
    }

    /// Write the configuration register
    ///
    /// Fields wider than their 3 bits are masked rather than rejected;
    /// call [`SensorModes::validate`] first for strict checking.
    pub fn configure(&mut self, modes: SensorModes) -> Result<(), B::Error> {
        let word = modes.to_word();

        #[cfg(feature = "defmt")]
        defmt::debug!("INA226 config word {=u16:#x}", word);

        self.write_with_policy(Register::Config, word)
    }

    /// Write the calibration register
    ///
    /// `CAL = 0.00512 / (current_lsb × R_shunt)`, rounded to nearest; only
    /// the low 16 bits are sent.
    pub fn calibrate(&mut self) -> Result<(), B::Error> {
        let word = self.calibration.register_word();

        #[cfg(feature = "defmt")]
        {
            if self.calibration.overflows() {
                defmt::warn!(
                    "INA226 calibration {=u32} exceeds 16 bits, sending {=u16}",
                    self.calibration.value(),
                    word
                );
            }
            defmt::debug!("INA226 calibration word {=u16}", word);
        }

        self.write_with_policy(Register::Calibration, word)
    }

    /// Write the mask/enable register
    ///
    /// Accepts a raw word or [`MaskEnable`] flags; bits are not checked.
    pub fn set_mask_enable(&mut self, bits: impl Into<u16>) -> Result<(), B::Error> {
        self.write_with_policy(Register::MaskEnable, bits.into())
    }

    /// Write the raw alert limit register
    pub fn set_alert_limit(&mut self, limit: u16) -> Result<(), B::Error> {
        self.write_with_policy(Register::AlertLimit, limit)
    }
}

impl<B: I2cBus> PowerMonitor for Ina226<B> {
    type Error = B::Error;

    fn read_current_amps(&mut self) -> Result<f32, Self::Error> {
        self.current()
    }

    fn read_voltage_volts(&mut self) -> Result<f32, Self::Error> {
        self.voltage()
    }

    fn read_power_watts(&mut self) -> Result<f32, Self::Error> {
        self.power()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ina226_core::registers::reg;
    use ina226_core::{Averaging, ConversionTime, OperatingMode};
    use ina226_hal::{I2cTransaction, MockError, MockI2c};
    use proptest::prelude::*;

    fn driver() -> Ina226<MockI2c> {
        Ina226::new(MockI2c::new(), &DeviceConfig::new(1.0, 0.002, 0x40))
    }

    /// Data bytes of the last write on the bus
    fn last_write(ina: &Ina226<MockI2c>) -> &[u8] {
        match ina.bus().transactions().last() {
            Some(I2cTransaction::Write { data, .. }) => data.as_slice(),
            other => panic!("expected a write, got {:?}", other),
        }
    }

    #[test]
    fn test_construction_is_silent() {
        let ina = driver();
        assert!(ina.bus().transactions().is_empty());
    }

    #[test]
    fn test_wire_address() {
        let mut ina = driver();
        assert_eq!(ina.address(), 0x80);

        ina.current().unwrap();
        for t in ina.bus().transactions() {
            match t {
                I2cTransaction::Write { address, .. } | I2cTransaction::Read { address, .. } => {
                    assert_eq!(*address, 0x80)
                }
            }
        }
    }

    #[test]
    fn test_read_transaction_shape() {
        let mut ina = driver();
        ina.voltage().unwrap();

        let transactions = ina.bus().transactions();
        assert_eq!(transactions.len(), 2);
        match &transactions[0] {
            I2cTransaction::Write { address, data } => {
                assert_eq!(*address, 0x80);
                assert_eq!(data.as_slice(), &[reg::VOLTAGE]);
            }
            other => panic!("expected pointer write, got {:?}", other),
        }
        assert_eq!(
            transactions[1],
            I2cTransaction::Read {
                address: 0x80,
                len: 2,
                repeated_start: false,
            }
        );
    }

    #[test]
    fn test_little_endian_reassembly() {
        let mut ina = driver();
        ina.bus_mut().queue_read(&[0x34, 0x12]);
        assert_eq!(ina.alert_limit().unwrap(), 0x1234);
    }

    #[test]
    fn test_scaled_reads() {
        let mut ina = driver();
        ina.bus_mut().set_register(reg::CURRENT, 1500);
        ina.bus_mut().set_register(reg::VOLTAGE, 9600);
        ina.bus_mut().set_register(reg::POWER, 720);

        assert!((ina.current().unwrap() - 1.5).abs() < 1e-6);
        assert!((ina.voltage().unwrap() - 12.0).abs() < 1e-5);
        assert!((ina.power().unwrap() - 18.0).abs() < 1e-5);
    }

    #[test]
    fn test_configure_mode_only() {
        let mut ina = driver();
        let modes = SensorModes {
            operation_mode: 0b111,
            shunt_voltage_conversion_setting: 0,
            bus_voltage_conversion_setting: 0,
            average_mode_setting: 0,
            reset_registers: false,
        };
        ina.configure(modes).unwrap();

        assert_eq!(last_write(&ina), &[reg::CONFIG, 0x07, 0x00]);
    }

    #[test]
    fn test_configure_reset_only() {
        let mut ina = driver();
        ina.configure(SensorModes::reset()).unwrap();

        assert_eq!(last_write(&ina), &[reg::CONFIG, 0x00, 0x80]);
    }

    #[test]
    fn test_configure_typed() {
        let mut ina = driver();
        ina.configure(SensorModes::new(
            OperatingMode::ShuntAndBusContinuous,
            ConversionTime::Us1100,
            ConversionTime::Us1100,
            Averaging::X16,
        ))
        .unwrap();

        assert_eq!(ina.bus().register(reg::CONFIG), 0x0527);
    }

    #[test]
    fn test_configure_masks_out_of_range() {
        let mut ina = driver();
        let mut modes = SensorModes::default();
        modes.operation_mode = 0x0F;
        ina.configure(modes).unwrap();

        // Bit 3 (shunt conversion field) untouched by the oversized mode
        assert_eq!(ina.bus().register(reg::CONFIG), 0x0127);
    }

    #[test]
    fn test_calibrate() {
        let mut ina = driver();
        assert!((ina.current_lsb() - 3.0518e-5).abs() < 1e-8);
        assert_eq!(ina.calibration_value(), 83886);

        ina.calibrate().unwrap();
        assert_eq!(last_write(&ina), &[reg::CALIBRATION, 0xAE, 0x47]);
    }

    #[test]
    fn test_calibrate_in_range() {
        let config = DeviceConfig::new(3.2768, 0.1, 0x41);
        let mut ina = Ina226::new(MockI2c::new(), &config);
        ina.calibrate().unwrap();

        assert_eq!(ina.bus().register(reg::CALIBRATION), 512);
        assert_eq!(ina.address(), 0x82);
    }

    #[test]
    fn test_calibrated_reads() {
        let config = DeviceConfig::new(3.2768, 0.1, 0x40);
        let mut ina = Ina226::new(MockI2c::new(), &config);
        ina.bus_mut().set_register(reg::CURRENT, 10_000);
        ina.bus_mut().set_register(reg::POWER, 400);

        // 100 µA/bit and 2.5 mW/bit
        assert!((ina.calibrated_current().unwrap() - 1.0).abs() < 1e-5);
        assert!((ina.calibrated_power().unwrap() - 1.0).abs() < 1e-5);

        ina.bus_mut().set_register(reg::CURRENT, (-10_000i16) as u16);
        assert!((ina.calibrated_current().unwrap() + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_shunt_and_bus_voltage() {
        let mut ina = driver();
        ina.bus_mut().set_register(reg::VOLTAGE, (-400i16) as u16);
        ina.bus_mut().set_register(reg::BUS_VOLTAGE, 4000);

        assert_eq!(ina.shunt_voltage_raw().unwrap(), -400);
        assert!((ina.shunt_voltage().unwrap() + 0.001).abs() < 1e-9);
        assert!((ina.bus_voltage().unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_mask_enable() {
        let mut ina = driver();
        ina.set_mask_enable(MaskEnable::BUS_UNDER_VOLTAGE | MaskEnable::ALERT_LATCH).unwrap();
        assert_eq!(last_write(&ina), &[reg::MASK_ENABLE, 0x01, 0x10]);

        ina.set_mask_enable(0x8000u16).unwrap();
        let mask = ina.mask_enable().unwrap();
        assert!(mask.contains(MaskEnable::SHUNT_OVER_VOLTAGE));
    }

    #[test]
    fn test_alert_limit_round_trip() {
        let mut ina = driver();
        ina.set_alert_limit(0xBEEF).unwrap();
        assert_eq!(last_write(&ina), &[reg::ALERT_LIMIT, 0xEF, 0xBE]);
        assert_eq!(ina.alert_limit().unwrap(), 0xBEEF);
    }

    #[test]
    fn test_identification() {
        let mut ina = driver();
        ina.bus_mut().set_register(reg::MANUFACTURER_ID, 0x5449);
        ina.bus_mut().set_register(reg::DIE_ID, 0x2260);

        assert_eq!(ina.manufacturer_id().unwrap(), 0x5449);
        assert_eq!(ina.die_id().unwrap(), 0x2260);
    }

    #[test]
    fn test_read_error_propagates_without_retry() {
        let mut ina = driver();
        ina.bus_mut().set_failing(true);

        assert_eq!(ina.current(), Err(MockError::Nack));
        // Pointer write failed; no read attempted, no second try
        assert_eq!(ina.bus().transactions().len(), 1);

        ina.bus_mut().clear_transactions();
        assert_eq!(ina.voltage(), Err(MockError::Nack));
        assert_eq!(ina.power(), Err(MockError::Nack));
        assert_eq!(ina.alert_limit(), Err(MockError::Nack));
        assert_eq!(ina.bus().transactions().len(), 3);
    }

    #[test]
    fn test_failed_register_read_propagates_without_retry() {
        let mut ina = driver();
        ina.bus_mut().set_failing_reads(true);

        assert_eq!(ina.current(), Err(MockError::Nack));
        // Pointer write went out, the read failed, nothing after it
        let transactions = ina.bus().transactions();
        assert_eq!(transactions.len(), 2);
        assert!(matches!(transactions[0], I2cTransaction::Write { .. }));
        assert!(matches!(transactions[1], I2cTransaction::Read { .. }));

        ina.bus_mut().clear_transactions();
        assert_eq!(ina.alert_limit(), Err(MockError::Nack));
        assert_eq!(ina.bus().transactions().len(), 2);
    }

    #[test]
    fn test_write_error_propagates_by_default() {
        let mut ina = driver();
        ina.bus_mut().set_failing(true);

        assert_eq!(ina.calibrate(), Err(MockError::Nack));
        assert_eq!(ina.configure(SensorModes::default()), Err(MockError::Nack));
        assert_eq!(ina.set_alert_limit(1), Err(MockError::Nack));
        assert_eq!(ina.set_mask_enable(1u16), Err(MockError::Nack));
    }

    #[test]
    fn test_always_succeed_policy() {
        let mut config = DeviceConfig::new(1.0, 0.002, 0x40);
        config.write_status = WriteStatusPolicy::AlwaysSucceed;
        let mut ina = Ina226::new(MockI2c::new(), &config);
        ina.bus_mut().set_failing(true);

        assert_eq!(ina.calibrate(), Ok(()));
        assert_eq!(ina.configure(SensorModes::default()), Ok(()));
        assert_eq!(ina.set_alert_limit(1), Ok(()));
        assert_eq!(ina.set_mask_enable(1u16), Ok(()));
        // Raw writes and reads still report the failure
        assert_eq!(ina.write_register(Register::AlertLimit, 1), Err(MockError::Nack));
        assert_eq!(ina.current(), Err(MockError::Nack));
    }

    #[test]
    fn test_open_on_configured_pins() {
        let mut config = DeviceConfig::new(1.0, 0.002, 0x44);
        config.pins.sda = 16;
        config.pins.scl = 17;

        let ina: Ina226<MockI2c> = Ina226::open(&config, I2cConfig::FAST).unwrap();
        assert_eq!(ina.bus().opened_on(), Some((16, 17, I2cConfig::FAST)));
        assert_eq!(ina.address(), 0x88);
        assert!(ina.bus().transactions().is_empty());
    }

    #[test]
    fn test_from_toml_config() {
        let config = DeviceConfig::from_toml(
            r#"
            [ina226]
            max_expected_current = 3.2768
            shunt_resistance = 0.1
            address = 0x4A
            "#,
        )
        .unwrap();

        let mut ina = Ina226::new(MockI2c::new(), &config);
        ina.calibrate().unwrap();
        assert_eq!(ina.address(), 0x94);
        assert_eq!(ina.bus().register(reg::CALIBRATION), 512);
    }

    #[test]
    fn test_power_monitor_read_all() {
        let mut ina = driver();
        ina.bus_mut().set_register(reg::CURRENT, 2000);
        ina.bus_mut().set_register(reg::VOLTAGE, 4000);
        ina.bus_mut().set_register(reg::POWER, 400);

        let m = ina.read_all().unwrap();
        assert!((m.current - 2.0).abs() < 1e-6);
        assert!((m.voltage - 5.0).abs() < 1e-5);
        assert!((m.power - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_release_returns_bus() {
        let mut ina = driver();
        ina.set_alert_limit(7).unwrap();
        let bus = ina.release();
        assert_eq!(bus.register(reg::ALERT_LIMIT), 7);
    }

    proptest! {
        #[test]
        fn prop_scaling_matches_resolution(v in any::<u16>()) {
            let mut ina = driver();
            ina.bus_mut().set_register(reg::CURRENT, v);
            ina.bus_mut().set_register(reg::VOLTAGE, v);
            ina.bus_mut().set_register(reg::POWER, v);

            prop_assert_eq!(ina.current().unwrap(), v as f32 * 0.001);
            prop_assert_eq!(ina.voltage().unwrap(), v as f32 * 0.00125);
            prop_assert_eq!(ina.power().unwrap(), v as f32 * 0.025);
        }

        #[test]
        fn prop_alert_limit_round_trip(limit in any::<u16>()) {
            let mut ina = driver();
            ina.set_alert_limit(limit).unwrap();
            prop_assert_eq!(ina.alert_limit().unwrap(), limit);
        }
    }
}
