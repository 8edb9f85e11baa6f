//! Mock I2C implementation for testing
//!
//! Behaves like a register-pointer device: a one-byte write selects a
//! register, a three-byte write stores `[reg, low, high]`, and a read
//! returns the selected register low byte first.

use heapless::Vec;

use crate::i2c::{I2cBus, I2cConfig, OpenI2cBus};

/// Maximum number of transactions kept in the log
pub const MAX_TRANSACTIONS: usize = 64;

/// Maximum bytes recorded per write
pub const MAX_WRITE_LEN: usize = 8;

/// Error returned when the mock is set to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockError {
    /// Device did not acknowledge
    Nack,
}

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write {
        address: u8,
        data: Vec<u8, MAX_WRITE_LEN>,
    },
    /// Read transaction
    Read {
        address: u8,
        len: usize,
        repeated_start: bool,
    },
}

/// Mock I2C bus
///
/// Records all transactions for test verification. Failed transactions
/// are recorded too, so tests can count attempts.
#[derive(Debug)]
pub struct MockI2c {
    registers: [u16; 256],
    pointer: u8,
    transactions: Vec<I2cTransaction, MAX_TRANSACTIONS>,
    /// Raw bytes returned by the next reads, ahead of the register file
    queued: Vec<u8, 16>,
    failing: bool,
    failing_reads: bool,
    opened_on: Option<(u8, u8, I2cConfig)>,
}

impl Default for MockI2c {
    fn default() -> Self {
        Self::new()
    }
}

impl MockI2c {
    /// Create a mock with every register zeroed
    pub fn new() -> Self {
        Self {
            registers: [0; 256],
            pointer: 0,
            transactions: Vec::new(),
            queued: Vec::new(),
            failing: false,
            failing_reads: false,
            opened_on: None,
        }
    }

    /// Preload a register value
    pub fn set_register(&mut self, register: u8, value: u16) {
        self.registers[register as usize] = value;
    }

    /// Current value of a register
    pub fn register(&self, register: u8) -> u16 {
        self.registers[register as usize]
    }

    /// Bytes to hand out verbatim on the next reads
    pub fn queue_read(&mut self, bytes: &[u8]) {
        for &b in bytes {
            let _ = self.queued.push(b);
        }
    }

    /// Make every following transaction fail with NACK
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Make reads fail with NACK while writes still succeed
    pub fn set_failing_reads(&mut self, failing: bool) {
        self.failing_reads = failing;
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[I2cTransaction] {
        &self.transactions
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Pins and config passed to [`OpenI2cBus::open`], if opened that way
    pub fn opened_on(&self) -> Option<(u8, u8, I2cConfig)> {
        self.opened_on
    }

    fn record(&mut self, transaction: I2cTransaction) {
        // Log is bounded; later transactions are dropped once full
        let _ = self.transactions.push(transaction);
    }
}

impl I2cBus for MockI2c {
    type Error = MockError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.record(I2cTransaction::Write {
            address,
            data: data.iter().take(MAX_WRITE_LEN).copied().collect(),
        });
        if self.failing {
            return Err(MockError::Nack);
        }

        if let Some(&register) = data.first() {
            self.pointer = register;
        }
        if data.len() >= 3 {
            self.registers[self.pointer as usize] = u16::from_le_bytes([data[1], data[2]]);
        }
        Ok(())
    }

    fn read(
        &mut self,
        address: u8,
        buf: &mut [u8],
        repeated_start: bool,
    ) -> Result<(), Self::Error> {
        self.record(I2cTransaction::Read {
            address,
            len: buf.len(),
            repeated_start,
        });
        if self.failing || self.failing_reads {
            return Err(MockError::Nack);
        }

        let value = self.registers[self.pointer as usize].to_le_bytes();
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = if self.queued.is_empty() {
                value.get(i).copied().unwrap_or(0)
            } else {
                self.queued.remove(0)
            };
        }
        Ok(())
    }
}

impl OpenI2cBus for MockI2c {
    fn open(sda: u8, scl: u8, config: I2cConfig) -> Result<Self, Self::Error> {
        let mut bus = Self::new();
        bus.opened_on = Some((sda, scl, config));
        Ok(bus)
    }
}
