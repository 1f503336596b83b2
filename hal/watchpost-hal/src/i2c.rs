//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by chip-specific HALs. The character display sits behind an I2C
//! port expander and is driven through [`I2cBus`].

/// I2C bus master
///
/// The display only ever writes; no read path is needed.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a single byte
    ///
    /// Port expanders such as the PCF8574 latch one byte per transfer.
    fn write_byte(&mut self, address: u8, byte: u8) -> Result<(), Self::Error> {
        self.write(address, &[byte])
    }
}

/// I2C configuration
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 100_000, // 100kHz standard mode
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz), what PCF8574 backpacks are rated for
    pub const STANDARD: Self = Self { frequency: 100_000 };
}
