//! I2C bus adapter
//!
//! Wraps any blocking embedded-hal 1.0 I2C master, in practice
//! `embassy_rp::i2c::I2c<'_, I2C0, Blocking>`.

use embassy_rp::i2c::{self, Blocking, I2c, SclPin, SdaPin};
use embassy_rp::peripherals::I2C0;
use embassy_rp::Peri;
use watchpost_hal::i2c::{I2cBus, I2cConfig};

/// [`I2cBus`] over an embedded-hal I2C master
pub struct I2cAdapter<B>(B);

impl I2cAdapter<I2c<'static, I2C0, Blocking>> {
    /// Blocking I2C0 master at the given bus speed
    pub fn i2c0(
        peri: Peri<'static, I2C0>,
        scl: Peri<'static, impl SclPin<I2C0>>,
        sda: Peri<'static, impl SdaPin<I2C0>>,
        config: I2cConfig,
    ) -> Self {
        let mut cfg = i2c::Config::default();
        cfg.frequency = config.frequency;
        Self(I2c::new_blocking(peri, scl, sda, cfg))
    }
}

impl<B: embedded_hal::i2c::I2c> I2cBus for I2cAdapter<B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }
}
