//! RP2040-specific HAL for the sensor node firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `watchpost-hal` traits:
//!
//! - GPIO adapters over embassy-rp `Input`, `Output` and `Flex`
//! - Microsecond clock over embassy-time
//! - I2C bus adapter over any blocking embedded-hal I2C
//! - Dynamic pin allocation for config-driven setup

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod pins;
pub mod time;

pub use gpio::{RpFlex, RpInput, RpOutput};
pub use i2c::I2cAdapter;
pub use pins::{PinBank, PinError, RemainingPeripherals};
pub use time::EmbassyClock;
