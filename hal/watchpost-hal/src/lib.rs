//! Watchpost Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the sensor drivers
//! and the display are written against. Chip-specific crates implement
//! them, host tests implement them with simulated lines and clocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  watchpost-drivers, watchpost-display   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  watchpost-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ watchpost-hal-│       │  host test    │
//! │    rp2040     │       │  simulators   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::FlexPin`] - Direction-switching single-wire line
//! - [`time::Monotonic`] - Microsecond timestamps
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{FlexPin, InputPin, Level, OutputPin};
pub use i2c::I2cBus;
pub use time::Monotonic;
