//! Display consumer for the sensor snapshot
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays
//! - `Screen`, a text buffer sized to the attached display
//! - Status-line formatting for a [`SensorReading`](watchpost_core::state::SensorReading)
//! - An HD44780 LCD driver behind a PCF8574 I2C expander
//!
//! # Architecture
//!
//! The display task copies the snapshot out of the store, formats it
//! into a `Screen` and hands the screen to a backend. Nothing in this
//! crate touches the store lock.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod lcd1602;
pub mod screen;
pub mod status;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use lcd1602::Lcd1602;
pub use screen::{Screen, MAX_COLS, MAX_ROWS};
pub use status::{banner_lines, round_half_away, status_lines, StatusLine};
