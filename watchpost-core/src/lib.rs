//! Board-agnostic core logic for the sensor node firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor traits and the shared error taxonomy
//! - The shared sensor snapshot and its per-owner writers
//! - Task descriptors and absolute-deadline period tracking
//! - Configuration type definitions and validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod scheduler;
pub mod state;
pub mod traits;
