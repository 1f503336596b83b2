//! Motion detectors

pub mod pir;

pub use pir::{Pir, DEFAULT_DEBOUNCE_MS};
