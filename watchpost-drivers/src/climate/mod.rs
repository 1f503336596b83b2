//! Temperature and humidity sensors

pub mod dht11;

pub use dht11::{ClimateFrame, Dht11, DEFAULT_MIN_INTERVAL_MS};
