//! Distance sensors

pub mod hcsr04;

pub use hcsr04::{pulse_width_to_cm, HcSr04, DEFAULT_TIMEOUT_US};
