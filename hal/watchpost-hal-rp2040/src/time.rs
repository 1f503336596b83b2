//! Monotonic clock backed by the embassy time driver

use embassy_time::Instant;
use watchpost_hal::Monotonic;

/// Reads the RP2040 1MHz system timer through embassy-time
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
