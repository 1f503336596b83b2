//! HC-SR501 passive infrared motion detector
//!
//! The module drives its output high while it sees motion. The driver
//! reports that level as-is and counts rising edges, ignoring any that
//! follow a counted edge within the debounce window.

use watchpost_core::traits::MotionSensor;
use watchpost_hal::{InputPin, Monotonic};

/// Default debounce window
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// PIR edge detector
pub struct Pir<P, C> {
    pin: P,
    clock: C,
    debounce_us: u64,
    last_level: bool,
    /// Time of the last counted edge
    last_trigger_us: Option<u64>,
    motion_count: u32,
}

impl<P: InputPin, C: Monotonic> Pir<P, C> {
    /// Create a detector
    ///
    /// The line is assumed low at start, so a line that is already high
    /// counts as an edge on the first read. A `debounce_ms` of 0
    /// counts every rising edge.
    pub fn new(pin: P, clock: C, debounce_ms: u32) -> Self {
        Self {
            pin,
            clock,
            debounce_us: u64::from(debounce_ms) * 1_000,
            last_level: false,
            last_trigger_us: None,
            motion_count: 0,
        }
    }

    pub fn debounce_ms(&self) -> u32 {
        (self.debounce_us / 1_000) as u32
    }
}

impl<P: InputPin, C: Monotonic> MotionSensor for Pir<P, C> {
    fn read(&mut self) -> bool {
        let level = self.pin.is_high();

        if level && !self.last_level {
            let now = self.clock.now_us();
            let outside_window = match self.last_trigger_us {
                None => true,
                Some(last) => now.saturating_sub(last) >= self.debounce_us,
            };
            if outside_window {
                self.motion_count = self.motion_count.wrapping_add(1);
                self.last_trigger_us = Some(now);
                debug!("pir: motion event {}", self.motion_count);
            }
        }

        self.last_level = level;
        level
    }

    fn motion_count(&self) -> u32 {
        self.motion_count
    }

    fn reset_motion_count(&mut self) {
        self.motion_count = 0;
    }
}
