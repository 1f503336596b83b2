//! Absolute-deadline period tracking
//!
//! A task that sleeps for "period" after finishing its work drifts by
//! the work's duration every cycle. Instead each task keeps the time
//! it was *scheduled* to wake and adds the period to that.

/// Next scheduled wake of a periodic task, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodicDeadline {
    next_us: u64,
    period_us: u64,
}

impl PeriodicDeadline {
    /// First wake is one period after `start_us`
    pub const fn new(start_us: u64, period_us: u64) -> Self {
        Self {
            next_us: start_us + period_us,
            period_us,
        }
    }

    pub const fn from_millis(start_us: u64, period_ms: u32) -> Self {
        Self::new(start_us, period_ms as u64 * 1_000)
    }

    /// Time of the pending wake
    pub const fn deadline(&self) -> u64 {
        self.next_us
    }

    pub const fn period_us(&self) -> u64 {
        self.period_us
    }

    /// Move to the following wake and return it
    ///
    /// Always previous deadline + period, regardless of when the
    /// caller actually ran.
    pub fn advance(&mut self) -> u64 {
        self.next_us += self.period_us;
        self.next_us
    }

    /// Change the period from the next advance on
    ///
    /// The pending deadline is kept.
    pub fn set_period_us(&mut self, period_us: u64) {
        self.period_us = period_us;
    }

    /// True if `now_us` is already past the pending wake
    ///
    /// Sleeping until an overrun deadline returns immediately, which
    /// is how a late cycle catches up without shifting later ones.
    pub fn is_overrun(&self, now_us: u64) -> bool {
        now_us > self.next_us
    }
}
