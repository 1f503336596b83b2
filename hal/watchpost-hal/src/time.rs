//! Monotonic time source
//!
//! The sensor protocols are timed in microseconds. Drivers read the
//! current time through this trait so the same code runs against the
//! hardware timer and against a simulated clock in tests.

/// Free-running microsecond clock
///
/// The value never decreases. At one tick per microsecond a `u64`
/// does not wrap within the lifetime of a device.
pub trait Monotonic {
    /// Microseconds since an arbitrary fixed origin (usually boot)
    fn now_us(&self) -> u64;
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
