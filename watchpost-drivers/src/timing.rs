//! Bounded busy-wait helpers
//!
//! The sensors answer with pulses a few tens of microseconds wide, too
//! short for an async timer. These helpers poll a pin against a
//! [`Monotonic`] clock and give up once a window has elapsed.

use watchpost_core::traits::SensorError;
use watchpost_hal::{InputPin, Level, Monotonic};

fn level_of<P: InputPin + ?Sized>(pin: &P) -> Level {
    Level::from(pin.is_high())
}

/// Poll until `pin` reads `level`
///
/// Returns the timestamp at which the level was observed, or
/// [`SensorError::Timeout`] once more than `timeout_us` has elapsed
/// since the call.
pub fn wait_for_level<P, C>(
    pin: &P,
    clock: &C,
    level: Level,
    timeout_us: u32,
) -> Result<u64, SensorError>
where
    P: InputPin + ?Sized,
    C: Monotonic + ?Sized,
{
    wait_for_level_since(pin, clock, level, clock.now_us(), timeout_us)
}

/// Poll until `pin` reads `level`, with the window starting at `since_us`
pub fn wait_for_level_since<P, C>(
    pin: &P,
    clock: &C,
    level: Level,
    since_us: u64,
    timeout_us: u32,
) -> Result<u64, SensorError>
where
    P: InputPin + ?Sized,
    C: Monotonic + ?Sized,
{
    loop {
        let now = clock.now_us();
        if level_of(pin) == level {
            return Ok(now);
        }
        if now.saturating_sub(since_us) > u64::from(timeout_us) {
            return Err(SensorError::Timeout);
        }
    }
}

/// Width of the next pulse at `level`, in microseconds
///
/// Waits up to `timeout_us` for `level` to appear, then up to another
/// `timeout_us` measured from that transition for it to end. The two
/// windows are independent: a slow start does not shorten the pulse
/// that can be measured.
pub fn measure_pulse<P, C>(
    pin: &P,
    clock: &C,
    level: Level,
    timeout_us: u32,
) -> Result<u32, SensorError>
where
    P: InputPin + ?Sized,
    C: Monotonic + ?Sized,
{
    let start = wait_for_level(pin, clock, level, timeout_us)?;
    let end = wait_for_level_since(pin, clock, !level, start, timeout_us)?;
    Ok(u32::try_from(end - start).unwrap_or(u32::MAX))
}
