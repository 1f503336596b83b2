//! Status line formatting
//!
//! ```text
//! M:Y D:17cm
//! T:23C H:40%
//! ```

use core::fmt::Write;

use heapless::String;
use watchpost_core::state::SensorReading;

use crate::screen::MAX_COLS;

/// One formatted display line
pub type StatusLine = String<MAX_COLS>;

pub const BANNER_TITLE: &str = "Security System";
pub const BANNER_SUBTITLE: &str = "Initializing...";

/// Round to the nearest integer, halves away from zero
///
/// Out-of-range values saturate; NaN becomes 0.
pub fn round_half_away(value: f32) -> i32 {
    libm::roundf(value) as i32
}

/// Format the two status lines for `reading`
///
/// Lines longer than [`MAX_COLS`] are cut; the screen clips them
/// further to the display width.
pub fn status_lines(reading: &SensorReading) -> [StatusLine; 2] {
    let mut top = StatusLine::new();
    let mut bottom = StatusLine::new();

    // A full buffer only loses the tail of the line
    let _ = write!(
        top,
        "M:{} D:{}cm",
        if reading.motion { 'Y' } else { 'N' },
        round_half_away(reading.distance_cm)
    );
    let _ = write!(
        bottom,
        "T:{}C H:{}%",
        round_half_away(reading.temperature_c),
        round_half_away(reading.humidity_pct)
    );

    [top, bottom]
}

/// Start-up banner
pub fn banner_lines() -> [&'static str; 2] {
    [BANNER_TITLE, BANNER_SUBTITLE]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(motion: bool, distance: f32, temp: f32, humidity: f32) -> SensorReading {
        SensorReading {
            motion,
            distance_cm: distance,
            temperature_c: temp,
            humidity_pct: humidity,
            ..SensorReading::new()
        }
    }

    #[test]
    fn test_status_lines() {
        let [top, bottom] = status_lines(&reading(true, 17.0, 23.0, 40.0));
        assert_eq!(top.as_str(), "M:Y D:17cm");
        assert_eq!(bottom.as_str(), "T:23C H:40%");
    }

    #[test]
    fn test_initial_snapshot() {
        let [top, bottom] = status_lines(&SensorReading::new());
        assert_eq!(top.as_str(), "M:N D:0cm");
        assert_eq!(bottom.as_str(), "T:0C H:0%");
    }

    #[test]
    fn test_values_are_rounded() {
        let [top, bottom] = status_lines(&reading(false, 123.5, 22.4, 55.5));
        assert_eq!(top.as_str(), "M:N D:124cm");
        assert_eq!(bottom.as_str(), "T:22C H:56%");
    }

    #[test]
    fn test_round_half_away() {
        assert_eq!(round_half_away(0.5), 1);
        assert_eq!(round_half_away(0.49), 0);
        assert_eq!(round_half_away(-0.5), -1);
        assert_eq!(round_half_away(-2.4), -2);
        assert_eq!(round_half_away(-2.5), -3);
        assert_eq!(round_half_away(f32::NAN), 0);
    }

    #[test]
    fn test_round_near_half_and_large_values() {
        // Largest f32 below 0.5 must not be pushed over by the addition
        assert_eq!(round_half_away(0.49999997), 0);
        assert_eq!(round_half_away(-0.49999997), 0);
        assert_eq!(round_half_away(8_388_609.0), 8_388_609);
        assert_eq!(round_half_away(f32::MAX), i32::MAX);

        let [top, _] = status_lines(&reading(false, 0.49999997, 0.0, 0.0));
        assert_eq!(top.as_str(), "M:N D:0cm");
    }

    #[test]
    fn test_negative_temperature() {
        let [_, bottom] = status_lines(&reading(false, 0.0, -3.6, 80.0));
        assert_eq!(bottom.as_str(), "T:-4C H:80%");
    }

    #[test]
    fn test_banner_fits_lcd1602() {
        for line in banner_lines() {
            assert!(line.len() <= 16);
        }
    }
}
