//! HC-SR04 ultrasonic rangefinder
//!
//! A 10us pulse on TRIG starts a measurement. The module answers with
//! a pulse on ECHO whose width is the round-trip time of the burst.

use embedded_hal::delay::DelayNs;
use watchpost_core::traits::{RangeSensor, SensorError};
use watchpost_hal::{InputPin, Level, Monotonic, OutputPin};

use crate::timing::measure_pulse;

/// Default bound on each of the echo waits (about 5 m of range)
pub const DEFAULT_TIMEOUT_US: u32 = 30_000;

/// Speed of sound in cm/us
const SOUND_CM_PER_US: f32 = 0.034;

const TRIGGER_SETTLE_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;

/// Convert an echo width to a one-way distance in centimetres
pub fn pulse_width_to_cm(width_us: u32) -> f32 {
    width_us as f32 * SOUND_CM_PER_US / 2.0
}

/// HC-SR04 driver
pub struct HcSr04<T, E, C, D> {
    trigger: T,
    echo: E,
    clock: C,
    delay: D,
    timeout_us: u32,
    last_distance_cm: f32,
}

impl<T, E, C, D> HcSr04<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: Monotonic,
    D: DelayNs,
{
    /// Create a driver and park the trigger line low
    ///
    /// `timeout_us` bounds the wait for the echo to rise and, separately,
    /// the wait for it to fall. Zero is rejected.
    pub fn new(
        mut trigger: T,
        echo: E,
        clock: C,
        delay: D,
        timeout_us: u32,
    ) -> Result<Self, SensorError> {
        if timeout_us == 0 {
            return Err(SensorError::Configuration);
        }
        trigger.set_low();

        Ok(Self {
            trigger,
            echo,
            clock,
            delay,
            timeout_us,
            last_distance_cm: 0.0,
        })
    }

    pub fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    fn trigger(&mut self) {
        self.trigger.set_low();
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high();
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low();
    }
}

impl<T, E, C, D> RangeSensor for HcSr04<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: Monotonic,
    D: DelayNs,
{
    fn read_distance(&mut self) -> Result<f32, SensorError> {
        self.trigger();

        let width = measure_pulse(&self.echo, &self.clock, Level::High, self.timeout_us)
            .inspect_err(|_| debug!("hcsr04: no echo"))?;

        let distance = pulse_width_to_cm(width);
        self.last_distance_cm = distance;
        Ok(distance)
    }

    fn last_distance(&self) -> f32 {
        self.last_distance_cm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimClock, SimDelay, SimLine, SimTime};
    use proptest::prelude::*;

    type Sensor = HcSr04<SimLine, SimLine, SimClock, SimDelay>;

    fn sensor() -> (Sensor, SimLine, SimLine, SimTime) {
        let time = SimTime::new();
        let trig = SimLine::new(&time);
        let echo = SimLine::new(&time);
        let sensor = HcSr04::new(
            trig.clone(),
            echo.clone(),
            SimClock::new(&time),
            SimDelay::new(&time),
            DEFAULT_TIMEOUT_US,
        )
        .unwrap();
        (sensor, trig, echo, time)
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 0.05, "{a} != {b}");
    }

    #[test]
    fn test_conversion() {
        assert_eq!(pulse_width_to_cm(1000), 17.0);
        assert_eq!(pulse_width_to_cm(0), 0.0);
        assert_close(pulse_width_to_cm(588), 9.996);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let time = SimTime::new();
        let result = HcSr04::new(
            SimLine::new(&time),
            SimLine::new(&time),
            SimClock::new(&time),
            SimDelay::new(&time),
            0,
        );
        assert!(matches!(result, Err(SensorError::Configuration)));
    }

    #[test]
    fn test_trigger_pulse_shape() {
        let (mut sensor, trig, echo, _time) = sensor();
        echo.script(&[(100, false), (1000, true)], false);

        sensor.read_distance().unwrap();

        let writes = trig.writes();
        // Parked low at construction, then low, high, low
        let levels: Vec<bool> = writes.iter().map(|w| w.1).collect();
        assert_eq!(levels, [false, false, true, false]);
        assert!(writes[2].0 - writes[1].0 >= 2);
        assert_eq!(writes[3].0 - writes[2].0, 10);
    }

    #[test]
    fn test_1000us_echo_is_17cm() {
        let (mut sensor, _trig, echo, _time) = sensor();
        echo.script(&[(200, false), (1000, true)], false);

        let d = sensor.read_distance().unwrap();
        assert_close(d, 17.0);
        assert_eq!(sensor.last_distance(), d);
    }

    #[test]
    fn test_slow_rise_fast_fall_accepted() {
        let (mut sensor, _trig, echo, _time) = sensor();
        // Rise inside the first window, pulse end 45ms after the trigger
        echo.script(&[(25_000, false), (20_000, true)], false);

        let d = sensor.read_distance().unwrap();
        assert_close(d, 340.0);
    }

    #[test]
    fn test_no_echo_times_out_and_keeps_distance() {
        let (mut sensor, _trig, echo, _time) = sensor();
        echo.script(&[(100, false), (1000, true)], false);
        let first = sensor.read_distance().unwrap();

        echo.hold(false);
        assert_eq!(sensor.read_distance(), Err(SensorError::Timeout));
        assert_eq!(sensor.last_distance(), first);
    }

    #[test]
    fn test_echo_stuck_high_times_out() {
        let (mut sensor, _trig, echo, _time) = sensor();
        echo.script(&[(100, false), (31_000, true)], false);

        assert_eq!(sensor.read_distance(), Err(SensorError::Timeout));
        assert_eq!(sensor.last_distance(), 0.0);
    }

    #[test]
    fn test_fall_timeout_keeps_prior_distance() {
        let (mut sensor, _trig, echo, _time) = sensor();
        echo.script(&[(100, false), (1000, true)], false);
        let first = sensor.read_distance().unwrap();

        echo.script(&[(100, false), (31_000, true)], false);
        assert_eq!(sensor.read_distance(), Err(SensorError::Timeout));
        assert_eq!(sensor.last_distance(), first);
    }

    proptest! {
        #[test]
        fn distance_follows_echo_width(
            rise_us in 0u64..20_000,
            width_us in 1u32..25_000,
        ) {
            let (mut sensor, _trig, echo, _time) = sensor();
            echo.script(&[(rise_us, false), (u64::from(width_us), true)], false);

            let d = sensor.read_distance().unwrap();
            prop_assert_eq!(d, width_us as f32 * 0.034 / 2.0);
            prop_assert_eq!(sensor.last_distance(), d);
        }
    }
}
