//! DHT11 single-wire temperature and humidity sensor
//!
//! The host pulls the line low for 18ms, releases it, and the sensor
//! acknowledges with 80us low / 80us high. It then sends 40 bits, MSB
//! first: each bit is ~50us low followed by a high whose length encodes
//! the value (26-28us for 0, ~70us for 1).
//!
//! Frame layout:
//!
//! ```text
//! byte 0: humidity integer    byte 1: humidity fraction
//! byte 2: temperature integer byte 3: temperature fraction
//! byte 4: checksum = (b0 + b1 + b2 + b3) mod 256
//! ```

use embedded_hal::delay::DelayNs;
use watchpost_core::traits::{ClimateReading, ClimateSensor, SensorError};
use watchpost_hal::{FlexPin, Level, Monotonic};

use crate::timing::{measure_pulse, wait_for_level};

/// The sensor needs this long between conversions
pub const DEFAULT_MIN_INTERVAL_MS: u32 = 2_000;

const START_LOW_MS: u32 = 18;
/// Host release time, inside the sensor's 20-40us window
const START_HIGH_US: u32 = 30;
const RESPONSE_TIMEOUT_US: u32 = 100;
const BIT_TIMEOUT_US: u32 = 200;
/// High pulses longer than this are ones
const BIT_THRESHOLD_US: u32 = 40;

/// A decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateFrame {
    pub humidity: u8,
    pub humidity_frac: u8,
    pub temperature: u8,
    pub temperature_frac: u8,
    pub checksum: u8,
}

impl ClimateFrame {
    /// Build a frame from the five raw bytes, checking the checksum
    pub fn from_bytes(bytes: [u8; 5]) -> Result<Self, SensorError> {
        let frame = Self {
            humidity: bytes[0],
            humidity_frac: bytes[1],
            temperature: bytes[2],
            temperature_frac: bytes[3],
            checksum: bytes[4],
        };
        if frame.expected_checksum() != frame.checksum {
            warn!(
                "dht11: checksum mismatch, calculated {=u8:#x}, received {=u8:#x}",
                frame.expected_checksum(),
                frame.checksum
            );
            return Err(SensorError::ChecksumMismatch);
        }
        Ok(frame)
    }

    pub fn expected_checksum(&self) -> u8 {
        self.humidity
            .wrapping_add(self.humidity_frac)
            .wrapping_add(self.temperature)
            .wrapping_add(self.temperature_frac)
    }

    /// Integer parts only; the DHT11 reports zero fractions in practice
    pub fn reading(&self) -> ClimateReading {
        ClimateReading {
            temperature_c: f32::from(self.temperature),
            humidity_pct: f32::from(self.humidity),
        }
    }
}

/// DHT11 driver
pub struct Dht11<P, C, D> {
    pin: P,
    clock: C,
    delay: D,
    min_interval_us: u64,
    last_success_us: Option<u64>,
    last: ClimateReading,
    last_frame: Option<ClimateFrame>,
}

impl<P, C, D> Dht11<P, C, D>
where
    P: FlexPin,
    C: Monotonic,
    D: DelayNs,
{
    /// Create a driver and leave the line idling high
    ///
    /// The first read is never rate limited. A `min_interval_ms` of
    /// zero is rejected.
    pub fn new(mut pin: P, clock: C, delay: D, min_interval_ms: u32) -> Result<Self, SensorError> {
        if min_interval_ms == 0 {
            return Err(SensorError::Configuration);
        }
        pin.set_as_output();
        pin.set_high();

        Ok(Self {
            pin,
            clock,
            delay,
            min_interval_us: u64::from(min_interval_ms) * 1_000,
            last_success_us: None,
            last: ClimateReading::default(),
            last_frame: None,
        })
    }

    /// Last frame that passed the checksum
    pub fn last_frame(&self) -> Option<ClimateFrame> {
        self.last_frame
    }

    fn start_signal(&mut self) {
        self.pin.set_as_output();
        self.pin.set_low();
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high();
        self.delay.delay_us(START_HIGH_US);
        self.pin.set_as_input();
    }

    fn await_response(&self) -> Result<(), SensorError> {
        wait_for_level(&self.pin, &self.clock, Level::Low, RESPONSE_TIMEOUT_US)
            .inspect_err(|_| debug!("dht11: no response low"))?;
        wait_for_level(&self.pin, &self.clock, Level::High, RESPONSE_TIMEOUT_US)
            .inspect_err(|_| debug!("dht11: no response high"))?;
        Ok(())
    }

    fn read_bits(&self) -> Result<[u8; 5], SensorError> {
        let mut data = [0u8; 5];
        for bit in 0..40usize {
            wait_for_level(&self.pin, &self.clock, Level::Low, BIT_TIMEOUT_US)
                .inspect_err(|_| debug!("dht11: timeout before bit {}", bit))?;
            let high_us = measure_pulse(&self.pin, &self.clock, Level::High, BIT_TIMEOUT_US)
                .inspect_err(|_| debug!("dht11: timeout in bit {}", bit))?;

            if high_us > BIT_THRESHOLD_US {
                data[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
        Ok(data)
    }

    fn transaction(&mut self) -> Result<ClimateFrame, SensorError> {
        self.start_signal();
        self.await_response()?;
        let bytes = self.read_bits()?;
        ClimateFrame::from_bytes(bytes)
    }
}

impl<P, C, D> ClimateSensor for Dht11<P, C, D>
where
    P: FlexPin,
    C: Monotonic,
    D: DelayNs,
{
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        if let Some(last) = self.last_success_us {
            if self.clock.now_us().saturating_sub(last) < self.min_interval_us {
                return Err(SensorError::TooSoon);
            }
        }

        let result = self.transaction();

        // Back to idle whatever happened on the wire
        self.pin.set_as_output();
        self.pin.set_high();

        let frame = result?;
        self.last = frame.reading();
        self.last_frame = Some(frame);
        self.last_success_us = Some(self.clock.now_us());
        Ok(self.last)
    }

    fn last_reading(&self) -> ClimateReading {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimClock, SimDelay, SimLine, SimTime};
    use proptest::prelude::*;
    use watchpost_hal::OutputPin;

    type Sensor = Dht11<SimLine, SimClock, SimDelay>;

    fn sensor() -> (Sensor, SimLine, SimTime) {
        let time = SimTime::new();
        let line = SimLine::new(&time);
        let sensor = Dht11::new(
            line.clone(),
            SimClock::new(&time),
            SimDelay::new(&time),
            DEFAULT_MIN_INTERVAL_MS,
        )
        .unwrap();
        (sensor, line, time)
    }

    /// Sensor side of a transaction, starting when the host releases the line
    fn waveform(bytes: [u8; 5]) -> Vec<(u64, bool)> {
        let mut w = vec![(20, true), (80, false), (80, true)];
        for byte in bytes {
            for i in (0..8).rev() {
                let one = byte & (1 << i) != 0;
                w.push((50, false));
                w.push((if one { 70 } else { 26 }, true));
            }
        }
        w.push((50, false));
        w
    }

    #[test]
    fn test_decodes_frame() {
        let (mut sensor, line, _time) = sensor();
        line.script(&waveform([0x28, 0x00, 0x17, 0x00, 0x3F]), true);

        let reading = sensor.read().unwrap();
        assert_eq!(reading.humidity_pct, 40.0);
        assert_eq!(reading.temperature_c, 23.0);
        assert_eq!(sensor.last_reading(), reading);
        assert!(line.is_output());
        assert!(line.is_set_high());
    }

    #[test]
    fn test_fractions_kept_in_frame_only() {
        let (mut sensor, line, _time) = sensor();
        line.script(&waveform([0x2A, 0x05, 0x18, 0x03, 0x4A]), true);

        let reading = sensor.read().unwrap();
        assert_eq!(reading.humidity_pct, 42.0);
        assert_eq!(reading.temperature_c, 24.0);
        let frame = sensor.last_frame().unwrap();
        assert_eq!(frame.humidity_frac, 5);
        assert_eq!(frame.temperature_frac, 3);
    }

    #[test]
    fn test_start_signal() {
        let (mut sensor, line, _time) = sensor();
        line.script(&waveform([0x28, 0x00, 0x17, 0x00, 0x3F]), true);
        sensor.read().unwrap();

        let writes = line.writes();
        // Idle high at construction, then 18ms low, then high before release
        assert!(writes[0].1);
        assert!(!writes[1].1);
        assert!(writes[2].1);
        assert_eq!(writes[2].0 - writes[1].0, 18_000);
    }

    #[test]
    fn test_bad_checksum_keeps_values() {
        let (mut sensor, line, time) = sensor();
        line.script(&waveform([0x28, 0x00, 0x17, 0x00, 0x3F]), true);
        let good = sensor.read().unwrap();

        time.advance(2_000_000);
        line.script(&waveform([0x30, 0x00, 0x19, 0x00, 0x00]), true);
        assert_eq!(sensor.read(), Err(SensorError::ChecksumMismatch));
        assert_eq!(sensor.last_reading(), good);
    }

    #[test]
    fn test_too_soon_touches_nothing() {
        let (mut sensor, line, time) = sensor();
        line.script(&waveform([0x28, 0x00, 0x17, 0x00, 0x3F]), true);
        sensor.read().unwrap();

        time.advance(1_000_000);
        let before = line.mutations();
        assert_eq!(sensor.read(), Err(SensorError::TooSoon));
        assert_eq!(line.mutations(), before);

        time.advance(1_000_000);
        line.script(&waveform([0x29, 0x00, 0x16, 0x00, 0x3F]), true);
        let reading = sensor.read().unwrap();
        assert_eq!(reading.humidity_pct, 41.0);
        assert_eq!(reading.temperature_c, 22.0);
    }

    #[test]
    fn test_failed_read_is_not_rate_limited() {
        let (mut sensor, line, _time) = sensor();
        line.hold(true);
        assert_eq!(sensor.read(), Err(SensorError::Timeout));

        line.script(&waveform([0x28, 0x00, 0x17, 0x00, 0x3F]), true);
        assert!(sensor.read().is_ok());
    }

    #[test]
    fn test_no_response_times_out() {
        let (mut sensor, line, _time) = sensor();
        line.hold(true);
        assert_eq!(sensor.read(), Err(SensorError::Timeout));
        assert_eq!(sensor.last_reading(), ClimateReading::default());
        assert!(sensor.last_frame().is_none());
    }

    #[test]
    fn test_truncated_frame_times_out() {
        let (mut sensor, line, _time) = sensor();
        let mut w = waveform([0x28, 0x00, 0x17, 0x00, 0x3F]);
        w.truncate(40);
        line.script(&w, true);
        assert_eq!(sensor.read(), Err(SensorError::Timeout));
    }

    #[test]
    fn test_mid_frame_timeout_keeps_values() {
        let (mut sensor, line, time) = sensor();
        line.script(&waveform([0x28, 0x00, 0x17, 0x00, 0x3F]), true);
        let good = sensor.read().unwrap();
        let frame = sensor.last_frame();

        time.advance(2_000_000);
        let mut w = waveform([0x30, 0x00, 0x19, 0x00, 0x49]);
        // Sensor stops answering after the second byte
        w.truncate(3 + 2 * 16);
        line.script(&w, true);
        assert_eq!(sensor.read(), Err(SensorError::Timeout));
        assert_eq!(sensor.last_reading(), good);
        assert_eq!(sensor.last_frame(), frame);
        assert!(line.is_output());
        assert!(line.is_set_high());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let time = SimTime::new();
        let result = Dht11::new(
            SimLine::new(&time),
            SimClock::new(&time),
            SimDelay::new(&time),
            0,
        );
        assert!(matches!(result, Err(SensorError::Configuration)));
    }

    proptest! {
        #[test]
        fn checksum_rejects_any_wrong_byte(
            data in any::<[u8; 4]>(),
            wrong in any::<u8>(),
        ) {
            let sum = data.iter().fold(0u8, |a, b| a.wrapping_add(*b));
            prop_assume!(wrong != sum);

            let good = ClimateFrame::from_bytes([data[0], data[1], data[2], data[3], sum]);
            prop_assert!(good.is_ok());
            prop_assert_eq!(
                ClimateFrame::from_bytes([data[0], data[1], data[2], data[3], wrong]),
                Err(SensorError::ChecksumMismatch)
            );
        }
    }
}
