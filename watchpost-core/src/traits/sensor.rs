//! Sensor traits

/// Errors reported by a single sensor read
///
/// Every variant is recoverable and scoped to one call. A read that
/// fails leaves the driver's stored values untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// An expected line transition did not occur within its window
    Timeout,
    /// Frame checksum did not match the data bytes
    ChecksumMismatch,
    /// Read attempted before the sensor's minimum interval elapsed
    TooSoon,
    /// Driver constructed with unusable parameters
    Configuration,
}

/// Digital motion detector with a debounced event counter
pub trait MotionSensor {
    /// Sample the line
    ///
    /// Returns the raw level. A rising edge outside the debounce
    /// window increments the event counter as a side effect.
    fn read(&mut self) -> bool;

    /// Number of debounced rising edges seen so far
    fn motion_count(&self) -> u32;

    fn reset_motion_count(&mut self);
}

/// Time-of-flight distance sensor
pub trait RangeSensor {
    /// Run one measurement cycle and return the distance in centimetres
    fn read_distance(&mut self) -> Result<f32, SensorError>;

    /// Distance from the last successful cycle (0.0 before the first)
    fn last_distance(&self) -> f32;
}

/// One temperature and humidity sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Degrees Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
}

/// Combined temperature and humidity sensor
pub trait ClimateSensor {
    /// Perform a full bus transaction
    ///
    /// Fails with [`SensorError::TooSoon`] without touching the bus if
    /// called again before the sensor's minimum interval.
    fn read(&mut self) -> Result<ClimateReading, SensorError>;

    /// Values from the last successful read
    fn last_reading(&self) -> ClimateReading;
}
