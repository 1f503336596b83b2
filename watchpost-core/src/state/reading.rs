//! Sensor snapshot

/// Latest value of every sensor on the node
///
/// Copied out whole by readers so formatting never happens under the
/// store lock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Local motion detector level
    pub motion: bool,
    /// Distance to the nearest object in centimetres
    pub distance_cm: f32,
    /// Degrees Celsius
    pub temperature_c: f32,
    /// Relative humidity in percent
    pub humidity_pct: f32,
    /// Motion reported by the wireless node
    pub remote_motion: bool,
    /// Whether the wireless node is currently linked
    pub remote_connected: bool,
}

impl SensorReading {
    /// All fields zero or false
    pub const fn new() -> Self {
        Self {
            motion: false,
            distance_cm: 0.0,
            temperature_c: 0.0,
            humidity_pct: 0.0,
            remote_motion: false,
            remote_connected: false,
        }
    }
}
