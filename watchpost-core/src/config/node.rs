//! Node configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scheduler::TaskKind;

/// Highest GPIO number on the RP2040
pub const MAX_GPIO: u8 = 29;

/// Largest character display the firmware drives (HD44780 20x4)
pub const MAX_DISPLAY_COLUMNS: u8 = 20;
pub const MAX_DISPLAY_ROWS: u8 = 4;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// Passive infrared motion detector
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    pub pin: PinConfig,
    /// Minimum time between counted rising edges; 0 disables debouncing
    pub debounce_ms: u32,
}

impl MotionConfig {
    pub const DEFAULT: Self = Self {
        pin: PinConfig::new(13),
        debounce_ms: 50,
    };
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Ultrasonic rangefinder
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RangingConfig {
    pub trigger_pin: PinConfig,
    pub echo_pin: PinConfig,
    /// Bound on each of the echo rise and echo fall waits
    pub timeout_us: u32,
    /// Distance changes smaller than this are not logged
    pub change_threshold_cm: f32,
}

impl RangingConfig {
    pub const DEFAULT: Self = Self {
        trigger_pin: PinConfig::new(12),
        echo_pin: PinConfig::new(14),
        timeout_us: 30_000,
        change_threshold_cm: 1.0,
    };
}

impl Default for RangingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Single-wire temperature and humidity sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClimateConfig {
    pub pin: PinConfig,
    /// Minimum time between successful reads
    pub min_interval_ms: u32,
}

impl ClimateConfig {
    pub const DEFAULT: Self = Self {
        pin: PinConfig::with_pullup(15),
        min_interval_ms: 2_000,
    };
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Character LCD behind a PCF8574 I2C expander
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// 7-bit expander address
    pub i2c_address: u8,
    pub sda_pin: u8,
    pub scl_pin: u8,
    pub columns: u8,
    pub rows: u8,
    /// How long the start-up banner stays up
    pub banner_ms: u32,
}

impl DisplayConfig {
    pub const DEFAULT: Self = Self {
        i2c_address: 0x27,
        sda_pin: 4,
        scl_pin: 5,
        columns: 16,
        rows: 2,
        banner_ms: 2_000,
    };
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Task periods in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TaskPlan {
    pub motion_ms: u32,
    pub ranging_ms: u32,
    pub climate_ms: u32,
    /// Remote link poll period while no peer is connected
    pub remote_idle_ms: u32,
    /// Remote link poll period while a peer is connected
    pub remote_connected_ms: u32,
    pub display_ms: u32,
}

impl TaskPlan {
    pub const DEFAULT: Self = Self {
        motion_ms: 100,
        ranging_ms: 200,
        climate_ms: 3_000,
        remote_idle_ms: 5_000,
        remote_connected_ms: 1_000,
        display_ms: 1_000,
    };

    /// Period of `kind`; the remote link reports its idle period
    pub const fn period_ms(&self, kind: TaskKind) -> u32 {
        match kind {
            TaskKind::Motion => self.motion_ms,
            TaskKind::Ranging => self.ranging_ms,
            TaskKind::Climate => self.climate_ms,
            TaskKind::RemoteLink => self.remote_idle_ms,
            TaskKind::Display => self.display_ms,
        }
    }

    /// Remote link poll period for the given link state
    pub const fn remote_period_ms(&self, connected: bool) -> u32 {
        if connected {
            self.remote_connected_ms
        } else {
            self.remote_idle_ms
        }
    }
}

impl Default for TaskPlan {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// GPIO number above [`MAX_GPIO`]
    PinOutOfRange { pin: u8 },
    /// The same GPIO assigned to two functions
    PinConflict { pin: u8 },
    /// A timeout, interval or period set to zero
    ZeroValue { field: &'static str },
    /// Not a 7-bit I2C address
    InvalidI2cAddress { address: u8 },
    /// Rows or columns outside [`MAX_DISPLAY_COLUMNS`] x [`MAX_DISPLAY_ROWS`]
    InvalidDisplayGeometry,
    /// Active-low wiring on a pin that cannot invert it
    UnsupportedInversion { field: &'static str },
}

/// Complete node configuration
///
/// This is the top-level configuration structure. The default value
/// matches the shipped `node.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeConfig {
    pub motion: MotionConfig,
    pub ranging: RangingConfig,
    pub climate: ClimateConfig,
    pub display: DisplayConfig,
    pub tasks: TaskPlan,
}

impl NodeConfig {
    pub const DEFAULT: Self = Self {
        motion: MotionConfig::DEFAULT,
        ranging: RangingConfig::DEFAULT,
        climate: ClimateConfig::DEFAULT,
        display: DisplayConfig::DEFAULT,
        tasks: TaskPlan::DEFAULT,
    };

    /// Every GPIO the node claims, with the function it serves
    pub fn pin_assignments(&self) -> [(&'static str, u8); 6] {
        [
            ("motion.pin", self.motion.pin.pin),
            ("ranging.trigger_pin", self.ranging.trigger_pin.pin),
            ("ranging.echo_pin", self.ranging.echo_pin.pin),
            ("climate.pin", self.climate.pin.pin),
            ("display.sda_pin", self.display.sda_pin),
            ("display.scl_pin", self.display.scl_pin),
        ]
    }

    /// Check the configuration is usable on an RP2040
    ///
    /// Reports the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.pin_assignments();
        for (i, &(_, pin)) in pins.iter().enumerate() {
            if pin > MAX_GPIO {
                return Err(ConfigError::PinOutOfRange { pin });
            }
            if pins[..i].iter().any(|&(_, other)| other == pin) {
                return Err(ConfigError::PinConflict { pin });
            }
        }

        let nonzero = [
            ("ranging.timeout_us", self.ranging.timeout_us),
            ("climate.min_interval_ms", self.climate.min_interval_ms),
            ("tasks.motion_ms", self.tasks.motion_ms),
            ("tasks.ranging_ms", self.tasks.ranging_ms),
            ("tasks.climate_ms", self.tasks.climate_ms),
            ("tasks.remote_idle_ms", self.tasks.remote_idle_ms),
            ("tasks.remote_connected_ms", self.tasks.remote_connected_ms),
            ("tasks.display_ms", self.tasks.display_ms),
        ];
        if let Some(&(field, _)) = nonzero.iter().find(|&&(_, v)| v == 0) {
            return Err(ConfigError::ZeroValue { field });
        }

        if self.display.i2c_address > 0x7F {
            return Err(ConfigError::InvalidI2cAddress {
                address: self.display.i2c_address,
            });
        }
        if !(1..=MAX_DISPLAY_COLUMNS).contains(&self.display.columns)
            || !(1..=MAX_DISPLAY_ROWS).contains(&self.display.rows)
        {
            return Err(ConfigError::InvalidDisplayGeometry);
        }

        // The single-wire line is driven and sampled raw
        if self.climate.pin.inverted {
            return Err(ConfigError::UnsupportedInversion {
                field: "climate.pin",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(NodeConfig::default(), NodeConfig::DEFAULT);
        assert_eq!(NodeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_pins() {
        let cfg = NodeConfig::default();
        assert_eq!(cfg.motion.pin.pin, 13);
        assert_eq!(cfg.ranging.trigger_pin.pin, 12);
        assert_eq!(cfg.ranging.echo_pin.pin, 14);
        assert!(cfg.climate.pin.pull_up);
    }

    #[test]
    fn test_pin_out_of_range() {
        let mut cfg = NodeConfig::default();
        cfg.ranging.echo_pin.pin = 30;
        assert_eq!(cfg.validate(), Err(ConfigError::PinOutOfRange { pin: 30 }));
    }

    #[test]
    fn test_pin_conflict() {
        let mut cfg = NodeConfig::default();
        cfg.climate.pin.pin = cfg.motion.pin.pin;
        assert_eq!(cfg.validate(), Err(ConfigError::PinConflict { pin: 13 }));

        let mut cfg = NodeConfig::default();
        cfg.display.scl_pin = cfg.ranging.trigger_pin.pin;
        assert_eq!(cfg.validate(), Err(ConfigError::PinConflict { pin: 12 }));
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut cfg = NodeConfig::default();
        cfg.ranging.timeout_us = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroValue {
                field: "ranging.timeout_us"
            })
        );

        let mut cfg = NodeConfig::default();
        cfg.tasks.display_ms = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroValue {
                field: "tasks.display_ms"
            })
        );
    }

    #[test]
    fn test_remote_period_follows_link_state() {
        let plan = TaskPlan::default();
        assert_eq!(plan.remote_period_ms(false), 5_000);
        assert_eq!(plan.remote_period_ms(true), 1_000);
        assert_eq!(
            plan.remote_period_ms(false),
            plan.period_ms(TaskKind::RemoteLink)
        );
    }

    #[test]
    fn test_zero_debounce_allowed() {
        let mut cfg = NodeConfig::default();
        cfg.motion.debounce_ms = 0;
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_display_checks() {
        let mut cfg = NodeConfig::default();
        cfg.display.i2c_address = 0x80;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidI2cAddress { address: 0x80 })
        );

        let mut cfg = NodeConfig::default();
        cfg.display.rows = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidDisplayGeometry));
    }

    #[test]
    fn test_display_wider_than_20x4_rejected() {
        let mut cfg = NodeConfig::default();
        cfg.display.columns = 40;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidDisplayGeometry));

        cfg.display.columns = MAX_DISPLAY_COLUMNS;
        cfg.display.rows = MAX_DISPLAY_ROWS;
        assert_eq!(cfg.validate(), Ok(()));

        cfg.display.rows = 5;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidDisplayGeometry));
    }

    #[test]
    fn test_inverted_climate_pin_rejected() {
        let mut cfg = NodeConfig::default();
        cfg.climate.pin.inverted = true;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnsupportedInversion {
                field: "climate.pin"
            })
        );

        // Plain inputs and outputs honour inversion
        let mut cfg = NodeConfig::default();
        cfg.motion.pin.inverted = true;
        cfg.ranging.trigger_pin.inverted = true;
        assert_eq!(cfg.validate(), Ok(()));
    }
}
