//! Hardware abstraction traits
//!
//! These traits define the interface between the acquisition tasks
//! and the protocol drivers.

pub mod sensor;

pub use sensor::{ClimateReading, ClimateSensor, MotionSensor, RangeSensor, SensorError};
