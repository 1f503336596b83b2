//! Shared sensor state
//!
//! One snapshot of everything the node knows, written by the
//! acquisition tasks and read by the display. Each field has exactly
//! one writer; see [`store::FieldOwner`].

pub mod reading;
pub mod store;

pub use reading::SensorReading;
pub use store::{ClimateWriter, FieldOwner, MotionWriter, RangeWriter, RemoteWriter, SensorStore};
