//! State shared between tasks
//!
//! Producers on the interrupt executors and the display on the thread
//! executor all reach the store, so it is guarded by a critical-section
//! mutex.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use watchpost_core::state::SensorStore;

/// Latest sensor snapshot
pub static SENSOR_STORE: SensorStore<CriticalSectionRawMutex> = SensorStore::new();
