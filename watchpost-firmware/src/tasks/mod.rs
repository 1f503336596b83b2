//! Embassy async tasks
//!
//! One task per store owner plus the display. Every task sleeps until an
//! absolute deadline and advances it by its period, so time spent in a
//! sensor transaction does not push later cycles back.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Instant, Timer};
use watchpost_core::scheduler::PeriodicDeadline;

pub mod climate;
pub mod display;
pub mod motion;
pub mod ranging;
pub mod remote_link;

pub use climate::climate_task;
pub use display::display_task;
pub use motion::motion_task;
pub use ranging::ranging_task;
pub use remote_link::remote_link_task;

/// Raw mutex guarding the shared store
pub type StoreMutex = CriticalSectionRawMutex;

/// Deadline tracker starting now
fn deadline_from_now(period_ms: u32) -> PeriodicDeadline {
    PeriodicDeadline::from_millis(Instant::now().as_micros(), period_ms)
}

/// Sleep until the pending deadline; returns at once if already past
async fn wait_for(deadline: &PeriodicDeadline) {
    Timer::at(Instant::from_micros(deadline.deadline())).await;
}
