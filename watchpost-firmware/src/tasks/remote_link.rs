//! Wireless link placeholder
//!
//! Owns the remote fields of the store. No radio is driven yet, so
//! [`poll_link`] never reports a peer and the task stays at the idle
//! period with `remote_connected` false.

use defmt::*;
use watchpost_core::config::TaskPlan;
use watchpost_core::state::RemoteWriter;

use super::{deadline_from_now, wait_for, StoreMutex};

/// Whether a peer node is reachable
// TODO: query the radio once a transceiver driver exists
fn poll_link() -> bool {
    false
}

/// Poll for a peer and publish link state
#[embassy_executor::task]
pub async fn remote_link_task(mut store: RemoteWriter<'static, StoreMutex>, plan: TaskPlan) {
    info!("Remote link task started");

    store.set_connected(false);
    let mut connected = false;
    let mut deadline = deadline_from_now(plan.remote_period_ms(connected));

    loop {
        wait_for(&deadline).await;

        let link_up = poll_link();
        if link_up != connected {
            connected = link_up;
            store.set_connected(connected);
            let period_ms = plan.remote_period_ms(connected);
            deadline.set_period_us(u64::from(period_ms) * 1_000);
            info!(
                "Remote link {}, polling every {}ms",
                if connected { "up" } else { "down" },
                period_ms
            );
        } else if !connected {
            debug!("Scanning for remote node...");
        }

        deadline.advance();
    }
}
