//! Motion sampling task

use defmt::*;
use watchpost_core::state::MotionWriter;
use watchpost_core::traits::MotionSensor;
use watchpost_drivers::motion::Pir;
use watchpost_hal_rp2040::{EmbassyClock, RpInput};

use super::{deadline_from_now, wait_for, StoreMutex};

pub type MotionSensorImpl = Pir<RpInput, EmbassyClock>;

/// Sample the PIR and publish its level
#[embassy_executor::task]
pub async fn motion_task(
    mut pir: MotionSensorImpl,
    mut store: MotionWriter<'static, StoreMutex>,
    period_ms: u32,
) {
    info!("Motion task started (debounce {}ms)", pir.debounce_ms());

    let mut deadline = deadline_from_now(period_ms);
    let mut seen = pir.motion_count();

    loop {
        wait_for(&deadline).await;

        let level = pir.read();
        store.set_motion(level);

        let count = pir.motion_count();
        if count != seen {
            info!("Motion detected (event #{})", count);
            seen = count;
        }

        deadline.advance();
    }
}
