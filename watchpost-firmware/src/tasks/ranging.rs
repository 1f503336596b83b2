//! Distance measurement task

use defmt::*;
use embassy_time::Delay;
use watchpost_core::state::RangeWriter;
use watchpost_core::traits::RangeSensor;
use watchpost_drivers::ranging::HcSr04;
use watchpost_hal_rp2040::{EmbassyClock, RpInput, RpOutput};

use super::{deadline_from_now, wait_for, StoreMutex};

pub type RangeSensorImpl = HcSr04<RpOutput, RpInput, EmbassyClock, Delay>;

/// Measure distance and publish it
///
/// Changes of at least `log_threshold_cm` since the last logged value
/// are logged. A timed-out measurement leaves the store untouched.
#[embassy_executor::task]
pub async fn ranging_task(
    mut sensor: RangeSensorImpl,
    mut store: RangeWriter<'static, StoreMutex>,
    period_ms: u32,
    log_threshold_cm: f32,
) {
    info!("Ranging task started (timeout {}us)", sensor.timeout_us());

    let mut deadline = deadline_from_now(period_ms);
    let mut logged: Option<f32> = None;

    loop {
        wait_for(&deadline).await;

        match sensor.read_distance() {
            Ok(distance) => {
                store.set_distance(distance);

                let changed = match logged {
                    None => true,
                    Some(last) => {
                        let delta = if distance > last {
                            distance - last
                        } else {
                            last - distance
                        };
                        delta >= log_threshold_cm
                    }
                };
                if changed {
                    info!("Distance: {}cm", distance);
                    logged = Some(distance);
                }
            }
            Err(e) => debug!("Distance read failed: {}", e),
        }

        deadline.advance();
    }
}
