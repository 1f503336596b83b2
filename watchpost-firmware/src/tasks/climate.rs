//! Temperature and humidity task

use defmt::*;
use embassy_time::Delay;
use watchpost_core::state::ClimateWriter;
use watchpost_core::traits::{ClimateSensor, SensorError};
use watchpost_drivers::climate::Dht11;
use watchpost_hal_rp2040::{EmbassyClock, RpFlex};

use super::{deadline_from_now, wait_for, StoreMutex};

pub type ClimateSensorImpl = Dht11<RpFlex, EmbassyClock, Delay>;

/// Read the DHT11 and publish temperature and humidity together
#[embassy_executor::task]
pub async fn climate_task(
    mut sensor: ClimateSensorImpl,
    mut store: ClimateWriter<'static, StoreMutex>,
    period_ms: u32,
) {
    info!("Climate task started");

    let mut deadline = deadline_from_now(period_ms);

    loop {
        wait_for(&deadline).await;

        match sensor.read() {
            Ok(reading) => {
                store.set_climate(reading.temperature_c, reading.humidity_pct);
                debug!(
                    "Climate: {}C {}%",
                    reading.temperature_c, reading.humidity_pct
                );
            }
            // Period shorter than the sensor's interval; not a fault
            Err(SensorError::TooSoon) => debug!("Climate read skipped: too soon"),
            Err(e) => warn!("Climate read failed: {}", e),
        }

        deadline.advance();
    }
}
