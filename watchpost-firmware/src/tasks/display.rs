//! LCD refresh task

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Timer};
use watchpost_core::config::DisplayConfig;
use watchpost_display::{banner_lines, status_lines, DisplayBackend, Lcd1602, Screen};
use watchpost_hal_rp2040::I2cAdapter;

use super::{deadline_from_now, wait_for};
use crate::shared::SENSOR_STORE;

pub type DisplayImpl = Lcd1602<I2cAdapter<I2c<'static, I2C0, Blocking>>, Delay>;

/// Show the banner, then redraw the status lines every period
///
/// Only the snapshot copy happens under the store lock. A failed
/// update is logged and retried on the next period.
#[embassy_executor::task]
pub async fn display_task(mut lcd: DisplayImpl, config: DisplayConfig, period_ms: u32) {
    info!("Display task started");

    let mut screen = Screen::new(config.columns, config.rows);

    match lcd.init() {
        Ok(()) => info!("LCD initialized at address {=u8:#x}", config.i2c_address),
        Err(e) => warn!("LCD init failed: {}", e),
    }

    for (row, line) in banner_lines().iter().enumerate() {
        screen.set_line(row, line);
    }
    if let Err(e) = lcd.render(&screen) {
        warn!("Banner failed: {}", e);
    }
    Timer::after_millis(u64::from(config.banner_ms)).await;

    let mut deadline = deadline_from_now(period_ms);
    // The controller may have missed init; re-run it after a failure
    let mut needs_init = false;

    loop {
        if needs_init {
            needs_init = lcd.init().is_err();
            screen.clear();
        }

        let reading = SENSOR_STORE.snapshot();
        for (row, line) in status_lines(&reading).iter().enumerate() {
            screen.set_line(row, line);
        }

        if screen.is_dirty() {
            match lcd.render(&screen) {
                Ok(()) => screen.mark_clean(),
                Err(e) => {
                    warn!("Display update failed: {}", e);
                    needs_init = true;
                }
            }
        }

        wait_for(&deadline).await;
        deadline.advance();
    }
}
