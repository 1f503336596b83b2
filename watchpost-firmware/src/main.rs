//! Watchpost - Security Hub Sensor Node Firmware
//!
//! Main firmware binary for RP2040-based sensor nodes. Each sensor is
//! polled by its own periodic task; tasks run on embassy executors at
//! distinct interrupt priorities so that motion sampling preempts
//! ranging, ranging preempts the slow climate transaction, and the
//! display only runs when nothing else is ready.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use watchpost_core::scheduler::task_table;
use watchpost_display::Lcd1602;
use watchpost_drivers::climate::Dht11;
use watchpost_drivers::motion::Pir;
use watchpost_drivers::ranging::HcSr04;
use watchpost_hal::i2c::I2cConfig;
use watchpost_hal_rp2040::{EmbassyClock, I2cAdapter, PinBank, RpFlex, RpInput, RpOutput};

use crate::node::NODE_CONFIG;
use crate::shared::SENSOR_STORE;

mod node;
mod shared;
mod tasks;

/// Motion detection
static EXECUTOR_CRITICAL: InterruptExecutor = InterruptExecutor::new();
/// Ranging
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
/// Climate and remote link
static EXECUTOR_NORMAL: InterruptExecutor = InterruptExecutor::new();
/// Display, in thread mode
static EXECUTOR_BACKGROUND: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_CRITICAL.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_2() {
    EXECUTOR_NORMAL.on_interrupt()
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Watchpost firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = NODE_CONFIG;
    for task in task_table(&config.tasks) {
        info!(
            "Task {}: every {}ms at {}",
            task.name, task.period_ms, task.priority
        );
    }

    let (mut pins, rest) = PinBank::from_peripherals(p);

    // Motion: HC-SR501 PIR
    let pir_pin = unwrap!(pins.take(config.motion.pin.pin));
    let pir = Pir::new(
        RpInput::new(pir_pin, &config.motion.pin),
        EmbassyClock,
        config.motion.debounce_ms,
    );

    // Ranging: HC-SR04
    let trig_pin = unwrap!(pins.take(config.ranging.trigger_pin.pin));
    let echo_pin = unwrap!(pins.take(config.ranging.echo_pin.pin));
    let rangefinder = unwrap!(HcSr04::new(
        RpOutput::new(trig_pin, &config.ranging.trigger_pin),
        RpInput::new(echo_pin, &config.ranging.echo_pin),
        EmbassyClock,
        Delay,
        config.ranging.timeout_us,
    ));

    // Climate: DHT11
    let dht_pin = unwrap!(pins.take(config.climate.pin.pin));
    let dht = unwrap!(Dht11::new(
        RpFlex::new(dht_pin, &config.climate.pin),
        EmbassyClock,
        Delay,
        config.climate.min_interval_ms,
    ));

    // Display: LCD1602 over I2C0
    let i2c = I2cAdapter::i2c0(rest.i2c0, rest.i2c_scl, rest.i2c_sda, I2cConfig::STANDARD);
    let lcd = Lcd1602::with_geometry(
        i2c,
        Delay,
        config.display.i2c_address,
        config.display.columns,
        config.display.rows,
    );

    info!("Sensors initialized");

    // Each producer claims the store fields it owns
    let motion_writer = unwrap!(SENSOR_STORE.motion_writer());
    let range_writer = unwrap!(SENSOR_STORE.range_writer());
    let climate_writer = unwrap!(SENSOR_STORE.climate_writer());
    let remote_writer = unwrap!(SENSOR_STORE.remote_writer());

    // Lower number is more urgent; the RP2040 has priorities P0-P3
    interrupt::SWI_IRQ_0.set_priority(Priority::P1);
    let spawner = EXECUTOR_CRITICAL.start(interrupt::SWI_IRQ_0);
    spawner
        .spawn(tasks::motion_task(pir, motion_writer, config.tasks.motion_ms))
        .unwrap();

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    spawner
        .spawn(tasks::ranging_task(
            rangefinder,
            range_writer,
            config.tasks.ranging_ms,
            config.ranging.change_threshold_cm,
        ))
        .unwrap();

    interrupt::SWI_IRQ_2.set_priority(Priority::P3);
    let spawner = EXECUTOR_NORMAL.start(interrupt::SWI_IRQ_2);
    spawner
        .spawn(tasks::climate_task(dht, climate_writer, config.tasks.climate_ms))
        .unwrap();
    spawner
        .spawn(tasks::remote_link_task(remote_writer, config.tasks))
        .unwrap();

    info!("Acquisition tasks spawned");

    let executor = EXECUTOR_BACKGROUND.init(Executor::new());
    executor.run(|spawner| {
        spawner
            .spawn(tasks::display_task(lcd, config.display, config.tasks.display_ms))
            .unwrap();
    })
}
