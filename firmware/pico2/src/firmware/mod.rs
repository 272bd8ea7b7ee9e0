//! Embedded entry point and ARM-only modules.

#[macro_use]
mod logger;
mod button;
mod tasks;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use ringlog_pico2::config::{LOG_REGION_BASE, LOG_REGION_SIZE};
use {defmt_rtt as _, panic_probe as _};

use self::tasks::{button_task, heartbeat_task};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"ringlog-pico2"),
    embassy_rp::binary_info::rp_program_description!(c"Circular log ring in SRAM4 for host readout"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("ringlog firmware starting...");

    let p = embassy_rp::init(Default::default());

    // The ring must exist before the first log_*! call
    logger::init();
    log_info!("log ring at {:#x}, {} bytes", LOG_REGION_BASE, LOG_REGION_SIZE);

    // PIM715 RGB LED (active-low), blue channel used for heartbeat
    let led_b = Output::new(p.PIN_28, Level::High);

    // PIM715 buttons (active-low with internal pull-up): A=12, B=13
    let btn_a = Input::new(p.PIN_12, Pull::Up);
    let btn_b = Input::new(p.PIN_13, Pull::Up);

    spawner.spawn(heartbeat_task(led_b)).unwrap();
    spawner.spawn(button_task(btn_a, btn_b)).unwrap();
    log_info!("tasks spawned");
}
