//! Async tasks producing log traffic.
//!
//! - `heartbeat_task`: Blinks the LED and logs uptime plus ring occupancy
//! - `button_task`: Marker lines on A, ring reset on B

use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Ticker, Timer};
use ringlog_pico2::config::{BUTTON_POLL_MS, HEARTBEAT_INTERVAL_MS};

use super::button::ButtonState;
use super::logger;

/// Periodic heartbeat: toggles the LED and writes one line per interval.
#[embassy_executor::task]
pub async fn heartbeat_task(mut led: Output<'static>) {
    defmt::info!("Heartbeat task started");

    let boot = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(HEARTBEAT_INTERVAL_MS));

    loop {
        ticker.next().await;
        led.toggle();

        log_info!("uptime {} s", boot.elapsed().as_secs());
        if let Some(header) = logger::header() {
            log_debug!("ring ptr={} len={}", header.pointer, header.length);
        }
    }
}

/// Polls the A/B buttons with debounce.
#[embassy_executor::task]
pub async fn button_task(
    btn_a: Input<'static>,
    btn_b: Input<'static>,
) {
    defmt::info!("Button task started");

    let mut btn_a_state = ButtonState::default();
    let mut btn_b_state = ButtonState::default();
    let mut marker = 0u32;

    loop {
        if btn_a_state.just_pressed(btn_a.is_low()) {
            marker = marker.wrapping_add(1);
            log_info!("---- marker {} ----", marker);
        }

        if btn_b_state.just_pressed(btn_b.is_low()) {
            logger::reset();
            log_warn!("log ring reset by user");
        }

        Timer::after_millis(BUTTON_POLL_MS).await;
    }
}
