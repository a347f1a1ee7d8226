//! Pause and ramp-down button handlers
//!
//! Both buttons are active low. A press counts once the line has been low,
//! released, and stayed released for the debounce time on either side.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use sortline_core::config::TimingConfig;
use sortline_drivers::sensor::{ActiveLevel, SensorLine};

use crate::channels::{notify, SIGNALS};

/// Wait for one complete, debounced press and release
async fn debounced_press(button: &mut SensorLine<Input<'static>>, debounce_ms: u32) {
    let _ = button.wait_for_activation().await;
    Timer::after_millis(u64::from(debounce_ms)).await;
    let _ = button.wait_for_release().await;
    Timer::after_millis(u64::from(debounce_ms)).await;
}

/// Pause button task
///
/// Each press flips the pause condition; the controller stops or restarts
/// the belt when it next polls.
#[embassy_executor::task]
pub async fn pause_button_task(pin: Input<'static>, timing: TimingConfig) {
    info!("Pause button task started");

    let mut button = SensorLine::new(pin, ActiveLevel::Low);

    loop {
        debounced_press(&mut button, timing.debounce_ms).await;

        let paused = SIGNALS.toggle_pause();
        info!("Pause button: paused={}", paused);
        notify();
    }
}

/// Ramp-down button task
///
/// The first press starts a countdown; when it expires the ramp-down
/// condition is raised and the task ends. The controller honours it once
/// the belt is empty.
#[embassy_executor::task]
pub async fn ramp_down_button_task(pin: Input<'static>, timing: TimingConfig) {
    info!("Ramp-down button task started");

    let mut button = SensorLine::new(pin, ActiveLevel::Low);
    debounced_press(&mut button, timing.debounce_ms).await;

    if !SIGNALS.arm_ramp_down() {
        return;
    }

    info!(
        "Ramp-down armed, stopping in {} ms",
        timing.ramp_down_delay_ms
    );
    Timer::after_millis(u64::from(timing.ramp_down_delay_ms)).await;

    info!("Ramp-down countdown expired");
    SIGNALS.fire_ramp_down();
    notify();
}
