//! Exit sensor handler

use defmt::*;
use embassy_rp::gpio::Input;

use sortline_drivers::sensor::{ActiveLevel, SensorLine};

use crate::channels::{notify, SIGNALS};

/// Exit sensor task
///
/// The exit sensor is active low; each falling edge is one item arriving
/// at the end of the belt.
#[embassy_executor::task]
pub async fn exit_sensor_task(pin: Input<'static>) {
    info!("Exit sensor task started");

    let mut exit = SensorLine::new(pin, ActiveLevel::Low);

    loop {
        let _ = exit.wait_for_activation().await;
        trace!("Item at exit");
        SIGNALS.flag_item_at_exit();
        notify();
    }
}
