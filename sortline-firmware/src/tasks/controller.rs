//! Controller task
//!
//! Runs the main-loop controller on the thread-mode executor. All blocking
//! work (tray moves, settle delays) happens here, so the handler tasks on
//! the interrupt executor preempt it freely.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::pwm::PwmOutput;
use embassy_time::Delay;

use sortline_core::config::SorterConfig;
use sortline_core::controller::Controller;
use sortline_core::state::Event;
use sortline_drivers::gpio::PinBus;
use sortline_drivers::motor::ConveyorMotor;
use sortline_drivers::stepper::TrayStepper;

use crate::channels::{SIGNALS, WAKE};
use crate::display::ConsoleDisplay;

/// Tray stepper as wired on the board
pub type Tray = TrayStepper<PinBus<Output<'static>, 6>, Input<'static>, Delay>;

/// Conveyor motor as wired on the board
pub type Conveyor = ConveyorMotor<PinBus<Output<'static>, 4>, PwmOutput<'static>>;

/// Controller task
#[embassy_executor::task]
pub async fn controller_task(tray: Tray, conveyor: Conveyor, config: SorterConfig) {
    info!("Controller task started");

    let mut controller = Controller::new(
        &SIGNALS,
        tray,
        conveyor,
        ConsoleDisplay::new(),
        Delay,
        config,
    );

    match controller.boot() {
        Ok(steps) => info!("Tray homed after {} steps, belt running", steps),
        Err(e) => {
            error!("Conveyor start failed: {:?}", e);
            core::future::pending::<()>().await;
        }
    }

    loop {
        while let Some(event) = controller.poll() {
            log_event(event);
        }

        let mode = controller.mode();
        if mode.is_terminal() {
            if mode.is_fault() {
                error!("Controller stopped in {:?}", mode);
            } else {
                info!(
                    "Controller halted with {} items sorted",
                    controller.counts().total()
                );
            }
            core::future::pending::<()>().await;
        }

        WAKE.wait().await;
    }
}

fn log_event(event: Event) {
    match event {
        Event::ItemClassified(material) => debug!("Queued {:?}", material),
        Event::ItemSorted(material) => info!("Sorted {:?}", material),
        Event::FaultDetected(kind) => error!("Fault: {:?}", kind),
        other => info!("Event: {:?}", other),
    }
}
