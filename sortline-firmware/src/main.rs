//! Sortline - Conveyor Sorter Firmware
//!
//! Classifies objects by reflectivity as they enter the belt, queues them,
//! and rotates a stepper-driven tray under the belt exit so each object
//! drops into the bin for its material.
//!
//! Sensor and button handlers run on a high-priority interrupt executor;
//! the controller runs on the thread-mode executor and is preempted by
//! them while it steps the tray.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::adc::{self, Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use sortline_core::config::SorterConfig;
use sortline_drivers::gpio::PinBus;
use sortline_drivers::motor::ConveyorMotor;
use sortline_drivers::stepper::TrayStepper;

mod channels;
mod display;
mod fault;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// PWM counter wrap; duty values are out of 255
const PWM_TOP: u16 = 255;

/// PWM clock divider (125 MHz / 255 / 256, about 1.9 kHz)
const PWM_DIVIDER: u8 = 255;

/// Executor for the sensor and button handlers
static EXECUTOR_HANDLERS: InterruptExecutor = InterruptExecutor::new();

#[allow(non_snake_case)]
#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HANDLERS.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sortline firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = SorterConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid sorter configuration: {:?}", e);
        core::future::pending::<()>().await;
    }
    info!(
        "Config: bands={:?} slots={:?} duty={}",
        config.bands, config.slots, config.conveyor_duty
    );

    // Tray stepper: six coil lines, home sensor active low
    let coils = PinBus::new([
        Output::new(p.PIN_0, Level::Low),
        Output::new(p.PIN_1, Level::Low),
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
    ]);
    let home = Input::new(p.PIN_10, Pull::Up);
    let tray = TrayStepper::new(coils, home, Delay, config.slots, config.speed);

    // Conveyor: H-bridge drive lines plus PWM enable
    let drive = PinBus::new([
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
    ]);
    let mut pwm_config = pwm::Config::default();
    pwm_config.top = PWM_TOP;
    pwm_config.divider = fixed::FixedU16::from_num(PWM_DIVIDER);
    let (pwm_out, _) = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config).split();
    let conveyor = ConveyorMotor::new(drive, unwrap!(pwm_out));
    info!("Motor outputs configured");

    // Sensors and buttons
    let entry = Input::new(p.PIN_11, Pull::Down);
    let exit = Input::new(p.PIN_12, Pull::Up);
    let pause = Input::new(p.PIN_13, Pull::Up);
    let ramp_down = Input::new(p.PIN_14, Pull::Up);

    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let reflectivity = Channel::new_pin(p.PIN_26, Pull::None);
    info!("Sensor inputs configured");

    // Handlers preempt the controller
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let handlers = EXECUTOR_HANDLERS.start(interrupt::SWI_IRQ_1);

    handlers
        .spawn(tasks::entry_sensor_task(entry, adc, reflectivity, config.bands))
        .unwrap();
    handlers.spawn(tasks::exit_sensor_task(exit)).unwrap();
    handlers
        .spawn(tasks::pause_button_task(pause, config.timing))
        .unwrap();
    handlers
        .spawn(tasks::ramp_down_button_task(ramp_down, config.timing))
        .unwrap();

    spawner
        .spawn(tasks::controller_task(tray, conveyor, config))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
