//! Entry sensor handler
//!
//! Samples the reflectivity channel for as long as an object blocks the
//! entry sensor, then posts the material of the lowest reading.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::gpio::Input;

use sortline_core::config::ReflectivityBands;
use sortline_core::sorting::Classifier;
use sortline_drivers::sensor::{scale_adc, ActiveLevel, SensorLine};

use crate::channels::{notify, SIGNALS};

/// RP2040 ADC resolution
const ADC_BITS: u8 = 12;

/// Entry sensor task
#[embassy_executor::task]
pub async fn entry_sensor_task(
    pin: Input<'static>,
    mut adc: Adc<'static, Async>,
    mut channel: Channel<'static>,
    bands: ReflectivityBands,
) {
    info!("Entry sensor task started");

    let mut entry = SensorLine::new(pin, ActiveLevel::High);
    let mut classifier = Classifier::new(bands);

    loop {
        let _ = entry.wait_for_activation().await;
        classifier.begin_sampling();

        let material = loop {
            let result = adc.read(&mut channel).await;
            let asserted = entry.is_active().unwrap_or(false);

            let done = match result {
                Ok(raw) => classifier.on_sample(scale_adc(raw, ADC_BITS), asserted),
                Err(_) => {
                    warn!("Reflectivity conversion failed");
                    classifier.on_read_failed(asserted)
                }
            };
            if let Some(material) = done {
                break material;
            }
        };

        debug!(
            "Item cleared entry: min reflectivity {} -> {:?}",
            classifier.minimum(),
            material
        );
        SIGNALS.post_classification(material);
        notify();
    }
}
