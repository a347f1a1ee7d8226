//! Reflectivity channel scaling
//!
//! Classification thresholds are calibrated on a 10-bit scale. Wider ADCs
//! are shifted down so the same bands apply on any board.

use sortline_core::config::REFLECTIVITY_MAX;

/// Resolution the reflectivity bands are calibrated for
pub const REFLECTIVITY_BITS: u8 = 10;

/// Scale a raw `bits`-wide ADC reading to 0..=1023
///
/// Narrower readings are shifted up; the result is clamped so a noisy or
/// out-of-range sample never exceeds the scale.
pub fn scale_adc(raw: u16, bits: u8) -> u16 {
    let scaled = if bits >= REFLECTIVITY_BITS {
        raw >> (bits - REFLECTIVITY_BITS).min(15)
    } else {
        raw << (REFLECTIVITY_BITS - bits)
    };
    scaled.min(REFLECTIVITY_MAX)
}
