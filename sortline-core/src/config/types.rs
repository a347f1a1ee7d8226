//! Configuration type definitions
//!
//! These types represent the sorter calibration: reflectivity thresholds per
//! material finish, tray slot positions, stepper ramp speeds and handler
//! timing. The defaults are the values the rig was tuned with and must not
//! drift; every field can still be overridden for bench testing.

use crate::sorting::MaterialType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Highest value the reflectivity channel can report (10-bit)
pub const REFLECTIVITY_MAX: u16 = 1023;

/// Lowest reflectivity classified as black
pub const BLACK_MIN: u16 = 956;
/// Lowest reflectivity classified as white
pub const WHITE_MIN: u16 = 900;
/// Lowest reflectivity classified as steel
pub const STEEL_MIN: u16 = 256;
/// Lowest reflectivity classified as aluminum
pub const ALUMINUM_MIN: u16 = 0;

/// Full steps per tray revolution (1.8° motor)
pub const STEPS_PER_REV: u16 = 200;
/// Half a revolution; the tray never turns further than this
pub const HALF_REV: u16 = STEPS_PER_REV / 2;

/// Tray slot for the black bin (also the home position)
pub const SLOT_BLACK: u16 = 0;
/// Tray slot for the aluminum bin
pub const SLOT_ALUMINUM: u16 = 50;
/// Tray slot for the white bin
pub const SLOT_WHITE: u16 = 100;
/// Tray slot for the steel bin
pub const SLOT_STEEL: u16 = 150;

/// Shortest per-step delay in ms (fastest stepping)
pub const MAXIMUM_SPEED: u16 = 5;
/// Nominal per-step delay in ms, reserved
pub const NORMAL_SPEED: u16 = 10;
/// Longest per-step delay in ms (slowest stepping)
pub const MINIMUM_SPEED: u16 = 14;
/// Steps spent accelerating or decelerating
pub const RAMP_STEP: u16 = MINIMUM_SPEED - MAXIMUM_SPEED;

/// Button debounce wait in ms (applied before and after the release)
pub const DEBOUNCE_MS: u32 = 20;
/// Countdown between the ramp-down press and the ramp-down condition
///
/// 0xFFFF ticks of the 8 MHz / 1024 timer.
pub const RAMP_DOWN_DELAY_MS: u32 = 8389;
/// Settle time after showing the pause banner
pub const PAUSE_SETTLE_MS: u32 = 20;
/// Time the conveyor is held braked before it is disabled
pub const BRAKE_SETTLE_MS: u32 = 10;

/// Fixed conveyor PWM duty (out of 255)
pub const CONVEYOR_DUTY: u8 = 0x50;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Reflectivity bands overlap or are out of order
    BandsOverlap,
    /// A band lower bound exceeds the sensor range
    BandOutOfRange,
    /// A tray slot is outside one revolution
    SlotOutOfRange,
    /// Two materials share a tray slot
    SlotCollision,
    /// Fastest step delay is zero or not faster than the slowest
    InvalidSpeed,
    /// Conveyor duty is zero
    InvalidDuty,
}

/// Reflectivity thresholds, inclusive lower bound of each band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReflectivityBands {
    pub black_min: u16,
    pub white_min: u16,
    pub steel_min: u16,
    pub aluminum_min: u16,
}

impl Default for ReflectivityBands {
    fn default() -> Self {
        Self {
            black_min: BLACK_MIN,
            white_min: WHITE_MIN,
            steel_min: STEEL_MIN,
            aluminum_min: ALUMINUM_MIN,
        }
    }
}

impl ReflectivityBands {
    /// Map a reflectivity reading to a material, highest band first
    pub fn classify(&self, reflectivity: u16) -> MaterialType {
        if reflectivity >= self.black_min {
            MaterialType::Black
        } else if reflectivity >= self.white_min {
            MaterialType::White
        } else if reflectivity >= self.steel_min {
            MaterialType::Steel
        } else if reflectivity >= self.aluminum_min {
            MaterialType::Aluminum
        } else {
            MaterialType::Invalid
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.black_min > REFLECTIVITY_MAX {
            return Err(ConfigError::BandOutOfRange);
        }
        if !(self.black_min > self.white_min
            && self.white_min > self.steel_min
            && self.steel_min > self.aluminum_min)
        {
            return Err(ConfigError::BandsOverlap);
        }
        Ok(())
    }
}

/// Tray position of each bin, in steps from home
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotMap {
    pub black: u16,
    pub aluminum: u16,
    pub white: u16,
    pub steel: u16,
}

impl Default for SlotMap {
    fn default() -> Self {
        Self {
            black: SLOT_BLACK,
            aluminum: SLOT_ALUMINUM,
            white: SLOT_WHITE,
            steel: SLOT_STEEL,
        }
    }
}

impl SlotMap {
    /// Tray position for a material
    ///
    /// Unclassifiable items go to the home (black) slot rather than being
    /// rejected.
    pub fn slot(&self, material: MaterialType) -> u16 {
        match material {
            MaterialType::Aluminum => self.aluminum,
            MaterialType::White => self.white,
            MaterialType::Steel => self.steel,
            MaterialType::Black | MaterialType::Invalid => self.black,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let slots = [self.black, self.aluminum, self.white, self.steel];

        if slots.iter().any(|&s| s >= STEPS_PER_REV) {
            return Err(ConfigError::SlotOutOfRange);
        }

        for (i, a) in slots.iter().enumerate() {
            if slots[i + 1..].contains(a) {
                return Err(ConfigError::SlotCollision);
            }
        }

        Ok(())
    }
}

/// Stepper ramp speeds, as per-step delays in ms (smaller is faster)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedProfile {
    /// Delay at full speed
    pub fastest_ms: u16,
    /// Delay at standstill, where every move starts and ends
    pub slowest_ms: u16,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self {
            fastest_ms: MAXIMUM_SPEED,
            slowest_ms: MINIMUM_SPEED,
        }
    }
}

impl SpeedProfile {
    /// Number of steps spent accelerating (and again decelerating)
    pub fn ramp_steps(&self) -> u16 {
        self.slowest_ms.saturating_sub(self.fastest_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fastest_ms == 0 || self.fastest_ms >= self.slowest_ms {
            return Err(ConfigError::InvalidSpeed);
        }
        Ok(())
    }
}

/// Fixed waits used by the handlers and the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Debounce wait around a button release
    pub debounce_ms: u32,
    /// Countdown from ramp-down press to ramp-down condition
    pub ramp_down_delay_ms: u32,
    /// Wait after the pause banner before the count table
    pub pause_settle_ms: u32,
    /// Brake hold before the conveyor is disabled
    pub brake_settle_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            ramp_down_delay_ms: RAMP_DOWN_DELAY_MS,
            pause_settle_ms: PAUSE_SETTLE_MS,
            brake_settle_ms: BRAKE_SETTLE_MS,
        }
    }
}

/// Complete sorter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SorterConfig {
    pub bands: ReflectivityBands,
    pub slots: SlotMap,
    pub speed: SpeedProfile,
    pub timing: TimingConfig,
    /// Conveyor PWM duty (out of 255), set once at startup
    pub conveyor_duty: u8,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            bands: ReflectivityBands::default(),
            slots: SlotMap::default(),
            speed: SpeedProfile::default(),
            timing: TimingConfig::default(),
            conveyor_duty: CONVEYOR_DUTY,
        }
    }
}

impl SorterConfig {
    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bands.validate()?;
        self.slots.validate()?;
        self.speed.validate()?;

        if self.conveyor_duty == 0 {
            return Err(ConfigError::InvalidDuty);
        }

        Ok(())
    }
}
