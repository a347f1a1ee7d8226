//! Reflectivity classifier
//!
//! While an object passes the entry sensor it may only partially cover the
//! optical path, so readings taken at its edges are unreliable. The
//! classifier keeps the lowest reading seen during the transit window and
//! classifies on that once the entry sensor releases.
//!
//! # Usage
//!
//! ```ignore
//! // Entry sensor rising edge:
//! classifier.begin_sampling();
//! adc.start_conversion();
//!
//! // Conversion complete:
//! if let Some(material) = classifier.on_sample(adc.result(), entry.is_high()) {
//!     signals.post_classification(material);
//! } else {
//!     adc.start_conversion();
//! }
//! ```

use super::MaterialType;
use crate::config::{ReflectivityBands, REFLECTIVITY_MAX};

/// Running-minimum reflectivity classifier
#[derive(Debug, Clone)]
pub struct Classifier {
    bands: ReflectivityBands,
    /// Lowest reading of the current transit window
    minimum: u16,
    /// A transit window is open
    sampling: bool,
}

impl Classifier {
    /// Create a classifier with the given thresholds
    pub fn new(bands: ReflectivityBands) -> Self {
        Self {
            bands,
            minimum: REFLECTIVITY_MAX,
            sampling: false,
        }
    }

    /// Open a transit window, resetting the running minimum
    pub fn begin_sampling(&mut self) {
        self.minimum = REFLECTIVITY_MAX;
        self.sampling = true;
    }

    /// Record a completed conversion
    pub fn sample_ready(&mut self, value: u16) {
        if value < self.minimum {
            self.minimum = value;
        }
    }

    /// Check whether another sample should be requested
    ///
    /// Sampling continues for as long as the entry sensor is asserted.
    pub fn sampling_active(&self, entry_asserted: bool) -> bool {
        self.sampling && entry_asserted
    }

    /// Close the transit window and classify its minimum
    pub fn finish(&mut self) -> MaterialType {
        self.sampling = false;
        self.classify(self.minimum)
    }

    /// Map a reflectivity reading to a material
    pub fn classify(&self, reflectivity: u16) -> MaterialType {
        self.bands.classify(reflectivity)
    }

    /// Handle one conversion result
    ///
    /// Returns the material once the entry sensor has released, or `None`
    /// if another sample should be taken.
    pub fn on_sample(&mut self, value: u16, entry_asserted: bool) -> Option<MaterialType> {
        self.sample_ready(value);

        if self.sampling_active(entry_asserted) {
            None
        } else {
            Some(self.finish())
        }
    }

    /// Handle a failed conversion
    ///
    /// No reading is recorded. The window still closes once the entry
    /// sensor has released, classifying on the readings taken so far.
    pub fn on_read_failed(&mut self, entry_asserted: bool) -> Option<MaterialType> {
        if self.sampling_active(entry_asserted) {
            None
        } else {
            Some(self.finish())
        }
    }

    /// Lowest reading of the current (or last) transit window
    pub fn minimum(&self) -> u16 {
        self.minimum
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ReflectivityBands::default())
    }
}
