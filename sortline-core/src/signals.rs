//! Conditions shared between the handlers and the main loop
//!
//! Sensor and button handlers run at interrupt priority and only ever set
//! a condition. The main loop consumes each condition exactly once with the
//! matching `take_*` call. All cells are atomics so a single `static`
//! instance can be shared without a lock.
//!
//! Every condition is a single slot: if a handler raises it again before
//! the main loop has consumed it, the second occurrence is lost. For
//! classification this means the later material overwrites the earlier one.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::sorting::MaterialType;
use crate::state::FaultKind;

const NO_FAULT: u8 = 0;

/// Interrupt-shared condition cells
#[derive(Debug)]
pub struct SorterSignals {
    classification_ready: AtomicBool,
    material: AtomicU8,
    item_at_exit: AtomicBool,
    paused: AtomicBool,
    ramp_down_armed: AtomicBool,
    ramp_down: AtomicBool,
    fault: AtomicU8,
}

impl SorterSignals {
    pub const fn new() -> Self {
        Self {
            classification_ready: AtomicBool::new(false),
            material: AtomicU8::new(MaterialType::Invalid.code()),
            item_at_exit: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            ramp_down_armed: AtomicBool::new(false),
            ramp_down: AtomicBool::new(false),
            fault: AtomicU8::new(NO_FAULT),
        }
    }

    // Handler side

    /// Publish the material of an item that just cleared the entry sensor
    pub fn post_classification(&self, material: MaterialType) {
        self.material.store(material.code(), Ordering::Relaxed);
        self.classification_ready.store(true, Ordering::Release);
    }

    /// An item interrupted the exit sensor
    pub fn flag_item_at_exit(&self) {
        self.item_at_exit.store(true, Ordering::Release);
    }

    /// Flip the pause condition, returning the new state
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::AcqRel)
    }

    /// Start the ramp-down countdown
    ///
    /// Returns false if the countdown was already armed; ramp-down is
    /// one-shot, so later presses are ignored.
    pub fn arm_ramp_down(&self) -> bool {
        !self.ramp_down_armed.swap(true, Ordering::AcqRel)
    }

    /// The ramp-down countdown expired
    pub fn fire_ramp_down(&self) {
        self.ramp_down.store(true, Ordering::Release);
    }

    /// Record a fatal condition; the first fault raised wins
    pub fn raise_fault(&self, kind: FaultKind) {
        let _ = self.fault.compare_exchange(
            NO_FAULT,
            kind.code(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    // Main loop side

    /// Consume a pending classification
    pub fn take_classification(&self) -> Option<MaterialType> {
        if self.classification_ready.swap(false, Ordering::Acquire) {
            Some(MaterialType::from_code(self.material.load(Ordering::Relaxed)))
        } else {
            None
        }
    }

    /// Consume a pending exit event
    pub fn take_item_at_exit(&self) -> bool {
        self.item_at_exit.swap(false, Ordering::Acquire)
    }

    /// Current pause condition (level, not consumed)
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Consume the ramp-down condition
    pub fn take_ramp_down(&self) -> bool {
        self.ramp_down.swap(false, Ordering::Acquire)
    }

    /// Consume a pending fault
    pub fn take_fault(&self) -> Option<FaultKind> {
        FaultKind::from_code(self.fault.swap(NO_FAULT, Ordering::Acquire))
    }
}

impl Default for SorterSignals {
    fn default() -> Self {
        Self::new()
    }
}
