//! Unhandled interrupt trap
//!
//! Every interrupt vector without a bound handler lands here. The line is
//! masked so it cannot fire again, and the controller is told to stop the
//! belt.

use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::NVIC;
use cortex_m_rt::exception;
use defmt::*;

use sortline_core::state::FaultKind;

use crate::channels::{notify, SIGNALS};

/// Raw NVIC line number
#[derive(Clone, Copy)]
struct Irq(u16);

// SAFETY: built only from the IRQ number the core reported as active
unsafe impl InterruptNumber for Irq {
    fn number(self) -> u16 {
        self.0
    }
}

#[exception]
unsafe fn DefaultHandler(irqn: i16) {
    // Negative numbers are system exceptions, which cannot be masked
    if let Ok(line) = u16::try_from(irqn) {
        NVIC::mask(Irq(line));
    }

    error!("Unhandled interrupt {}", irqn);
    SIGNALS.raise_fault(FaultKind::UnhandledInterrupt);
    notify();
}
