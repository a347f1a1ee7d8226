//! Two-line display mirrored to the defmt log

use defmt::*;

use sortline_core::traits::{DisplayDriver, DisplayError};
use sortline_drivers::display::TextBuffer;

/// Text buffer that logs its rows on every write
pub struct ConsoleDisplay {
    buffer: TextBuffer,
}

impl ConsoleDisplay {
    pub const fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
        }
    }

    fn flush(&mut self) {
        if self.buffer.take_dirty() {
            info!("display |{}|{}|", self.buffer.row(0), self.buffer.row(1));
        }
    }
}

impl DisplayDriver for ConsoleDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer.clear()
    }

    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.buffer.text(row, col, text)?;
        self.flush();
        Ok(())
    }
}
