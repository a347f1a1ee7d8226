//! Character display trait
//!
//! The operator display is a 16x2 character LCD. The controller only needs
//! to clear it and write text at a position; the line and number helpers
//! in [`DisplayExt`] are built on those two primitives.

use core::fmt::Write;

use heapless::String;

/// Characters per row
pub const DISPLAY_COLS: u8 = 16;
/// Number of rows
pub const DISPLAY_ROWS: u8 = 2;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Position outside the character grid
    OutOfBounds,
    /// Bus error talking to the display
    Bus,
}

/// Trait for the operator display
pub trait DisplayDriver {
    /// Clear the entire screen
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a position
    ///
    /// Text running past the last column is truncated.
    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;
}

/// Line and number helpers for any [`DisplayDriver`]
pub trait DisplayExt: DisplayDriver {
    /// Clear the screen, then write each given line from column 0
    fn write_lines(&mut self, line1: Option<&str>, line2: Option<&str>) -> Result<(), DisplayError> {
        self.clear()?;
        if let Some(line) = line1 {
            self.text(0, 0, line)?;
        }
        if let Some(line) = line2 {
            self.text(1, 0, line)?;
        }
        Ok(())
    }

    /// Write a zero-padded decimal number
    ///
    /// `width` is clamped to 1..=5. Values wider than `width` keep their
    /// low digits.
    fn write_number(&mut self, col: u8, row: u8, value: u32, width: u8) -> Result<(), DisplayError> {
        let width = usize::from(width.clamp(1, 5));
        let modulus = 10u32.pow(width as u32);

        let mut buf: String<5> = String::new();
        write!(buf, "{:0width$}", value % modulus, width = width).map_err(|_| DisplayError::OutOfBounds)?;
        self.text(row, col, &buf)
    }
}

impl<T: DisplayDriver + ?Sized> DisplayExt for T {}
