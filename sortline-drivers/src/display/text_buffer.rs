//! Character grid mirror of a 16x2 display
//!
//! Holds what the operator display shows. Boards without a panel render it
//! over the debug log; boards with one flush it to the controller.

use sortline_core::traits::{DisplayDriver, DisplayError, DISPLAY_COLS, DISPLAY_ROWS};

const COLS: usize = DISPLAY_COLS as usize;
const ROWS: usize = DISPLAY_ROWS as usize;

/// Fixed-size two-line text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    cells: [[u8; COLS]; ROWS],
    /// Set on every write, cleared by [`TextBuffer::take_dirty`]
    dirty: bool,
}

impl TextBuffer {
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            dirty: false,
        }
    }

    /// Contents of one row, padded with spaces
    pub fn row(&self, row: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|cells| core::str::from_utf8(cells).ok())
            .unwrap_or("")
    }

    /// Check and clear the changed flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayDriver for TextBuffer {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.cells = [[b' '; COLS]; ROWS];
        self.dirty = true;
        Ok(())
    }

    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let row = self
            .cells
            .get_mut(usize::from(row))
            .ok_or(DisplayError::OutOfBounds)?;
        let col = usize::from(col);
        if col >= COLS {
            return Err(DisplayError::OutOfBounds);
        }

        for (cell, ch) in row[col..].iter_mut().zip(text.chars()) {
            // The panel only has the ASCII character set
            *cell = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
        }
        self.dirty = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortline_core::traits::DisplayExt;

    #[test]
    fn test_starts_blank() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.row(0), "                ");
        assert_eq!(buffer.row(2), "");
    }

    #[test]
    fn test_write_and_clear() {
        let mut buffer = TextBuffer::new();
        buffer.write_lines(Some("Item type"), Some("ALUMINUM")).unwrap();
        assert_eq!(buffer.row(0), "Item type       ");
        assert_eq!(buffer.row(1), "ALUMINUM        ");
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());

        buffer.write_lines(Some("System Resumed"), None).unwrap();
        assert_eq!(buffer.row(1), "                ");
    }

    #[test]
    fn test_truncates_at_edge() {
        let mut buffer = TextBuffer::new();
        buffer.text(0, 10, "homing position").unwrap();
        assert_eq!(buffer.row(0), "          homing");
    }

    #[test]
    fn test_out_of_bounds() {
        let mut buffer = TextBuffer::new();
        assert_eq!(buffer.text(2, 0, "x"), Err(DisplayError::OutOfBounds));
        assert_eq!(buffer.text(0, 16, "x"), Err(DisplayError::OutOfBounds));
        assert!(!buffer.take_dirty());
    }

    #[test]
    fn test_non_ascii_replaced() {
        let mut buffer = TextBuffer::new();
        buffer.text(1, 0, "1.8°").unwrap();
        assert_eq!(buffer.row(1), "1.8?            ");
    }

    #[test]
    fn test_count_table_layout() {
        let mut buffer = TextBuffer::new();
        buffer.write_lines(Some("AL WH ST BL #OB"), None).unwrap();
        for (col, value) in [(0, 3), (3, 12), (6, 0), (9, 7), (13, 2)] {
            buffer.write_number(col, 1, value, 2).unwrap();
        }
        assert_eq!(buffer.row(0), "AL WH ST BL #OB ");
        assert_eq!(buffer.row(1), "03 12 00 07  02 ");
    }
}
