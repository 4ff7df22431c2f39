//! In-memory model of the 2x16 character grid.
//!
//! Used by the simulated displays to track what a real panel would show:
//! text is written at the cursor, the cursor advances one column per
//! character, and anything past the last column is lost.

use alloc::string::{String, ToString};

use crate::traits::{Row, COLUMNS, ROWS};

/// Character cells plus a write cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glass {
    cells: [[char; COLUMNS]; ROWS],
    row: usize,
    col: usize,
}

impl Glass {
    /// Blank grid, cursor at the top-left
    pub const fn new() -> Self {
        Self {
            cells: [[' '; COLUMNS]; ROWS],
            row: 0,
            col: 0,
        }
    }

    /// Move the cursor
    pub fn set_cursor(&mut self, row: Row, col: u8) {
        self.row = row.index();
        self.col = usize::from(col);
    }

    /// Write at the cursor and advance it
    pub fn write(&mut self, text: &str) {
        for ch in text.chars() {
            if let Some(cell) = self.cells[self.row].get_mut(self.col) {
                *cell = ch;
            }
            self.col += 1;
        }
    }

    /// Blank every cell and home the cursor
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Row contents with trailing blanks trimmed
    pub fn line(&self, row: Row) -> String {
        let line: String = self.cells[row.index()].iter().collect();
        line.trim_end().to_string()
    }

    /// Row contents, all sixteen cells
    pub fn raw_line(&self, row: Row) -> String {
        self.cells[row.index()].iter().collect()
    }
}

impl Default for Glass {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_advances_cursor() {
        let mut glass = Glass::new();
        glass.set_cursor(Row::Top, 0);
        glass.write("70.");
        glass.write("00 F");
        assert_eq!(glass.line(Row::Top), "70.00 F");
    }

    #[test]
    fn overflow_is_dropped() {
        let mut glass = Glass::new();
        glass.set_cursor(Row::Top, 15);
        glass.write("xyz");
        assert_eq!(glass.raw_line(Row::Top), "               x");
        assert_eq!(glass.line(Row::Bottom), "");
    }

    #[test]
    fn clear_homes_cursor() {
        let mut glass = Glass::new();
        glass.set_cursor(Row::Bottom, 4);
        glass.write("a");
        glass.clear();
        glass.write("b");
        assert_eq!(glass.line(Row::Top), "b");
        assert_eq!(glass.line(Row::Bottom), "");
    }
}
