//! Character display abstraction.
//!
//! This module defines the [`CharacterDisplay`] trait for commodity text
//! displays (HD44780-class LCDs and simulated displays for testing), plus the
//! fixed two-row, sixteen-column geometry the rest of the crate renders into.

/// Number of text rows on the display.
pub const ROWS: usize = 2;

/// Number of character columns per row.
pub const COLUMNS: usize = 16;

/// Exact text currently rendered on one row.
///
/// The capacity is the column count, so a row can never hold more text than
/// fits on the glass.
pub type LineBuffer = heapless::String<COLUMNS>;

/// One of the two display rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Row {
    /// First row (temperature readout).
    Top,
    /// Second row (rate of change).
    Bottom,
}

impl Row {
    /// Both rows, top first.
    pub const ALL: [Row; ROWS] = [Row::Top, Row::Bottom];

    /// Zero-based row index.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_tempmon::Row;
    ///
    /// assert_eq!(Row::Top.index(), 0);
    /// assert_eq!(Row::Bottom.index(), 1);
    /// ```
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            Row::Top => 0,
            Row::Bottom => 1,
        }
    }

    /// Row for a zero-based index, `None` when out of range.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Row::Top),
            1 => Some(Row::Bottom),
            _ => None,
        }
    }
}

/// Character display trait.
///
/// Implementors wrap a text display controller. Every call is synchronous and
/// may incur a small fixed settle delay.
///
/// # Example
///
/// ```ignore
/// use rs_tempmon::traits::{CharacterDisplay, Row};
///
/// struct MyLcd { /* ... */ }
///
/// impl CharacterDisplay for MyLcd {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn set_cursor(&mut self, row: Row, col: u8) -> Result<(), ()> { Ok(()) }
///     fn write_text(&mut self, text: &str) -> Result<(), ()> { Ok(()) }
///     fn clear(&mut self) -> Result<(), ()> { Ok(()) }
///     fn backlight(&mut self, on: bool) -> Result<(), ()> { Ok(()) }
/// }
/// ```
pub trait CharacterDisplay {
    /// Error type for display operations.
    type Error;

    /// Initializes the display controller.
    ///
    /// Called once at startup, before any other operation.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Moves the write cursor to `col` on `row`.
    fn set_cursor(&mut self, row: Row, col: u8) -> Result<(), Self::Error>;

    /// Writes `text` at the cursor, advancing it one column per character.
    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Clears every row and homes the cursor.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Switches the backlight on or off.
    fn backlight(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Moves the cursor and writes `text` in one call.
    fn write_at(&mut self, row: Row, col: u8, text: &str) -> Result<(), Self::Error> {
        self.set_cursor(row, col)?;
        self.write_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_index_round_trip() {
        for row in Row::ALL {
            assert_eq!(Row::from_index(row.index()), Some(row));
        }
        assert_eq!(Row::from_index(ROWS), None);
    }

    #[test]
    fn line_buffer_holds_exactly_one_row() {
        let mut line = LineBuffer::new();
        for _ in 0..COLUMNS {
            line.push('x').unwrap();
        }
        assert!(line.push('y').is_err());
    }

    struct Recorder {
        cursor: Option<(Row, u8)>,
        written: usize,
    }

    impl CharacterDisplay for Recorder {
        type Error = ();

        fn init(&mut self) -> Result<(), ()> {
            Ok(())
        }

        fn set_cursor(&mut self, row: Row, col: u8) -> Result<(), ()> {
            self.cursor = Some((row, col));
            Ok(())
        }

        fn write_text(&mut self, text: &str) -> Result<(), ()> {
            self.written += text.len();
            Ok(())
        }

        fn clear(&mut self) -> Result<(), ()> {
            Ok(())
        }

        fn backlight(&mut self, _on: bool) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn write_at_default_impl() {
        let mut display = Recorder {
            cursor: None,
            written: 0,
        };
        display.write_at(Row::Bottom, 3, "abc").unwrap();
        assert_eq!(display.cursor, Some((Row::Bottom, 3)));
        assert_eq!(display.written, 3);
    }
}
