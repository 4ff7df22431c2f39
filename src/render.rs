//! Flicker-free row updates.
//!
//! [`update_line`] converges one display row from the text it currently shows
//! to new text with the fewest writes: nothing at all when the text is
//! unchanged, otherwise a cursor move, the new text, and just enough spaces to
//! blank whatever the old text left behind. The row is never cleared.
//!
//! # Example
//!
//! ```rust
//! use rs_tempmon::hal::{DisplayOp, MockDisplay};
//! use rs_tempmon::render::update_line;
//! use rs_tempmon::{LineBuffer, Row};
//!
//! let mut lcd = MockDisplay::new();
//! let old = LineBuffer::try_from("120.45 F").unwrap();
//! let new = LineBuffer::try_from("12.3 F").unwrap();
//!
//! let kept = update_line(&mut lcd, Row::Top, &new, &old).unwrap();
//! assert_eq!(kept, new);
//! assert_eq!(lcd.ops.last(), Some(&DisplayOp::Write("  ".into())));
//! ```

use crate::traits::{CharacterDisplay, LineBuffer, Row, COLUMNS};

/// One full row of blanks; padding is sliced from it.
const BLANK_ROW: &str = "                ";

/// Bring `row` from `old_text` to `new_text` and return what the row now shows.
///
/// The comparison is byte-exact. Equal text performs no display call.
pub fn update_line<D: CharacterDisplay>(
    display: &mut D,
    row: Row,
    new_text: &LineBuffer,
    old_text: &LineBuffer,
) -> Result<LineBuffer, D::Error> {
    if new_text == old_text {
        return Ok(new_text.clone());
    }

    display.write_at(row, 0, new_text)?;

    let stale = padding_needed(new_text, old_text);
    if stale > 0 {
        display.write_text(&BLANK_ROW[..stale])?;
    }

    Ok(new_text.clone())
}

/// Write `text` on `row` and blank every column after it.
///
/// Used when the row's contents are unknown, e.g. after a write that failed
/// partway through.
pub fn rewrite_line<D: CharacterDisplay>(
    display: &mut D,
    row: Row,
    text: &LineBuffer,
) -> Result<LineBuffer, D::Error> {
    display.write_at(row, 0, text)?;

    let stale = COLUMNS.saturating_sub(text.chars().count());
    if stale > 0 {
        display.write_text(&BLANK_ROW[..stale])?;
    }

    Ok(text.clone())
}

/// Columns of `old_text` left uncovered by `new_text`.
fn padding_needed(new_text: &str, old_text: &str) -> usize {
    let new_len = new_text.chars().count();
    let old_len = old_text.chars().count();
    old_len.saturating_sub(new_len).min(COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{DisplayOp, MockDisplay};

    fn line(text: &str) -> LineBuffer {
        LineBuffer::try_from(text).unwrap()
    }

    #[test]
    fn rewrite_pads_to_full_width() {
        let mut lcd = MockDisplay::new();
        lcd.write_at(Row::Top, 0, "79.99 F garbage").unwrap();
        let kept = rewrite_line(&mut lcd, Row::Top, &line("70.00 F")).unwrap();
        assert_eq!(kept, "70.00 F");
        assert_eq!(lcd.screen_line(Row::Top), "70.00 F");
        assert_eq!(lcd.ops.last(), Some(&DisplayOp::Write(" ".repeat(9))));
    }

    #[test]
    fn rewrite_of_full_row_needs_no_padding() {
        let mut lcd = MockDisplay::new();
        let full = line("0123456789abcdef");
        rewrite_line(&mut lcd, Row::Bottom, &full).unwrap();
        assert_eq!(lcd.write_count(), 1);
    }

    #[test]
    fn blank_row_spans_every_column() {
        assert_eq!(BLANK_ROW.len(), COLUMNS);
        assert!(BLANK_ROW.bytes().all(|b| b == b' '));
    }

    #[test]
    fn identical_text_is_a_no_op() {
        let mut lcd = MockDisplay::new();
        let text = line("70.00 F");
        let kept = update_line(&mut lcd, Row::Top, &text, &text).unwrap();
        assert_eq!(kept, text);
        assert!(lcd.ops.is_empty());
    }

    #[test]
    fn shorter_text_is_padded() {
        let mut lcd = MockDisplay::new();
        update_line(&mut lcd, Row::Top, &line("12.3 F"), &line("120.45 F")).unwrap();
        assert_eq!(
            lcd.ops,
            [
                DisplayOp::SetCursor { row: Row::Top, col: 0 },
                DisplayOp::Write("12.3 F".into()),
                DisplayOp::Write("  ".into()),
            ]
        );
    }

    #[test]
    fn longer_text_is_not_padded() {
        let mut lcd = MockDisplay::new();
        update_line(&mut lcd, Row::Bottom, &line("+10.25%"), &line("+0.17%")).unwrap();
        assert_eq!(
            lcd.ops,
            [
                DisplayOp::SetCursor {
                    row: Row::Bottom,
                    col: 0
                },
                DisplayOp::Write("+10.25%".into()),
            ]
        );
    }

    #[test]
    fn first_write_against_empty_row() {
        let mut lcd = MockDisplay::new();
        let kept = update_line(&mut lcd, Row::Top, &line("70.00 F"), &LineBuffer::new()).unwrap();
        assert_eq!(kept.as_str(), "70.00 F");
        assert_eq!(lcd.ops.len(), 2);
        assert_eq!(lcd.screen_line(Row::Top), "70.00 F");
    }

    #[test]
    fn stale_characters_are_blanked_on_screen() {
        let mut lcd = MockDisplay::new();
        let first = update_line(&mut lcd, Row::Top, &line("120.45 F"), &LineBuffer::new()).unwrap();
        update_line(&mut lcd, Row::Top, &line("12.3 F"), &first).unwrap();
        assert_eq!(lcd.screen_line(Row::Top), "12.3 F");
    }

    #[test]
    fn never_clears_the_display() {
        let mut lcd = MockDisplay::new();
        update_line(&mut lcd, Row::Top, &line("a"), &line("abcdefghijklmnop")).unwrap();
        assert!(!lcd.ops.contains(&DisplayOp::Clear));
        assert_eq!(lcd.ops.last(), Some(&DisplayOp::Write(BLANK_ROW[..15].into())));
    }

    #[test]
    fn write_error_propagates() {
        let mut lcd = MockDisplay::new();
        lcd.fail_writes = true;
        let result = update_line(&mut lcd, Row::Top, &line("70.00 F"), &LineBuffer::new());
        assert!(result.is_err());
    }
}
