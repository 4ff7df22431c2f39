//! Stateful two-row text surface.
//!
//! [`DisplaySurface`] owns a [`CharacterDisplay`] together with the text each
//! row currently shows, and routes every row update through the line-diff
//! renderer so unchanged rows cost no bus traffic.
//!
//! # Example
//!
//! ```rust
//! use rs_tempmon::{hal::MockDisplay, DisplaySurface, LineBuffer, Row};
//!
//! let mut surface = DisplaySurface::new(MockDisplay::new());
//! surface.init(true).unwrap();
//!
//! let text = LineBuffer::try_from("70.00 F").unwrap();
//! assert!(surface.set_line(Row::Top, &text).unwrap());
//! assert!(!surface.set_line(Row::Top, &text).unwrap()); // unchanged, no write
//! assert_eq!(surface.line(Row::Top), "70.00 F");
//! ```

use crate::render::{rewrite_line, update_line};
use crate::traits::{CharacterDisplay, LineBuffer, Row, ROWS};

/// A character display plus the remembered text of each row.
#[derive(Debug)]
pub struct DisplaySurface<D: CharacterDisplay> {
    display: D,
    lines: [LineBuffer; ROWS],
    // Rows whose glass no longer matches `lines` after a failed write
    dirty: [bool; ROWS],
    backlight: bool,
}

impl<D: CharacterDisplay> DisplaySurface<D> {
    /// Wrap a display; rows start out remembered as empty
    pub fn new(display: D) -> Self {
        Self {
            display,
            lines: [LineBuffer::new(), LineBuffer::new()],
            dirty: [false; ROWS],
            backlight: false,
        }
    }

    /// Power-on sequence: controller init, backlight, clear.
    pub fn init(&mut self, backlight: bool) -> Result<(), D::Error> {
        self.display.init()?;
        self.backlight(backlight)?;
        self.clear()
    }

    /// Render `text` on `row`, returning whether anything was written.
    ///
    /// A write that fails partway leaves the row in an unknown state. The
    /// next call for that row rewrites it in full, even if the text matches
    /// what was remembered.
    pub fn set_line(&mut self, row: Row, text: &LineBuffer) -> Result<bool, D::Error> {
        let index = row.index();
        let dirty = self.dirty[index];
        let changed = dirty || self.lines[index] != *text;

        let result = if dirty {
            rewrite_line(&mut self.display, row, text)
        } else {
            update_line(&mut self.display, row, text, &self.lines[index])
        };

        match result {
            Ok(shown) => {
                self.lines[index] = shown;
                self.dirty[index] = false;
                Ok(changed)
            }
            Err(e) => {
                self.dirty[index] = true;
                Err(e)
            }
        }
    }

    /// Whether `row` must be rewritten in full on its next update
    pub fn is_dirty(&self, row: Row) -> bool {
        self.dirty[row.index()]
    }

    /// Blank the whole display and forget both rows
    pub fn clear(&mut self) -> Result<(), D::Error> {
        if let Err(e) = self.display.clear() {
            self.dirty = [true; ROWS];
            return Err(e);
        }
        for line in &mut self.lines {
            line.clear();
        }
        self.dirty = [false; ROWS];
        Ok(())
    }

    /// Switch the backlight
    pub fn backlight(&mut self, on: bool) -> Result<(), D::Error> {
        self.display.backlight(on)?;
        self.backlight = on;
        Ok(())
    }

    /// Last backlight state successfully applied
    pub fn backlight_on(&self) -> bool {
        self.backlight
    }

    /// Text currently shown on `row`
    pub fn line(&self, row: Row) -> &str {
        &self.lines[row.index()]
    }

    /// Borrow the underlying display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutably borrow the underlying display
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Unwrap the underlying display
    pub fn into_inner(self) -> D {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{DisplayOp, MockDisplay};

    fn line(text: &str) -> LineBuffer {
        LineBuffer::try_from(text).unwrap()
    }

    #[test]
    fn init_runs_power_on_sequence() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.init(true).unwrap();
        assert_eq!(
            surface.display().ops,
            [DisplayOp::Init, DisplayOp::Backlight(true), DisplayOp::Clear]
        );
        assert!(surface.backlight_on());
    }

    #[test]
    fn rows_are_independent() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.set_line(Row::Top, &line("70.00 F")).unwrap();
        surface.set_line(Row::Bottom, &line("+0.00%")).unwrap();
        assert_eq!(surface.line(Row::Top), "70.00 F");
        assert_eq!(surface.line(Row::Bottom), "+0.00%");
        assert_eq!(surface.display().screen_line(Row::Top), "70.00 F");
        assert_eq!(surface.display().screen_line(Row::Bottom), "+0.00%");
    }

    #[test]
    fn unchanged_row_costs_nothing() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.set_line(Row::Top, &line("70.00 F")).unwrap();
        let before = surface.display().ops.len();
        assert!(!surface.set_line(Row::Top, &line("70.00 F")).unwrap());
        assert_eq!(surface.display().ops.len(), before);
    }

    #[test]
    fn clear_forgets_rows() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.set_line(Row::Top, &line("70.00 F")).unwrap();
        surface.clear().unwrap();
        assert_eq!(surface.line(Row::Top), "");
        // Same text must be rewritten after a clear
        assert!(surface.set_line(Row::Top, &line("70.00 F")).unwrap());
    }

    #[test]
    fn failed_write_keeps_old_text() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.set_line(Row::Top, &line("70.00 F")).unwrap();
        surface.display_mut().fail_writes = true;
        assert!(surface.set_line(Row::Top, &line("71.00 F")).is_err());
        assert_eq!(surface.line(Row::Top), "70.00 F");
    }

    #[test]
    fn partial_write_forces_full_rewrite() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.set_line(Row::Top, &line("70.00 F")).unwrap();

        // Two characters reach the glass, then the bus drops out
        surface.display_mut().char_budget = Some(2);
        assert!(surface.set_line(Row::Top, &line("79.99 F")).is_err());
        assert_eq!(surface.display().screen_line(Row::Top), "79.00 F");
        assert_eq!(surface.line(Row::Top), "70.00 F");
        assert!(surface.is_dirty(Row::Top));

        // Same text as remembered, but the glass disagrees
        surface.display_mut().char_budget = None;
        assert!(surface.set_line(Row::Top, &line("70.00 F")).unwrap());
        assert_eq!(surface.display().screen_line(Row::Top), "70.00 F");
        assert_eq!(
            surface.display().ops.last(),
            Some(&DisplayOp::Write(" ".repeat(9)))
        );
        assert!(!surface.is_dirty(Row::Top));

        // Back to minimal writes
        let before = surface.display().ops.len();
        assert!(!surface.set_line(Row::Top, &line("70.00 F")).unwrap());
        assert_eq!(surface.display().ops.len(), before);
    }

    #[test]
    fn dirty_row_does_not_touch_the_other() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.set_line(Row::Bottom, &line("+0.00%")).unwrap();
        surface.display_mut().char_budget = Some(0);
        assert!(surface.set_line(Row::Top, &line("70.00 F")).is_err());
        surface.display_mut().char_budget = None;

        assert!(surface.is_dirty(Row::Top));
        assert!(!surface.is_dirty(Row::Bottom));
        assert!(!surface.set_line(Row::Bottom, &line("+0.00%")).unwrap());
    }

    #[test]
    fn failed_clear_marks_rows_dirty() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.set_line(Row::Top, &line("70.00 F")).unwrap();
        surface.display_mut().fail_writes = true;
        assert!(surface.clear().is_err());
        surface.display_mut().fail_writes = false;
        assert!(surface.is_dirty(Row::Top));
        assert!(surface.set_line(Row::Top, &line("70.00 F")).unwrap());
    }

    #[test]
    fn backlight_toggle() {
        let mut surface = DisplaySurface::new(MockDisplay::new());
        surface.backlight(true).unwrap();
        surface.backlight(false).unwrap();
        assert!(!surface.backlight_on());
        assert!(!surface.into_inner().backlight);
    }
}
