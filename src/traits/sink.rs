//! Diagnostic output for each rendered frame.
//!
//! The sink receives the two formatted rows after every tick. It is purely for
//! observability: implementations must not block and cannot fail the loop.

use core::fmt;

/// Best-effort, line-oriented diagnostic output.
pub trait DiagnosticSink {
    /// Reports the two rows produced by a tick.
    fn report(&mut self, top: &str, bottom: &str);

    /// Reports a tick that failed.
    ///
    /// Default implementation drops the message.
    fn report_error(&mut self, error: &dyn fmt::Display) {
        let _ = error;
    }
}

/// Discards everything.
impl DiagnosticSink for () {
    fn report(&mut self, _top: &str, _bottom: &str) {}
}

impl<K: DiagnosticSink + ?Sized> DiagnosticSink for &mut K {
    fn report(&mut self, top: &str, bottom: &str) {
        (**self).report(top, bottom)
    }

    fn report_error(&mut self, error: &dyn fmt::Display) {
        (**self).report_error(error)
    }
}

/// Sink that emits `tracing` events.
///
/// Frames go out at `INFO` with the message `LCD Display: <top>, <bottom>`,
/// failures at `WARN`. Nothing is printed unless a subscriber is installed.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing sink.
    pub const fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, top: &str, bottom: &str) {
        tracing::info!(target: "rs_tempmon::lcd", "LCD Display: {}, {}", top, bottom);
    }

    fn report_error(&mut self, error: &dyn fmt::Display) {
        tracing::warn!(target: "rs_tempmon::lcd", "tick failed: {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counting {
        frames: usize,
        errors: usize,
    }

    impl DiagnosticSink for Counting {
        fn report(&mut self, _top: &str, _bottom: &str) {
            self.frames += 1;
        }

        fn report_error(&mut self, _error: &dyn fmt::Display) {
            self.errors += 1;
        }
    }

    #[test]
    fn unit_sink_accepts_everything() {
        let mut sink = ();
        sink.report("70.00 F", "+0.00%");
        sink.report_error(&"bus stalled");
    }

    #[test]
    fn forwarding_through_mut_reference() {
        let mut counting = Counting {
            frames: 0,
            errors: 0,
        };
        {
            let mut by_ref = &mut counting;
            by_ref.report("a", "b");
            by_ref.report_error(&"oops");
        }
        assert_eq!(counting.frames, 1);
        assert_eq!(counting.errors, 1);
    }

    #[test]
    fn tracing_sink_without_subscriber_is_silent() {
        let mut sink = TracingSink::new();
        sink.report("70.00 F", "+0.00%");
        sink.report_error(&"bus stalled");
    }
}
