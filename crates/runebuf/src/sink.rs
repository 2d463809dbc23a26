//! Destinations for recoverable buffer errors.
//!
//! A buffer reports each rejected request to its sink exactly once and then
//! carries on; the sink has no way to feed anything back into the buffer.

use crate::BufferError;

/// Receives errors for requests a [`TextBuffer`](crate::TextBuffer) refused.
///
/// Any `Fn(&BufferError)` closure is a sink:
///
/// ```rust
/// use std::cell::Cell;
/// use runebuf::{BufferError, TextBuffer};
///
/// let rejected = Cell::new(0);
/// let mut buf = TextBuffer::with_sink(|_: &BufferError| rejected.set(rejected.get() + 1));
/// buf.push_str("ab");
/// assert!(buf.truncate_bytes(5).is_err());
/// assert_eq!(rejected.get(), 1);
/// ```
pub trait ErrorSink {
    /// Record one rejected request.
    fn report(&self, error: &BufferError);
}

impl<F> ErrorSink for F
where
    F: Fn(&BufferError),
{
    fn report(&self, error: &BufferError) {
        self(error);
    }
}

/// The default sink: emits one `WARN` level `tracing` event per error.
///
/// The event carries `requested` and `available` as integer fields and the
/// error itself as the display field `error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, error: &BufferError) {
        tracing::warn!(
            requested = error.requested(),
            available = error.available(),
            error = %error,
            "text buffer request ignored"
        );
    }
}

/// Discards every error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopSink;

impl ErrorSink for NoopSink {
    fn report(&self, _error: &BufferError) {}
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::{ErrorSink, NoopSink, TracingSink};
    use crate::BufferError;

    const ERR: BufferError = BufferError::RemoveBytesOutOfRange {
        requested: 2,
        available: 1,
    };

    #[test]
    fn closure_receives_error() {
        let seen = RefCell::new(Vec::new());
        let sink = |e: &BufferError| seen.borrow_mut().push(*e);
        sink.report(&ERR);
        assert_eq!(*seen.borrow(), [ERR]);
    }

    // Events go nowhere without a subscriber; tests/tracing_sink.rs checks
    // what is emitted.
    #[test]
    fn builtin_sinks_accept_errors_without_subscriber() {
        TracingSink.report(&ERR);
        NoopSink.report(&ERR);
    }
}
