use thiserror::Error;

/// A removal request the buffer refused to carry out.
///
/// These are recoverable: the buffer is left untouched, the error is handed
/// to the buffer's [`ErrorSink`](crate::ErrorSink), and the same value is
/// returned to the caller so it can retry with a corrected count.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// More bytes were requested than the buffer holds.
    #[error("cannot remove {requested} bytes from a buffer of {available} bytes")]
    RemoveBytesOutOfRange {
        /// Number of bytes the caller asked to remove.
        requested: usize,
        /// Number of bytes the buffer held at the time.
        available: usize,
    },
    /// More code points were requested than the buffer holds.
    #[error("cannot remove {requested} runes from a buffer of {available} runes")]
    RemoveRunesOutOfRange {
        /// Number of code points the caller asked to remove.
        requested: usize,
        /// Number of code points the buffer held at the time.
        available: usize,
    },
}

impl BufferError {
    /// How many units (bytes or runes) the rejected request asked for.
    #[must_use]
    pub fn requested(&self) -> usize {
        match *self {
            Self::RemoveBytesOutOfRange { requested, .. }
            | Self::RemoveRunesOutOfRange { requested, .. } => requested,
        }
    }

    /// How many units (bytes or runes) were available when the request was
    /// rejected.
    #[must_use]
    pub fn available(&self) -> usize {
        match *self {
            Self::RemoveBytesOutOfRange { available, .. }
            | Self::RemoveRunesOutOfRange { available, .. } => available,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::BufferError;

    #[test]
    fn display_names_both_counts() {
        let err = BufferError::RemoveBytesOutOfRange {
            requested: 9,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "cannot remove 9 bytes from a buffer of 4 bytes"
        );

        let err = BufferError::RemoveRunesOutOfRange {
            requested: 3,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "cannot remove 3 runes from a buffer of 2 runes"
        );
    }

    #[test]
    fn accessors() {
        let err = BufferError::RemoveRunesOutOfRange {
            requested: 7,
            available: 1,
        };
        assert_eq!(err.requested(), 7);
        assert_eq!(err.available(), 1);
    }
}
