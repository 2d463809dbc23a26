/// Configuration for a new [`TextBuffer`](crate::TextBuffer).
///
/// # Examples
///
/// ```rust
/// use runebuf::{BufferOptions, TextBuffer};
///
/// let buf = TextBuffer::with_options(BufferOptions {
///     initial_capacity: 64,
/// });
/// assert!(buf.capacity() >= 64);
/// assert!(buf.is_empty());
/// ```
///
/// # Default
///
/// All options default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferOptions {
    /// Number of bytes to allocate up front.
    ///
    /// Later appends grow the allocation as usual; this only avoids the first
    /// few reallocations when the final size is roughly known.
    ///
    /// # Default
    ///
    /// `0` (no allocation until the first append)
    pub initial_capacity: usize,
}
