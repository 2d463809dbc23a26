//! A growable UTF-8 text buffer with byte-exact and rune-exact editing.
//!
//! [`TextBuffer`] stores text as raw bytes and offers two families of
//! operations: byte-indexed (append, slice, truncate, search, split) and
//! rune-indexed (append one code point, count code points, remove code points
//! from either end). Removal requests larger than the content are rejected
//! without touching the buffer and reported to an [`ErrorSink`].
//!
//! ```rust
//! use runebuf::TextBuffer;
//!
//! let mut buf = TextBuffer::from("a,,b");
//! assert_eq!(buf.split(","), ["a", "", "b"]);
//! assert_eq!(buf.find(",b"), Some(2));
//! assert_eq!(buf.find("z"), None);
//!
//! buf.push_char('€');
//! assert_eq!(buf.len(), 7);
//! assert_eq!(buf.rune_len(), 5);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod error;
mod growth;
mod guard;
mod options;
mod sink;
pub mod utf8;

#[cfg(test)]
mod tests;

pub use buffer::TextBuffer;
pub use error::BufferError;
pub use growth::next_capacity;
pub use options::BufferOptions;
pub use sink::{ErrorSink, NoopSink, TracingSink};
