use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{convert::Infallible, fmt, ops::Range, str::FromStr, str::Utf8Error};

use bstr::{BStr, ByteSlice};

use crate::{
    BufferError, BufferOptions,
    growth::next_capacity,
    guard::Exclusive,
    sink::{ErrorSink, TracingSink},
    utf8,
};

/// A growable UTF-8 text buffer with byte-indexed and rune-indexed editing.
///
/// Content is stored as raw bytes. Byte operations (`truncate_bytes`,
/// `remove_leading_bytes`, `slice`, ...) trust the caller to stay on UTF-8
/// boundaries. Rune operations (`truncate_runes`, `remove_leading_runes`,
/// `rune_len`) decode the content first and therefore never split a code
/// point.
///
/// Removal requests that exceed the content are rejected: the buffer is left
/// unchanged, the error goes to the buffer's [`ErrorSink`] and is also
/// returned.
///
/// ```rust
/// use runebuf::TextBuffer;
///
/// let mut buf = TextBuffer::from("héllo");
/// buf.truncate_runes(1).unwrap();
/// buf.remove_leading_runes(1).unwrap();
/// assert_eq!(buf, "éll");
/// assert_eq!(buf.len(), 4);
/// assert_eq!(buf.rune_len(), 3);
/// ```
///
/// # Ownership
///
/// A buffer has exactly one owner. It is neither `Copy` nor `Clone`, so a
/// second handle to the same storage cannot be made and then mutated:
///
/// ```rust,compile_fail
/// use runebuf::TextBuffer;
///
/// let mut original = TextBuffer::from("abc");
/// original.push_str("d");
/// let copy = original;
/// original.push_str("e"); // `original` was moved out
/// ```
///
/// ```rust,compile_fail
/// use runebuf::TextBuffer;
///
/// let original = TextBuffer::from("abc");
/// let _copy = original.clone();
/// ```
///
/// Independent copies are explicit and get their own storage (see
/// [`duplicate`](Self::duplicate) and [`sub_buffer`](Self::sub_buffer)).
///
/// Buffers are not `Sync`; a shared reference cannot cross threads:
///
/// ```rust,compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<runebuf::TextBuffer>();
/// ```
pub struct TextBuffer<S = TracingSink> {
    bytes: Vec<u8>,
    guard: Exclusive,
    sink: S,
}

impl TextBuffer {
    /// Create an empty buffer reporting to [`TracingSink`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    /// Create an empty buffer configured by `options`.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        Self::with_options_and_sink(options, TracingSink)
    }
}

impl<S: ErrorSink> TextBuffer<S> {
    /// Create an empty buffer reporting rejected requests to `sink`.
    #[must_use]
    pub fn with_sink(sink: S) -> Self {
        Self::with_options_and_sink(BufferOptions::default(), sink)
    }

    /// Create an empty buffer with both `options` and `sink`.
    #[must_use]
    pub fn with_options_and_sink(options: BufferOptions, sink: S) -> Self {
        Self {
            bytes: Vec::with_capacity(options.initial_capacity),
            guard: Exclusive::new(),
            sink,
        }
    }

    /// Replace the sink, keeping the content.
    #[must_use]
    pub fn reporting_to<T: ErrorSink>(self, sink: T) -> TextBuffer<T> {
        TextBuffer {
            bytes: self.bytes,
            guard: self.guard,
            sink,
        }
    }

    // --- capacity ---------------------------------------------------------

    /// Ensure at least `additional` bytes can be appended without another
    /// reallocation.
    ///
    /// When the spare capacity is too small the storage grows to
    /// `2 * capacity + additional`. Capacity never shrinks.
    pub fn reserve(&mut self, additional: usize) {
        self.guard.enter();
        self.grow_for(additional);
    }

    fn grow_for(&mut self, additional: usize) {
        let len = self.bytes.len();
        if let Some(target) = next_capacity(len, self.bytes.capacity(), additional) {
            self.bytes.reserve_exact(target - len);
        }
    }

    // --- appends ----------------------------------------------------------

    /// Append raw bytes, returning how many were written.
    ///
    /// The bytes are not validated; keeping the content UTF-8 is the caller's
    /// responsibility.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        self.guard.enter();
        self.grow_for(bytes.len());
        self.bytes.extend_from_slice(bytes);
        bytes.len()
    }

    /// Append text, returning the number of bytes written.
    pub fn push_str(&mut self, text: &str) -> usize {
        self.push_bytes(text.as_bytes())
    }

    /// Append the content of another buffer, returning the number of bytes
    /// written.
    pub fn push_buffer<T>(&mut self, other: &TextBuffer<T>) -> usize {
        self.push_bytes(&other.bytes)
    }

    /// Append a single raw byte.
    pub fn push_byte(&mut self, byte: u8) {
        self.guard.enter();
        self.grow_for(1);
        self.bytes.push(byte);
    }

    /// Append one code point, returning its encoded width (1 to 4 bytes).
    pub fn push_char(&mut self, ch: char) -> usize {
        if ch.is_ascii() {
            self.push_byte(ch as u8);
            return 1;
        }
        let mut scratch = [0u8; 4];
        self.push_bytes(ch.encode_utf8(&mut scratch).as_bytes())
    }

    // --- byte-indexed removal ----------------------------------------------

    /// Remove the last `count` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::RemoveBytesOutOfRange`] (after reporting it to
    /// the sink) if `count` exceeds [`len`](Self::len); the buffer is left
    /// unchanged.
    pub fn truncate_bytes(&mut self, count: usize) -> Result<(), BufferError> {
        let len = self.bytes.len();
        if count > len {
            return Err(self.reject(BufferError::RemoveBytesOutOfRange {
                requested: count,
                available: len,
            }));
        }
        self.guard.enter();
        self.bytes.truncate(len - count);
        Ok(())
    }

    /// Remove the first `count` bytes, keeping the allocation.
    ///
    /// # Errors
    ///
    /// Same policy as [`truncate_bytes`](Self::truncate_bytes).
    pub fn remove_leading_bytes(&mut self, count: usize) -> Result<(), BufferError> {
        let len = self.bytes.len();
        if count > len {
            return Err(self.reject(BufferError::RemoveBytesOutOfRange {
                requested: count,
                available: len,
            }));
        }
        self.guard.enter();
        self.bytes.drain(..count);
        Ok(())
    }

    // --- rune-indexed removal ----------------------------------------------

    /// Remove the last `count` code points.
    ///
    /// The content is decoded, the remaining prefix is re-encoded in place;
    /// a multi-byte code point is never split.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::RemoveRunesOutOfRange`] (after reporting it to
    /// the sink) if `count` exceeds [`rune_len`](Self::rune_len); the buffer
    /// is left unchanged.
    pub fn truncate_runes(&mut self, count: usize) -> Result<(), BufferError> {
        let runes = utf8::decode(&self.bytes);
        if count > runes.len() {
            return Err(self.reject(BufferError::RemoveRunesOutOfRange {
                requested: count,
                available: runes.len(),
            }));
        }
        self.replace_with_runes(&runes[..runes.len() - count]);
        Ok(())
    }

    /// Remove the first `count` code points.
    ///
    /// # Errors
    ///
    /// Same policy as [`truncate_runes`](Self::truncate_runes).
    pub fn remove_leading_runes(&mut self, count: usize) -> Result<(), BufferError> {
        let runes = utf8::decode(&self.bytes);
        if count > runes.len() {
            return Err(self.reject(BufferError::RemoveRunesOutOfRange {
                requested: count,
                available: runes.len(),
            }));
        }
        self.replace_with_runes(&runes[count..]);
        Ok(())
    }

    fn replace_with_runes(&mut self, runes: &[char]) {
        self.guard.enter();
        self.bytes.clear();
        self.grow_for(utf8::encoded_len(runes));
        utf8::encode_into(runes, &mut self.bytes);
    }

    /// Remove all content, keeping the allocation.
    pub fn clear(&mut self) {
        self.guard.enter();
        self.bytes.clear();
    }

    fn reject(&self, error: BufferError) -> BufferError {
        self.sink.report(&error);
        error
    }
}

impl<S> TextBuffer<S> {
    // --- queries ----------------------------------------------------------

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes the buffer can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Length in code points. Decodes the whole buffer.
    #[must_use]
    pub fn rune_len(&self) -> usize {
        self.bytes.chars().count()
    }

    /// Number of mutations applied so far; rejected requests do not count.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.guard.revision()
    }

    /// The byte at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= len()`. Use [`get_byte`](Self::get_byte) for a
    /// checked lookup.
    #[must_use]
    pub fn byte_at(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    /// The byte at `offset`, or `None` when out of range.
    #[must_use]
    pub fn get_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    /// Borrow `range` of the content without copying.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &BStr {
        self.bytes[range].as_bstr()
    }

    /// Copy `range` of the content into a `String`, replacing any invalid
    /// UTF-8 (for example a range that cuts a code point) with U+FFFD.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    #[must_use]
    pub fn substring(&self, range: Range<usize>) -> String {
        self.bytes[range].to_str_lossy().into_owned()
    }

    /// Iterate over the decoded code points.
    pub fn chars(&self) -> bstr::Chars<'_> {
        self.bytes.chars()
    }

    /// Whether every byte is a space, tab or line feed. Empty buffers are
    /// blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(|b| matches!(b, b' ' | b'\t' | b'\n'))
    }

    // --- search and split ----------------------------------------------------

    /// Byte offset of the first occurrence of `needle`, or `None`.
    ///
    /// An empty needle matches at offset 0.
    #[must_use]
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.bytes.find(needle)
    }

    /// Byte offset of the first occurrence of `needle`'s content, or `None`.
    #[must_use]
    pub fn find_buffer<T>(&self, needle: &TextBuffer<T>) -> Option<usize> {
        self.bytes.find(&needle.bytes)
    }

    /// Split on every non-overlapping occurrence of `delimiter`.
    ///
    /// Empty pieces are kept, so `"a,,b"` split on `","` gives
    /// `["a", "", "b"]`. Without any occurrence the result is the whole
    /// content as a single piece. An empty delimiter splits after every code
    /// point.
    #[must_use]
    pub fn split(&self, delimiter: &str) -> Vec<String> {
        self.pieces(delimiter.as_bytes())
            .into_iter()
            .map(|piece| piece.to_str_lossy().into_owned())
            .collect()
    }

    fn pieces<'a>(&'a self, delimiter: &[u8]) -> Vec<&'a [u8]> {
        if delimiter.is_empty() {
            return self
                .bytes
                .char_indices()
                .map(|(start, end, _)| &self.bytes[start..end])
                .collect();
        }
        self.bytes.split_str(delimiter).collect()
    }

    // --- conversions ------------------------------------------------------

    /// The raw content.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The content as a byte string.
    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        self.bytes.as_bstr()
    }

    /// The content as `&str`, borrowed without copying.
    ///
    /// # Errors
    ///
    /// Fails if raw byte edits left the content invalid UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(&self.bytes)
    }

    /// The content as text, borrowed when valid and copied with U+FFFD
    /// replacements otherwise.
    #[must_use]
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        self.bytes.to_str_lossy()
    }

    /// Consume the buffer into a `String`, replacing invalid UTF-8 with
    /// U+FFFD.
    #[must_use]
    pub fn into_string(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(text) => text,
            Err(err) => err.as_bytes().to_str_lossy().into_owned(),
        }
    }

    /// Consume the buffer into its raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl<S: ErrorSink + Clone> TextBuffer<S> {
    /// Copy the content into a new, independent buffer sharing this buffer's
    /// sink.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        self.copy_of(&self.bytes)
    }

    /// Copy `range` into a new, independent buffer.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    #[must_use]
    pub fn sub_buffer(&self, range: Range<usize>) -> Self {
        self.copy_of(&self.bytes[range])
    }

    /// Split on `delimiter`'s content, like [`split`](Self::split), returning
    /// independent buffers.
    #[must_use]
    pub fn split_buffers<T>(&self, delimiter: &TextBuffer<T>) -> Vec<Self> {
        self.pieces(&delimiter.bytes)
            .into_iter()
            .map(|piece| self.copy_of(piece))
            .collect()
    }

    fn copy_of(&self, bytes: &[u8]) -> Self {
        let mut copy = Self::with_sink(self.sink.clone());
        copy.push_bytes(bytes);
        copy
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        let mut buf = Self::new();
        buf.push_str(text);
        buf
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        Self {
            bytes: text.into_bytes(),
            guard: Exclusive::new(),
            sink: TracingSink,
        }
    }
}

impl FromStr for TextBuffer {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(text))
    }
}

impl<S> AsRef<[u8]> for TextBuffer<S> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<S> fmt::Debug for TextBuffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("content", &self.as_bstr())
            .field("len", &self.bytes.len())
            .field("capacity", &self.bytes.capacity())
            .finish_non_exhaustive()
    }
}

impl<S> fmt::Display for TextBuffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl<S: ErrorSink> fmt::Write for TextBuffer<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.push_char(c);
        Ok(())
    }
}

impl<S: ErrorSink> Extend<char> for TextBuffer<S> {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for ch in iter {
            self.push_char(ch);
        }
    }
}

impl<'a, S: ErrorSink> Extend<&'a str> for TextBuffer<S> {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for text in iter {
            self.push_str(text);
        }
    }
}

impl<S, T> PartialEq<TextBuffer<T>> for TextBuffer<S> {
    fn eq(&self, other: &TextBuffer<T>) -> bool {
        self.bytes == other.bytes
    }
}

impl<S> Eq for TextBuffer<S> {}

impl<S> PartialEq<str> for TextBuffer<S> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl<S> PartialEq<&str> for TextBuffer<S> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl<S> PartialEq<[u8]> for TextBuffer<S> {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}
