use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::arbitrary::{Append, test_count};
use crate::{NoopSink, TextBuffer};

/// Constructing from text and converting back yields the same text.
#[quickcheck]
fn text_roundtrip(text: String) -> bool {
    let buf = TextBuffer::from(text.as_str());
    buf.to_str() == Ok(text.as_str()) && buf.into_string() == text
}

/// Every append grows the buffer by exactly the bytes it writes, and the
/// final content is the concatenation of the pieces however many
/// reallocations happened along the way.
#[test]
fn appends_concatenate_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(appends: Vec<Append>) -> bool {
        let mut buf = TextBuffer::with_sink(NoopSink);
        let mut expected = Vec::new();
        for append in &appends {
            let before_len = buf.len();
            let before_runes = buf.rune_len();
            let bytes = append.expected_bytes();
            match append {
                Append::Str(s) => {
                    if buf.push_str(s) != bytes.len() {
                        return false;
                    }
                }
                Append::Char(c) => {
                    if buf.push_char(*c) != bytes.len() || buf.rune_len() != before_runes + 1 {
                        return false;
                    }
                }
                Append::Byte(b) => buf.push_byte(*b),
            }
            if buf.len() != before_len + bytes.len() || buf.capacity() < buf.len() {
                return false;
            }
            expected.extend_from_slice(&bytes);
        }
        buf.as_bytes() == expected.as_slice() && buf.to_str().is_ok()
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<Append>) -> bool);
}

/// Capacity never shrinks across appends.
#[quickcheck]
fn capacity_is_monotonic(pieces: Vec<String>) -> bool {
    let mut buf = TextBuffer::with_sink(NoopSink);
    let mut last = buf.capacity();
    for piece in &pieces {
        buf.push_str(piece);
        if buf.capacity() < last {
            return false;
        }
        last = buf.capacity();
    }
    true
}
