use alloc::vec::Vec;
use core::cell::RefCell;

use rstest::rstest;

use crate::{BufferError, TextBuffer};

#[rstest]
#[case("héllo", 1, "héll")]
#[case("héllo", 4, "h")]
#[case("héllo", 5, "")]
#[case("a€😀b", 2, "a€")]
#[case("", 0, "")]
fn truncate_runes_keeps_code_points_whole(
    #[case] text: &str,
    #[case] count: usize,
    #[case] expected: &str,
) {
    let mut buf = TextBuffer::from(text);
    buf.truncate_runes(count).unwrap();
    assert_eq!(buf, expected);
}

#[rstest]
#[case("héllo", 1, "éllo")]
#[case("héllo", 2, "llo")]
#[case("a€😀b", 3, "b")]
#[case("a€😀b", 0, "a€😀b")]
fn remove_leading_runes_keeps_code_points_whole(
    #[case] text: &str,
    #[case] count: usize,
    #[case] expected: &str,
) {
    let mut buf = TextBuffer::from(text);
    buf.remove_leading_runes(count).unwrap();
    assert_eq!(buf, expected);
}

#[rstest]
#[case("hello", 2, "hel")]
#[case("hello", 5, "")]
#[case("hello", 0, "hello")]
fn truncate_bytes(#[case] text: &str, #[case] count: usize, #[case] expected: &str) {
    let mut buf = TextBuffer::from(text);
    buf.truncate_bytes(count).unwrap();
    assert_eq!(buf, expected);
}

#[rstest]
#[case("hello", 2, "llo")]
#[case("hello", 5, "")]
#[case("hé", 1, "é")]
fn remove_leading_bytes(#[case] text: &str, #[case] count: usize, #[case] expected: &str) {
    let mut buf = TextBuffer::from(text);
    buf.remove_leading_bytes(count).unwrap();
    assert_eq!(buf, expected);
}

#[test]
fn byte_and_rune_counts_are_distinct_limits() {
    // Six bytes but five runes: six is fine for bytes, too many for runes.
    let seen = RefCell::new(Vec::new());
    let sink = |e: &BufferError| seen.borrow_mut().push(*e);
    let mut buf = TextBuffer::with_sink(&sink);
    buf.push_str("héllo");

    let err = buf.truncate_runes(6).unwrap_err();
    assert_eq!(
        err,
        BufferError::RemoveRunesOutOfRange {
            requested: 6,
            available: 5
        }
    );
    assert_eq!(buf, "héllo");

    buf.truncate_bytes(6).unwrap();
    assert!(buf.is_empty());
    assert_eq!(*seen.borrow(), [err]);
}

#[test]
fn runes_decode_fresh_after_byte_edits() {
    let mut buf = TextBuffer::from("añb");
    assert_eq!(buf.rune_len(), 3);
    buf.push_str("ü");
    buf.remove_leading_bytes(1).unwrap();
    // The rune view reflects the latest bytes, not an earlier decode.
    buf.remove_leading_runes(1).unwrap();
    assert_eq!(buf, "bü");
}

// Each maximal invalid subpart decodes to a single U+FFFD, so a truncated
// multi-byte prefix is one rune while unrelated bad bytes are one each.
#[rstest]
#[case(&b"a\xE2\x82"[..], 2)]
#[case(&b"\xFF\xFE"[..], 2)]
#[case(&b"\xF0\x9F\x98b"[..], 2)]
#[case(&b"a\xC3b"[..], 3)]
fn invalid_bytes_group_into_replacement_runes(#[case] bytes: &[u8], #[case] runes: usize) {
    let mut buf = TextBuffer::new();
    buf.push_bytes(bytes);
    assert_eq!(buf.rune_len(), runes);
    assert_eq!(crate::utf8::decode(bytes).len(), runes);
    assert_eq!(buf.split("").len(), runes);
}

#[test]
fn rune_removal_over_invalid_bytes() {
    let mut buf = TextBuffer::new();
    buf.push_bytes(b"a\xE2\x82");
    buf.truncate_runes(1).unwrap();
    assert_eq!(buf.as_bytes(), b"a");

    let mut buf = TextBuffer::new();
    buf.push_bytes(b"a\xE2\x82");
    assert_eq!(buf.split(""), ["a", "\u{FFFD}"]);
    buf.remove_leading_runes(1).unwrap();
    // The kept replacement rune is re-encoded, not the original bytes.
    assert_eq!(buf.as_bytes(), "\u{FFFD}".as_bytes());
    assert_eq!(buf.as_bytes(), b"\xEF\xBF\xBD");
}
