#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use runebuf::{BufferError, TextBuffer};

/// One operation applied to both the buffer and the byte-vector model.
#[derive(Arbitrary, Debug)]
enum Op {
    PushStr(String),
    PushChar(char),
    PushByte(u8),
    Reserve(u16),
    TruncateBytes(u16),
    RemoveLeadingBytes(u16),
    TruncateRunes(u16),
    RemoveLeadingRunes(u16),
    Find(String),
    Split(String),
    Clear,
}

fn model_runes(model: &[u8]) -> Vec<char> {
    String::from_utf8_lossy(model).chars().collect()
}

fuzz_target!(|ops: Vec<Op>| {
    let reports = std::cell::Cell::new(0usize);
    let sink = |_: &BufferError| reports.set(reports.get() + 1);
    let mut buf = TextBuffer::with_sink(&sink);
    let mut model: Vec<u8> = Vec::new();
    let mut expected_reports = 0usize;

    for op in ops {
        let capacity = buf.capacity();
        match op {
            Op::PushStr(s) => {
                assert_eq!(buf.push_str(&s), s.len());
                model.extend_from_slice(s.as_bytes());
            }
            Op::PushChar(c) => {
                assert_eq!(buf.push_char(c), c.len_utf8());
                model.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
            }
            Op::PushByte(b) => {
                buf.push_byte(b);
                model.push(b);
            }
            Op::Reserve(n) => {
                let n = usize::from(n);
                buf.reserve(n);
                assert!(buf.capacity() - buf.len() >= n);
            }
            Op::TruncateBytes(n) => {
                let n = usize::from(n);
                if n > model.len() {
                    assert!(buf.truncate_bytes(n).is_err());
                    expected_reports += 1;
                } else {
                    buf.truncate_bytes(n).unwrap();
                    model.truncate(model.len() - n);
                }
            }
            Op::RemoveLeadingBytes(n) => {
                let n = usize::from(n);
                if n > model.len() {
                    assert!(buf.remove_leading_bytes(n).is_err());
                    expected_reports += 1;
                } else {
                    buf.remove_leading_bytes(n).unwrap();
                    model.drain(..n);
                }
            }
            Op::TruncateRunes(n) => {
                let n = usize::from(n);
                let runes = model_runes(&model);
                if n > runes.len() {
                    assert!(buf.truncate_runes(n).is_err());
                    expected_reports += 1;
                } else {
                    buf.truncate_runes(n).unwrap();
                    model = runes[..runes.len() - n].iter().collect::<String>().into_bytes();
                }
            }
            Op::RemoveLeadingRunes(n) => {
                let n = usize::from(n);
                let runes = model_runes(&model);
                if n > runes.len() {
                    assert!(buf.remove_leading_runes(n).is_err());
                    expected_reports += 1;
                } else {
                    buf.remove_leading_runes(n).unwrap();
                    model = runes[n..].iter().collect::<String>().into_bytes();
                }
            }
            Op::Find(needle) => {
                let expected = model
                    .windows(needle.len().max(1))
                    .position(|w| w == needle.as_bytes());
                let expected = if needle.is_empty() { Some(0) } else { expected };
                assert_eq!(buf.find(&needle), expected);
            }
            Op::Split(delimiter) => {
                let pieces = buf.split(&delimiter);
                assert!(!pieces.is_empty() || model.is_empty());
                if !delimiter.is_empty() && std::str::from_utf8(&model).is_ok() {
                    assert_eq!(pieces.join(&delimiter).as_bytes(), model.as_slice());
                }
            }
            Op::Clear => {
                buf.clear();
                model.clear();
            }
        }
        assert!(buf.capacity() >= capacity, "capacity shrank");
        assert_eq!(buf.as_bytes(), model.as_slice());
        assert_eq!(reports.get(), expected_reports);
    }
});
