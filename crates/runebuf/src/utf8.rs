//! Stateless conversions between code points and UTF-8 bytes.
//!
//! Decoding follows `bstr`: each invalid sequence is replaced with
//! U+FFFD using the "substitution of maximal subparts" strategy, the same
//! policy as [`String::from_utf8_lossy`](alloc::string::String::from_utf8_lossy).

use alloc::vec::Vec;

use bstr::ByteSlice;

/// Total number of bytes needed to encode `runes` as UTF-8.
#[must_use]
pub fn encoded_len(runes: &[char]) -> usize {
    runes.iter().map(|ch| ch.len_utf8()).sum()
}

/// Append the UTF-8 encoding of `runes` to `dst`, returning the number of
/// bytes written.
pub fn encode_into(runes: &[char], dst: &mut Vec<u8>) -> usize {
    let start = dst.len();
    let mut scratch = [0u8; 4];
    for &ch in runes {
        if ch.is_ascii() {
            dst.push(ch as u8);
        } else {
            dst.extend_from_slice(ch.encode_utf8(&mut scratch).as_bytes());
        }
    }
    dst.len() - start
}

/// Encode `runes` into a freshly allocated, exactly sized byte vector.
#[must_use]
pub fn encode(runes: &[char]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(runes));
    encode_into(runes, &mut out);
    out
}

/// Decode `bytes` into code points.
#[must_use]
pub fn decode(bytes: &[u8]) -> Vec<char> {
    bytes.chars().collect()
}
