//! Capacity policy for appends.
//!
//! When an append does not fit in the spare capacity, the buffer is
//! reallocated to `2 * capacity + additional` bytes. Doubling keeps the
//! amortized cost per appended byte constant; adding `additional` makes sure
//! a single large append always fits after one reallocation.

/// Returns the capacity the buffer must grow to so that `additional` more
/// bytes fit, or `None` if the current allocation already has room.
///
/// The returned capacity is never smaller than `capacity`.
#[must_use]
pub fn next_capacity(len: usize, capacity: usize, additional: usize) -> Option<usize> {
    debug_assert!(len <= capacity, "length {len} exceeds capacity {capacity}");
    if capacity - len >= additional {
        return None;
    }
    Some(capacity.saturating_mul(2).saturating_add(additional))
}
