//! Single-owner marker for [`TextBuffer`](crate::TextBuffer).
//!
//! A buffer handle must never be duplicated while it shares storage with
//! another handle. The handle is move-only (no `Copy`, no `Clone`), so the
//! duplicate cannot be written in safe code; what remains at runtime is the
//! marker below, which
//!
//! - keeps the buffer `!Sync`, ruling out shared mutation from other threads,
//! - is entered with `&mut` on every mutation, so each mutation carries proof
//!   of exclusive access, and
//! - counts those mutations as the buffer's revision.

use core::{cell::Cell, marker::PhantomData};

#[derive(Debug)]
pub(crate) struct Exclusive {
    revision: u64,
    // Cell<()> is Send but not Sync.
    _not_sync: PhantomData<Cell<()>>,
}

impl Exclusive {
    pub(crate) const fn new() -> Self {
        Self {
            revision: 0,
            _not_sync: PhantomData,
        }
    }

    /// Claim the buffer for one mutation.
    #[inline]
    pub(crate) fn enter(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Number of mutations made through this owner. Zero until the first.
    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }
}
