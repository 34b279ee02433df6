//! Pending-drop descriptors: the type-erased record of one deferred
//! destruction.
//!
//! A [`PendingDrop`] pairs the byte-level shape of a payload (size and
//! alignment) with the monomorphized drop thunk for its type. The payload's
//! concrete type never appears at runtime — the deleter function pointer is
//! the only capability retained.

use std::fmt;
use std::mem;

use crate::raw;

/// Type-erased destructor: given a pointer to the payload's bytes, runs the
/// correct `Drop` impl. Must not unwind.
pub type RawDeleter = unsafe fn(*mut u8);

/// Descriptor for one pending deferred destruction.
///
/// Created by [`PendingDrop::of`] with a placeholder offset; the heap
/// assigns the real arena offset at enqueue time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct PendingDrop {
    /// Byte length of the payload's representation.
    size: u32,
    /// Alignment required by the payload's type.
    align: u32,
    /// Drop thunk bound to the payload's type.
    deleter: RawDeleter,
    /// Byte offset into the arena; assigned at enqueue time.
    offset: u32,
}

impl PendingDrop {
    /// Build the descriptor for a payload of type `T`.
    ///
    /// Sizes beyond `u32::MAX` saturate, which routes the element to the
    /// immediate-destruction fallback (no arena of that size exists).
    pub fn of<T>() -> Self {
        Self {
            size: u32::try_from(mem::size_of::<T>()).unwrap_or(u32::MAX),
            align: u32::try_from(mem::align_of::<T>()).unwrap_or(u32::MAX),
            deleter: raw::drop_erased::<T>,
            offset: 0,
        }
    }

    /// Byte length of the payload.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Alignment required by the payload's type.
    pub fn align(&self) -> u32 {
        self.align
    }

    /// The type-bound drop thunk.
    pub fn deleter(&self) -> RawDeleter {
        self.deleter
    }

    /// Byte offset into the arena where the payload lives.
    ///
    /// Meaningful only after the descriptor has been enqueued.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub(crate) fn set_offset(&mut self, offset: u32) {
        self.offset = offset;
    }
}

impl fmt::Display for PendingDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PendingDrop(size={}, align={}, off={})",
            self.size, self.align, self.offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_captures_size_and_align() {
        let desc = PendingDrop::of::<u64>();
        assert_eq!(desc.size(), 8);
        assert_eq!(desc.align(), 8);
        assert_eq!(desc.offset(), 0);
    }

    #[test]
    fn of_zero_sized_type() {
        struct Marker;
        impl Drop for Marker {
            fn drop(&mut self) {}
        }
        let desc = PendingDrop::of::<Marker>();
        assert_eq!(desc.size(), 0);
        assert_eq!(desc.align(), 1);
    }

    #[test]
    fn set_offset_round_trips() {
        let mut desc = PendingDrop::of::<String>();
        desc.set_offset(48);
        assert_eq!(desc.offset(), 48);
    }

    #[test]
    fn deleter_runs_drop() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct Flag(Rc<Cell<u32>>);
        impl Drop for Flag {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let count = Rc::new(Cell::new(0));
        let desc = PendingDrop::of::<Flag>();
        let mut slot = std::mem::MaybeUninit::new(Flag(Rc::clone(&count)));
        // SAFETY: slot holds an initialized Flag; dropped exactly once here.
        unsafe { (desc.deleter())(slot.as_mut_ptr().cast()) };
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn display_includes_shape() {
        let desc = PendingDrop::of::<u32>();
        assert_eq!(desc.to_string(), "PendingDrop(size=4, align=4, off=0)");
    }
}
