//! The lazy-destruction wrapper.
//!
//! [`Lazy`] owns a value in embedded storage and, instead of destroying it
//! when the wrapper goes out of scope, hands the value's bytes and drop
//! thunk to its heap context. The value's destructor then runs at the next
//! flush (or at context teardown), in FIFO order with every other deferred
//! value on the same heap.

use std::fmt;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ops::{Deref, DerefMut};

use crate::descriptor::PendingDrop;
use crate::local::LocalHeap;

/// A value whose destruction is deferred to a heap context.
///
/// The payload lives inline in the wrapper (no allocation) and is reached
/// through [`Deref`]/[`DerefMut`]. When the wrapper is dropped, the payload
/// is *not* destroyed: its bytes move into the context's arena and its
/// destructor runs later, at an explicit [`LocalHeap::clear`] or at context
/// teardown. Payload types whose destruction is a no-op
/// (`!mem::needs_drop::<T>()`) skip the heap entirely.
///
/// Moving a `Lazy` relocates the payload bitwise and leaves nothing behind
/// to destroy — a plain Rust move, with the borrow checker ruling out any
/// use of the moved-from wrapper.
///
/// `T: 'static` because the deferred destructor may run as late as context
/// teardown, long after any borrowed data would have expired.
///
/// # Example
///
/// ```
/// use reap_arena::{Lazy, LocalHeap};
///
/// let heap = LocalHeap::with_default();
/// {
///     let name = Lazy::new_in(&heap, String::from("transient"));
///     assert_eq!(name.len(), 9);
/// } // `name` is gone, but the String's destructor has not run yet
/// assert_eq!(heap.len(), 1);
/// heap.clear(); // runs it now
/// ```
pub struct Lazy<'h, T: 'static> {
    /// Invariant: initialized from construction until the wrapper is
    /// consumed by `into_inner` or dropped.
    slot: MaybeUninit<T>,
    heap: &'h LocalHeap,
}

impl<'h, T> Lazy<'h, T> {
    /// Wrap `value`, deferring its destruction to `heap`.
    pub fn new_in(heap: &'h LocalHeap, value: T) -> Self {
        Self {
            slot: MaybeUninit::new(value),
            heap,
        }
    }

    /// Construct the payload from a closure.
    ///
    /// If `init` panics, no wrapper exists and nothing is ever enqueued —
    /// construction either fully succeeds or leaves no obligation behind.
    pub fn with(heap: &'h LocalHeap, init: impl FnOnce() -> T) -> Self {
        Self::new_in(heap, init())
    }

    /// The heap context this wrapper defers to.
    pub fn heap(&self) -> &'h LocalHeap {
        self.heap
    }

    /// Take the payload out, bypassing deferral.
    ///
    /// The value is returned to ordinary ownership; nothing is enqueued and
    /// its destructor will run wherever the caller lets it go out of scope.
    pub fn into_inner(self) -> T {
        let this = ManuallyDrop::new(self);
        // SAFETY: the slot is initialized (struct invariant) and `this`
        // suppresses the wrapper's Drop, so the value is read exactly once.
        unsafe { this.slot.assume_init_read() }
    }
}

impl<T> Deref for Lazy<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the slot is initialized until the wrapper is consumed or
        // dropped, and neither has happened while `self` is borrowable.
        unsafe { self.slot.assume_init_ref() }
    }
}

impl<T> DerefMut for Lazy<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as for Deref.
        unsafe { self.slot.assume_init_mut() }
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lazy").field(&**self).finish()
    }
}

impl<T> Drop for Lazy<'_, T> {
    fn drop(&mut self) {
        // Trivially destructible payloads have nothing to defer.
        if !mem::needs_drop::<T>() {
            return;
        }
        // SAFETY: the slot holds an initialized T (invariant) and this is
        // the last use of it — ownership of the destruction obligation
        // transfers to the heap, which runs the deleter exactly once.
        unsafe {
            self.heap
                .enqueue(PendingDrop::of::<T>(), self.slot.as_ptr().cast());
        }
    }
}
