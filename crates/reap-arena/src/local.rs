//! Per-context heap ownership and the thread-local convenience accessor.
//!
//! The primary API is the explicit context object: construct a
//! [`LocalHeap`] and pass it to [`Lazy::new_in`](crate::lazy::Lazy::new_in)
//! wherever deferral is wanted. This keeps ownership visible and heaps
//! testable in isolation. [`with_thread_heap`] layers the original
//! one-heap-per-thread singleton on top, purely for ergonomics.

use std::cell::{Cell, RefCell};

use crate::config::HeapConfig;
use crate::descriptor::PendingDrop;
use crate::error::HeapError;
use crate::heap::DeferredHeap;
use crate::stats::HeapStats;

/// A [`DeferredHeap`] owned by one execution context.
///
/// Wraps the heap in interior mutability so that many [`Lazy`] wrappers can
/// share one context by `&` reference. Not `Sync` and not `Send`: a context
/// belongs to the thread that created it.
///
/// Dropping the context drains every remaining obligation.
///
/// Re-entrancy: a deferred destructor may submit new obligations to its own
/// context (they are destroyed immediately rather than queued), but it must
/// not call the drain or query methods of the context that is running it.
///
/// [`Lazy`]: crate::lazy::Lazy
pub struct LocalHeap {
    inner: RefCell<DeferredHeap>,
    /// Fallback destructions taken because the heap was mid-drain when the
    /// submission arrived. Kept outside the `RefCell` — that is the only
    /// way to record them while the drain holds the borrow.
    reentrant_drops: Cell<u64>,
}

impl LocalHeap {
    /// Create a context with the given configuration.
    pub fn new(config: HeapConfig) -> Result<Self, HeapError> {
        Ok(Self {
            inner: RefCell::new(DeferredHeap::new(config)?),
            reentrant_drops: Cell::new(0),
        })
    }

    /// Create a context with the default configuration
    /// (512-byte arena, 16-byte max alignment).
    pub fn with_default() -> Self {
        Self::new(HeapConfig::default())
            .expect("default heap config is valid")
    }

    /// Submit a destruction obligation to this context's heap.
    ///
    /// Behaves as [`DeferredHeap::enqueue`], with one addition: if the heap
    /// is currently draining (a deferred destructor submitted a new
    /// obligation to its own heap), the element is destroyed immediately
    /// instead — the same degrade-gracefully policy as arena overflow.
    ///
    /// # Safety
    ///
    /// Same contract as [`DeferredHeap::enqueue`].
    pub unsafe fn enqueue(&self, descriptor: PendingDrop, source: *const u8) {
        match self.inner.try_borrow_mut() {
            Ok(mut heap) => {
                // SAFETY: forwarded contract.
                unsafe { heap.enqueue(descriptor, source) };
            }
            Err(_) => {
                // SAFETY: per this function's contract, `source` is an
                // initialized, uniquely owned value of the descriptor's type.
                unsafe { (descriptor.deleter())(source.cast_mut()) };
                self.reentrant_drops.set(self.reentrant_drops.get() + 1);
            }
        }
    }

    /// Destroy the oldest pending element, if any. See
    /// [`DeferredHeap::dequeue`].
    pub fn dequeue(&self) -> bool {
        self.inner.borrow_mut().dequeue()
    }

    /// Destroy all pending elements in FIFO order. Idempotent.
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Number of elements currently pending destruction.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether no elements are pending.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Cumulative activity counters, including re-entrant fallbacks.
    pub fn stats(&self) -> HeapStats {
        let mut stats = self.inner.borrow().stats();
        stats.immediate_drops += self.reentrant_drops.get();
        stats
    }

    /// Bytes of arena currently committed to pending elements.
    pub fn arena_used(&self) -> usize {
        self.inner.borrow().arena_used()
    }

    /// Arena capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.inner.borrow().capacity()
    }
}

thread_local! {
    static THREAD_HEAP: LocalHeap = LocalHeap::with_default();
}

/// Run `f` with this thread's ambient heap context.
///
/// The context is created lazily with the default configuration on the
/// first call from each thread, lives for the rest of the thread, and
/// drains any still-pending elements at thread exit. Every call from one
/// thread sees the same instance; no instance is ever shared between
/// threads.
///
/// Prefer an explicit [`LocalHeap`] where you control construction — this
/// accessor exists for call sites that cannot thread a context through.
pub fn with_thread_heap<R>(f: impl FnOnce(&LocalHeap) -> R) -> R {
    THREAD_HEAP.with(f)
}
