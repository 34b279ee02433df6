//! The deferred heap: arena storage plus a FIFO of pending drops.
//!
//! [`DeferredHeap`] is the single-owner core structure. It accepts
//! destruction obligations via [`DeferredHeap::enqueue`], stores the
//! payload bytes in its [`Arena`], and runs the deleters in submission
//! order when asked ([`DeferredHeap::dequeue`] / [`DeferredHeap::clear`])
//! or at its own teardown.
//!
//! # Lifecycle
//!
//! ```text
//! DeferredHeap
//! ├── Arena            (fixed-capacity aligned byte buffer)
//! ├── pending queue    (SmallVec<PendingDrop> + head cursor)
//! └── HeapStats        (cumulative counters)
//!
//! enqueue  → bump-alloc → copy bytes → push descriptor
//!            └─ on overflow: run deleter on the source immediately
//! dequeue  → run head deleter against arena bytes → advance head
//!            └─ on full drain: clear queue, rewind arena to offset 0
//! drop     → clear()
//! ```
//!
//! The queue is append-only between full drains: interior slots are never
//! reclaimed individually, so enqueue stays O(1) and the arena never
//! fragments. The cost — space held until the next full drain — is bounded
//! by the configured capacity.

use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::arena::Arena;
use crate::config::HeapConfig;
use crate::descriptor::PendingDrop;
use crate::error::HeapError;
use crate::raw;
use crate::stats::HeapStats;

/// Inline capacity of the pending queue. Typical frame/batch workloads on
/// the default 512-byte arena stay within this; larger batches spill to
/// the heap transparently.
const INLINE_PENDING: usize = 8;

/// A fixed-capacity heap of deferred destruction obligations.
///
/// One instance serves one logical owner — the type is neither `Send` nor
/// `Sync`, because queued deleters may describe payloads that must be
/// dropped on the thread that created them. Use one heap per thread (see
/// [`with_thread_heap`](crate::local::with_thread_heap)) or one per
/// explicitly threaded context ([`LocalHeap`](crate::local::LocalHeap)).
///
/// Destruction order exactly matches enqueue order (FIFO), regardless of
/// how many distinct payload types are interleaved.
pub struct DeferredHeap {
    arena: Arena,
    /// Pending descriptors in enqueue order. Entries before `head` are
    /// already destroyed; the vector is only truncated on a full drain.
    pending: SmallVec<[PendingDrop; INLINE_PENDING]>,
    /// Index of the oldest live descriptor.
    head: usize,
    stats: HeapStats,
    config: HeapConfig,
    /// One owner at a time: deleters are not required to be `Send`.
    _not_send: PhantomData<*mut ()>,
}

impl DeferredHeap {
    /// Create a heap with the given configuration.
    ///
    /// Returns `Err(HeapError::InvalidConfig)` if the capacity is zero or
    /// `max_align` is not a power of two within
    /// [`HeapConfig::MAX_SUPPORTED_ALIGN`].
    pub fn new(config: HeapConfig) -> Result<Self, HeapError> {
        if config.capacity_bytes == 0 {
            return Err(HeapError::InvalidConfig {
                reason: "capacity_bytes must be nonzero".into(),
            });
        }
        if !config.max_align.is_power_of_two()
            || config.max_align > HeapConfig::MAX_SUPPORTED_ALIGN
        {
            return Err(HeapError::InvalidConfig {
                reason: format!(
                    "max_align must be a power of two <= {} (got {})",
                    HeapConfig::MAX_SUPPORTED_ALIGN,
                    config.max_align,
                ),
            });
        }
        Ok(Self {
            arena: Arena::new(config.capacity_bytes),
            pending: SmallVec::new(),
            head: 0,
            stats: HeapStats::default(),
            config,
            _not_send: PhantomData,
        })
    }

    /// Submit a destruction obligation.
    ///
    /// The payload bytes at `source` are copied into the arena at the next
    /// free aligned offset and the descriptor is appended to the queue. If
    /// the element does not fit — arena full, or the payload's alignment
    /// exceeds the configured `max_align` — its deleter runs against
    /// `source` immediately instead, the queue is left untouched, and the
    /// only trace is [`HeapStats::immediate_drops`]. This operation never
    /// fails observably and never panics.
    ///
    /// # Safety
    ///
    /// `source` must point to an initialized value of the type `descriptor`
    /// was built for, valid for reads and writes of `descriptor.size()`
    /// bytes and aligned to `descriptor.align()`. Ownership of the value's
    /// destruction transfers to the heap: the caller must not read, write,
    /// drop, or reuse the value afterwards.
    pub unsafe fn enqueue(&mut self, mut descriptor: PendingDrop, source: *const u8) {
        let size = descriptor.size() as usize;
        let align = descriptor.align() as usize;

        if align > self.config.max_align {
            // SAFETY: per this function's contract, `source` is an
            // initialized, uniquely owned value of the descriptor's type.
            unsafe { (descriptor.deleter())(source.cast_mut()) };
            self.stats.immediate_drops += 1;
            return;
        }

        match self.arena.alloc(size, align) {
            Ok(offset) => {
                descriptor.set_offset(offset);
                // SAFETY: `source` is readable for `size` bytes (contract)
                // and the arena slice is a disjoint exclusive borrow.
                unsafe { raw::copy_into(source, self.arena.bytes_mut(offset, size)) };
                self.pending.push(descriptor);
                self.stats.enqueued += 1;
            }
            Err(_) => {
                // Degrade gracefully: destroy in place, silently.
                // SAFETY: as in the over-aligned branch above.
                unsafe { (descriptor.deleter())(source.cast_mut()) };
                self.stats.immediate_drops += 1;
            }
        }
    }

    /// Destroy the oldest pending element, if any.
    ///
    /// Returns `false` when nothing is pending. When the last pending
    /// element drains, the queue and the arena cursor rewind to zero, so
    /// the next enqueue packs from the start of the arena again.
    pub fn dequeue(&mut self) -> bool {
        if self.head >= self.pending.len() {
            return false;
        }
        let descriptor = self.pending[self.head];
        let ptr = self.arena.ptr_at(descriptor.offset());
        // SAFETY: the bytes at the recorded offset hold the initialized
        // value this descriptor was enqueued with (arena slots are stable
        // until dequeued), and the deleter is the drop thunk monomorphized
        // for that value's type. Each descriptor is dequeued exactly once.
        unsafe { (descriptor.deleter())(ptr) };
        self.head += 1;
        self.stats.drained += 1;

        if self.head == self.pending.len() {
            self.pending.clear();
            self.head = 0;
            self.arena.reset();
        }
        true
    }

    /// Destroy all pending elements in FIFO order.
    ///
    /// Idempotent; a no-op on an empty heap.
    pub fn clear(&mut self) {
        while self.dequeue() {}
    }

    /// Number of elements currently pending destruction.
    pub fn len(&self) -> usize {
        self.pending.len() - self.head
    }

    /// Whether no elements are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cumulative activity counters.
    pub fn stats(&self) -> HeapStats {
        self.stats
    }

    /// Bytes of arena currently committed to pending elements
    /// (including alignment padding).
    pub fn arena_used(&self) -> usize {
        self.arena.used()
    }

    /// Arena capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// The configuration this heap was built with.
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }
}

impl Drop for DeferredHeap {
    /// Teardown drains every remaining obligation — destructors are never
    /// silently dropped, even if the owner forgot to flush.
    fn drop(&mut self) {
        self.clear();
    }
}
