//! Fixed-capacity deferred-destruction arena for Reap.
//!
//! Short-lived values are expensive to destroy one at a time. This crate
//! batches those destructions: a [`Lazy`] wrapper places a value in inline
//! storage and, when the wrapper goes out of scope, hands the value's bytes
//! and a type-erased drop thunk to a per-context [`DeferredHeap`] instead
//! of running the destructor. The heap runs every pending destructor in
//! FIFO order at an explicit flush, or at context teardown at the latest.
//!
//! # Architecture
//!
//! ```text
//! LocalHeap (per-context owner, RefCell + re-entrancy fallback)
//! └── DeferredHeap
//!     ├── Arena                 (fixed-capacity aligned byte buffer)
//!     ├── SmallVec<PendingDrop> (FIFO queue, head cursor)
//!     └── HeapStats             (cumulative counters)
//!
//! Lazy<'h, T> ── drop ──▶ LocalHeap::enqueue ──▶ arena copy + queue push
//!                                   └─ overflow / over-aligned / re-entrant:
//!                                      destroy immediately, count it
//! ```
//!
//! # Capacity policy
//!
//! The arena never grows. An element that does not fit is destroyed
//! synchronously at submission time — a silent, bounded degradation that
//! trades away batching for that one element instead of allocating or
//! failing. Interior arena space is reclaimed only en masse: the cursor
//! rewinds to zero when the queue fully drains.
//!
//! # Safety
//!
//! This is the only crate in the workspace that may contain `unsafe` code.
//! The unsafe surface is concentrated in `raw.rs` (drop thunk, byte
//! reinterpret and copy) plus the enqueue/dequeue/deref paths that consume
//! those primitives; every unsafe block carries a `// SAFETY:` comment.
//!
//! # One heap per context
//!
//! A heap instance is exclusively owned by one logical execution context.
//! There is no internal locking — [`DeferredHeap`] is `!Send + !Sync` and
//! cross-context sharing is ruled out at the type level, not by runtime
//! checks. Use [`with_thread_heap`] for the ambient one-heap-per-thread
//! pattern, or construct [`LocalHeap`]s explicitly for anything finer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod arena;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod heap;
pub mod lazy;
pub mod local;
mod raw;
pub mod stats;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::HeapConfig;
pub use descriptor::{PendingDrop, RawDeleter};
pub use error::HeapError;
pub use heap::DeferredHeap;
pub use lazy::Lazy;
pub use local::{with_thread_heap, LocalHeap};
pub use stats::HeapStats;
