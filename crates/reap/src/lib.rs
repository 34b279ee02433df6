//! Reap: deferred destruction for short-lived values.
//!
//! Destroying many small values one at a time — at the end of every frame,
//! batch, or request — scatters destructor work across the hot path. Reap
//! batches it instead: wrap a value in [`Lazy`](arena::Lazy) and its
//! destructor runs later, at a flush point you choose, in the order the
//! wrappers were dropped.
//!
//! # Quick start
//!
//! ```rust
//! use reap::prelude::*;
//!
//! let heap = LocalHeap::with_default();
//!
//! // Work with wrapped values exactly like ordinary ones.
//! {
//!     let first = Lazy::new_in(&heap, String::from("alpha"));
//!     let second = Lazy::new_in(&heap, String::from("beta"));
//!     assert_eq!(first.len() + second.len(), 9);
//! } // both wrappers gone; neither String destroyed yet
//!
//! assert_eq!(heap.len(), 2);
//!
//! // End of the batch: run every pending destructor, oldest first.
//! heap.clear();
//! assert!(heap.is_empty());
//! ```
//!
//! For call sites that cannot thread a context through, the ambient
//! per-thread accessor mirrors the same API:
//!
//! ```rust
//! use reap::prelude::*;
//!
//! with_thread_heap(|heap| {
//!     let _value = Lazy::new_in(heap, vec![1u8, 2, 3]);
//! });
//! // Drained at the next clear() on this thread, or at thread exit.
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `reap-arena` | The deferred heap, arena storage, lazy wrapper, config, stats |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Deferred heap, arena storage, and the lazy wrapper (`reap-arena`).
pub use reap_arena as arena;

/// Common imports for typical Reap usage.
///
/// ```rust
/// use reap::prelude::*;
/// ```
pub mod prelude {
    pub use reap_arena::{
        with_thread_heap, DeferredHeap, HeapConfig, HeapError, HeapStats, Lazy, LocalHeap,
    };
}
