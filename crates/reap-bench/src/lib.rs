//! Benchmark profiles and utilities for Reap.
//!
//! Provides heap configurations and a reference payload type shared by the
//! criterion benches and the examples:
//!
//! - [`default_profile`]: the stock 512-byte arena
//! - [`frame_profile`]: a 4 KiB arena sized for one frame's worth of jobs
//! - [`Job`]: a fixed-size payload with a non-trivial destructor

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::hint::black_box;

use reap_arena::{HeapConfig, LocalHeap};

/// The stock configuration: 512-byte arena, 16-byte max alignment.
pub fn default_profile() -> HeapConfig {
    HeapConfig::default()
}

/// A frame-batch configuration: 4 KiB arena, enough for ~100 [`Job`]s.
pub fn frame_profile() -> HeapConfig {
    HeapConfig::new(4096)
}

/// Build a heap from a profile, panicking on the (statically valid) config.
pub fn heap_for(profile: HeapConfig) -> LocalHeap {
    LocalHeap::new(profile).expect("benchmark profile is valid")
}

/// Reference payload: 32 bytes of state and a destructor the optimizer
/// cannot delete.
pub struct Job {
    state: [u64; 4],
}

impl Job {
    /// Create a job from a sequence number.
    pub fn new(seq: u64) -> Self {
        Self {
            state: [seq, seq ^ 0x5DEECE66D, seq.rotate_left(17), !seq],
        }
    }
}

impl Drop for Job {
    fn drop(&mut self) {
        // Keep the destructor observable so deferral has real work to batch.
        black_box(&self.state);
    }
}
