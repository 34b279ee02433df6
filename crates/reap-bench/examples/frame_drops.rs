//! End-of-frame batched destruction example.
//!
//! Demonstrates: per-frame job churn through `Lazy`, a single flush at the
//! frame boundary, and the stats counters tracing what the heap did.

use reap_arena::Lazy;
use reap_bench::{frame_profile, heap_for, Job};

fn main() {
    println!("=== Reap end-of-frame batching example ===\n");

    let heap = heap_for(frame_profile());

    for frame in 0..3u64 {
        // Simulate a frame: jobs come and go; none are destroyed yet.
        for seq in 0..80 {
            let job = Lazy::new_in(&heap, Job::new(frame * 1000 + seq));
            drop(job);
        }

        println!(
            "frame {frame}: pending={:3}  arena_used={:4}B / {}B",
            heap.len(),
            heap.arena_used(),
            heap.capacity(),
        );

        // Frame boundary: run every deferred destructor, oldest first.
        heap.clear();
        assert!(heap.is_empty());
    }

    let stats = heap.stats();
    println!(
        "\ntotals: enqueued={} immediate={} drained={}",
        stats.enqueued, stats.immediate_drops, stats.drained
    );
    assert_eq!(stats.submitted(), stats.completed());
}
