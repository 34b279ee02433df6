//! Test utilities for Reap development.
//!
//! Provides drop-order and drop-count probes ([`DropLog`], [`DropProbe`],
//! [`DropCounter`]) used across unit, integration, and property tests to
//! observe exactly when and in what order destructors run.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared, cloneable record of destructor invocations.
///
/// Each [`DropProbe`] minted from a log appends its id to the log when it
/// is destroyed, so a test can assert both *that* and *in what order*
/// destructors ran.
#[derive(Clone, Default)]
pub struct DropLog {
    entries: Rc<RefCell<Vec<u32>>>,
}

impl DropLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a probe that records `id` when dropped.
    pub fn probe(&self, id: u32) -> DropProbe {
        DropProbe {
            id,
            entries: Rc::clone(&self.entries),
        }
    }

    /// Mint a probe padded to a larger size, for capacity tests.
    pub fn padded<const N: usize>(&self, id: u32) -> Padded<N> {
        Padded {
            _pad: [0; N],
            _probe: self.probe(id),
        }
    }

    /// Snapshot of the recorded ids, oldest first.
    pub fn entries(&self) -> Vec<u32> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Records its id into the owning [`DropLog`] when destroyed.
pub struct DropProbe {
    id: u32,
    entries: Rc<RefCell<Vec<u32>>>,
}

impl DropProbe {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        self.entries.borrow_mut().push(self.id);
    }
}

/// A [`DropProbe`] padded with `N` inert bytes, so tests can control how
/// much arena space an element occupies.
pub struct Padded<const N: usize> {
    _pad: [u8; N],
    _probe: DropProbe,
}

/// Shared, cloneable destructor counter.
///
/// Each [`CountToken`] minted from a counter increments it when destroyed.
#[derive(Clone, Default)]
pub struct DropCounter {
    count: Rc<Cell<u64>>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a token that increments the counter when dropped.
    pub fn token(&self) -> CountToken {
        CountToken {
            count: Rc::clone(&self.count),
        }
    }

    /// Number of tokens destroyed so far.
    pub fn get(&self) -> u64 {
        self.count.get()
    }
}

/// Increments the owning [`DropCounter`] when destroyed.
pub struct CountToken {
    count: Rc<Cell<u64>>,
}

impl Drop for CountToken {
    fn drop(&mut self) {
        self.count.set(self.count.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_records_drop_order() {
        let log = DropLog::new();
        let a = log.probe(1);
        let b = log.probe(2);
        drop(b);
        drop(a);
        assert_eq!(log.entries(), vec![2, 1]);
    }

    #[test]
    fn padded_probe_still_records() {
        let log = DropLog::new();
        drop(log.padded::<64>(9));
        assert_eq!(log.entries(), vec![9]);
        assert!(std::mem::size_of::<Padded<64>>() >= 64);
    }

    #[test]
    fn counter_counts() {
        let counter = DropCounter::new();
        let t1 = counter.token();
        let t2 = counter.token();
        assert_eq!(counter.get(), 0);
        drop(t1);
        drop(t2);
        assert_eq!(counter.get(), 2);
    }
}
