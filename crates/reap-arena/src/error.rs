//! Heap-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while constructing or allocating from the heap.
///
/// Note that [`enqueue`](crate::heap::DeferredHeap::enqueue) never surfaces
/// an error: a failed arena allocation is consumed internally by the
/// immediate-destruction fallback. `CapacityExceeded` escapes only from
/// [`Arena::alloc`](crate::arena::Arena::alloc) itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// The heap configuration failed validation.
    InvalidConfig {
        /// Human-readable description of the violated constraint.
        reason: String,
    },
    /// The arena does not have room for the requested allocation.
    CapacityExceeded {
        /// Number of bytes requested (after alignment padding).
        requested: usize,
        /// Total arena capacity in bytes.
        capacity: usize,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => {
                write!(f, "invalid heap config: {reason}")
            }
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, capacity {capacity} bytes"
                )
            }
        }
    }
}

impl Error for HeapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_capacity_exceeded() {
        let err = HeapError::CapacityExceeded {
            requested: 64,
            capacity: 512,
        };
        assert_eq!(
            err.to_string(),
            "arena capacity exceeded: requested 64 bytes, capacity 512 bytes"
        );
    }

    #[test]
    fn display_formats_invalid_config() {
        let err = HeapError::InvalidConfig {
            reason: "capacity_bytes must be nonzero".into(),
        };
        assert!(err.to_string().contains("capacity_bytes"));
    }
}
