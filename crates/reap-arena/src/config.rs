//! Heap configuration parameters.

/// Configuration for a deferred heap.
///
/// Controls arena capacity and the largest payload alignment the arena will
/// host in place. Validated at heap construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    /// Arena capacity in bytes.
    ///
    /// Default: 512. The arena never grows — an element that does not fit
    /// is destroyed immediately instead of being deferred.
    pub capacity_bytes: usize,

    /// Largest payload alignment (in bytes) stored in the arena.
    ///
    /// Must be a power of two, at most [`HeapConfig::MAX_SUPPORTED_ALIGN`].
    /// Payloads with a stricter alignment take the immediate-destruction
    /// fallback rather than being packed at a misaligned offset.
    pub max_align: usize,
}

impl HeapConfig {
    /// Default arena capacity in bytes.
    pub const DEFAULT_CAPACITY_BYTES: usize = 512;

    /// Upper bound on `max_align`, fixed by the alignment of the arena's
    /// backing storage.
    pub const MAX_SUPPORTED_ALIGN: usize = 16;

    /// Create a config with the given arena capacity.
    ///
    /// Uses the default value for `max_align`.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            max_align: Self::MAX_SUPPORTED_ALIGN,
        }
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_512_bytes() {
        let config = HeapConfig::default();
        assert_eq!(config.capacity_bytes, 512);
    }

    #[test]
    fn new_preserves_capacity() {
        let config = HeapConfig::new(64);
        assert_eq!(config.capacity_bytes, 64);
        assert_eq!(config.max_align, HeapConfig::MAX_SUPPORTED_ALIGN);
    }
}
