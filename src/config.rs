//! Tuning knobs for the identity tables backing every weak collection.

/// Configuration for a [`WeakKeyMap`](crate::weak::WeakKeyMap) or
/// [`WeakKeySet`](crate::weak::WeakKeySet).
///
/// Dead entries (whose key has no strong reference left) can never be
/// looked up again, but their slot and value linger until a sweep. Sweeps
/// run on insertion, at most once every `min_sweep_interval` insertions and
/// otherwise proportionally to the live size, which keeps insertion
/// amortized O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Number of slots to allocate up front.
    pub initial_capacity: usize,
    /// Minimum number of insertions between two sweeps. Never zero.
    pub min_sweep_interval: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        return TableConfig {
            initial_capacity: 0,
            min_sweep_interval: 32,
        };
    }
}

impl TableConfig {
    /// Create a config with default values.
    pub fn new() -> TableConfig {
        return TableConfig::default();
    }

    /// Set the number of pre-allocated slots.
    pub fn with_capacity(mut self, capacity: usize) -> TableConfig {
        self.initial_capacity = capacity;
        return self;
    }

    /// Set the minimum number of insertions between sweeps.
    ///
    /// Zero is clamped to one, which sweeps on every insertion.
    pub fn with_sweep_interval(mut self, interval: usize) -> TableConfig {
        self.min_sweep_interval = interval.max(1);
        return self;
    }
}
