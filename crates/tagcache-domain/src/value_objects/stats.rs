//! Cache operation statistics

use serde::{Deserialize, Serialize};

/// Cache Operation Statistics
///
/// Snapshot of the counters a cache provider keeps since construction.
///
/// # Example
///
/// ```
/// use tagcache_domain::CacheStats;
///
/// let stats = CacheStats { hits: 3, misses: 1, ..Default::default() };
/// assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Reads that found a value
    pub hits: u64,
    /// Reads that found nothing
    pub misses: u64,
    /// Reads degraded to a miss because the backend failed
    pub read_errors: u64,
    /// Successful value writes
    pub writes: u64,
}

impl CacheStats {
    /// Fraction of reads that hit, `0.0` when nothing has been read
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}
