//! Cache policy: TTL heuristics, capacity, and the default type expansion
//!
//! TTLs are chosen from the *requested* shape, not the normalized one: a
//! small page size suggests a compact widget that re-renders often, and a
//! single requested type suggests a drawer pinned to one source system.
//! Both get longer TTLs than a broad dashboard query.

use activity_types::{ActivityFilters, ActivityType};
use chrono::Duration;

/// Tuning knobs for [`ActivityCache`](crate::ActivityCache)
///
/// The default type expansion (what an empty `types` filter means) lives here
/// rather than being hard-coded: the stock behavior excludes workflow tasks
/// so generic dashboards do not fill with workflow noise, but callers that
/// want them can supply their own expansion.
#[derive(Clone, Debug)]
pub struct CachePolicy {
    /// TTL for broad requests (seconds)
    pub default_ttl_secs: i64,
    /// TTL when exactly one type is requested — the "drawer" shape (seconds)
    pub drawer_ttl_secs: i64,
    /// TTL when the page size is at or below the small-page threshold (seconds)
    pub small_dataset_ttl_secs: i64,
    /// Page sizes at or below this get the small-dataset TTL
    pub small_page_threshold: u32,
    /// Maximum number of entries before oldest-by-creation eviction
    pub capacity: usize,
    /// Artificial delay on cache hits, to avoid flicker from synchronous
    /// resolution (milliseconds; 0 disables)
    pub hit_delay_ms: u64,
    /// Interval of the background expiry sweep (seconds)
    pub sweep_interval_secs: u64,
    /// What an empty/absent `types` filter expands to before fetching
    pub default_type_expansion: Vec<ActivityType>,
}

impl CachePolicy {
    /// The expansion used when none is configured: every known type except
    /// workflow tasks
    pub fn standard_type_expansion() -> Vec<ActivityType> {
        ActivityType::all()
            .into_iter()
            .filter(|t| *t != ActivityType::WorkflowTask)
            .collect()
    }

    pub fn with_type_expansion(mut self, types: impl IntoIterator<Item = ActivityType>) -> Self {
        self.default_type_expansion = types.into_iter().collect();
        self
    }

    pub fn with_hit_delay_ms(mut self, millis: u64) -> Self {
        self.hit_delay_ms = millis;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Pick the TTL for a request shape
    pub fn ttl_for(&self, filters: &ActivityFilters, page_size: u32) -> Duration {
        if page_size <= self.small_page_threshold {
            Duration::seconds(self.small_dataset_ttl_secs)
        } else if filters.types.len() == 1 {
            Duration::seconds(self.drawer_ttl_secs)
        } else {
            Duration::seconds(self.default_ttl_secs)
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            default_ttl_secs: 60,
            drawer_ttl_secs: 180,
            small_dataset_ttl_secs: 300,
            small_page_threshold: 5,
            capacity: 50,
            hit_delay_ms: 50,
            sweep_interval_secs: 60,
            default_type_expansion: Self::standard_type_expansion(),
        }
    }
}
