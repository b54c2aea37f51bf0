//! Activity Cache
//!
//! A session-scoped, in-memory, time-expiring cache fronting the server-side
//! activity fetch call. Entries are keyed by the canonicalized
//! (filter set, page, page size) tuple. The cache is a best-effort
//! optimization layer: disposable, reconstructable from the server at any
//! time, and never a source of truth.
//!
//! # Key Concepts
//!
//! - **Cache key**: a deterministic string derived from the canonical filter
//!   string plus pagination — see [`generate_cache_key`].
//! - **TTL heuristics**: smaller page sizes and narrower type filters get
//!   longer TTLs, reflecting their lower cardinality and higher reuse —
//!   see [`CachePolicy`].
//! - **Invalidation**: whole-cache, per-entry, type-scoped (substring match
//!   on serialized keys), or activity-id-triggered full clear — see
//!   [`InvalidationScope`].
//! - **Generations**: every invalidation bumps a per-key generation (or the
//!   global epoch), so an in-flight fetch never resurrects a key that was
//!   invalidated while it was on the wire.
//! - **Coalescing**: concurrent misses for the same key share one fetch.
//!
//! # Example
//!
//! ```rust,no_run
//! use activity_cache::{ActivityCache, ActivityFetcher, CachePolicy, SystemClock};
//! use activity_types::{ActivityFilters, ActivityPage, ActivityResult, ActivityType};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct ServerFetcher;
//!
//! #[async_trait]
//! impl ActivityFetcher for ServerFetcher {
//!     async fn fetch_activities(
//!         &self,
//!         _filters: &ActivityFilters,
//!         page: u32,
//!         page_size: u32,
//!     ) -> ActivityResult<ActivityPage> {
//!         Ok(ActivityPage::empty(page_size, page))
//!     }
//! }
//!
//! # async fn demo() -> ActivityResult<()> {
//! let cache = Arc::new(ActivityCache::new(
//!     Arc::new(ServerFetcher),
//!     Arc::new(SystemClock),
//!     CachePolicy::default(),
//! ));
//! let filters = ActivityFilters::new().with_type(ActivityType::Ticket);
//! let page = cache.get(&filters, 1, 25).await?;
//! assert_eq!(page.page_number, 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

mod cache;
mod clock;
mod key;
mod policy;

pub use cache::*;
pub use clock::*;
pub use key::*;
pub use policy::*;
