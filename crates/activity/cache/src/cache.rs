//! The activity cache: TTL store, invalidation, sweep, and fetch coalescing
//!
//! Per-entry lifecycle: `absent → fresh (on fetch) → expired (time passes)
//! → absent (swept or evicted)`, with `fresh → absent` also reachable via
//! explicit invalidation at any time.
//!
//! Two ordering rules hold beyond per-key correctness:
//!
//! 1. At most one fetch is in flight per key — concurrent misses for the
//!    same key await the leader's completion and then re-read.
//! 2. A fetch result never resurrects a key that was explicitly invalidated
//!    while the fetch was on the wire. Each fetch carries a generation token;
//!    invalidation bumps the generation (or the global epoch), and a stale
//!    token's result is returned to the caller but not written to the store.
//!
//! Fetch failures propagate to the caller and are never cached.

use crate::{generate_cache_key, CachePolicy, Clock};
use activity_types::{
    ActivityError, ActivityFilters, ActivityId, ActivityPage, ActivityResult, ActivityType,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

// ── Collaborator ─────────────────────────────────────────────────────

/// The server round trip the cache fronts
///
/// Assumed idempotent per input. The cache treats it as opaque: no retries,
/// no failure caching.
#[async_trait]
pub trait ActivityFetcher: Send + Sync {
    async fn fetch_activities(
        &self,
        filters: &ActivityFilters,
        page: u32,
        page_size: u32,
    ) -> ActivityResult<ActivityPage>;
}

// ── Invalidation ─────────────────────────────────────────────────────

/// What to throw away
#[derive(Clone, Debug)]
pub enum InvalidationScope {
    /// Clear everything
    All,
    /// Delete the single entry for this request tuple
    Entry {
        filters: ActivityFilters,
        page: u32,
        page_size: u32,
    },
    /// Delete every entry whose serialized key references this type.
    /// Substring match on the canonical key — an approximation, not a
    /// precise index: keys built from an empty `types` filter carry no type
    /// token and are not matched.
    Type(ActivityType),
    /// A single activity changed. Its blast radius across filter
    /// combinations is unknown, so this clears everything.
    Activity(ActivityId),
}

// ── Counters ─────────────────────────────────────────────────────────

/// Snapshot of cache accounting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub swept: u64,
    pub entries: usize,
}

// ── Internal state ───────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct CacheEntry {
    page: ActivityPage,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Generation token observed at fetch start; checked before the write-back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FetchToken {
    epoch: u64,
    generation: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// Per-key invalidation generations. Only keys with a fetch in flight
    /// carry an entry; the leader prunes its key when the fetch settles, so
    /// the map is bounded by the number of concurrent fetches.
    generations: HashMap<String, u64>,
    /// Global invalidation epoch; bumped on full clears
    epoch: u64,
    /// Keys with a fetch in flight; waiters hold the receiver
    inflight: HashMap<String, watch::Receiver<()>>,
    hits: u64,
    misses: u64,
    evictions: u64,
    swept: u64,
}

/// Outcome of the locked lookup phase of `get`
enum LookupStep {
    Hit(ActivityPage),
    Wait(watch::Receiver<()>),
    Lead {
        token: FetchToken,
        tx: watch::Sender<()>,
    },
}

// ── Cache ────────────────────────────────────────────────────────────

/// Session-scoped TTL cache over the activity fetch collaborator
///
/// Constructed once per application session and shared by reference. Both
/// the clock and the fetcher are injected, so TTL, eviction, and sweep logic
/// are unit-testable without a UI harness or a server.
pub struct ActivityCache {
    fetcher: Arc<dyn ActivityFetcher>,
    clock: Arc<dyn Clock>,
    policy: CachePolicy,
    state: Mutex<CacheState>,
}

impl ActivityCache {
    pub fn new(fetcher: Arc<dyn ActivityFetcher>, clock: Arc<dyn Clock>, policy: CachePolicy) -> Self {
        Self {
            fetcher,
            clock,
            policy,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Return the page for this request tuple, fetching on a miss
    ///
    /// A live entry is returned after the policy's artificial hit delay.
    /// On a miss, an empty `types` filter is expanded per policy before the
    /// collaborator is called; the result is stored with a TTL chosen from
    /// the *requested* shape and the oldest entries are evicted past
    /// capacity. Collaborator failures propagate uncached.
    pub async fn get(
        &self,
        filters: &ActivityFilters,
        page: u32,
        page_size: u32,
    ) -> ActivityResult<ActivityPage> {
        let key = generate_cache_key(filters, page, page_size);
        loop {
            let step = {
                let mut state = self.lock()?;
                let now = self.clock.now();
                let live = state
                    .entries
                    .get(&key)
                    .filter(|e| e.expires_at > now)
                    .map(|e| e.page.clone());
                if let Some(page) = live {
                    state.hits += 1;
                    LookupStep::Hit(page)
                } else if let Some(rx) = state.inflight.get(&key) {
                    LookupStep::Wait(rx.clone())
                } else {
                    // Expired entries are dropped eagerly on the miss path.
                    state.entries.remove(&key);
                    state.misses += 1;
                    let token = FetchToken {
                        epoch: state.epoch,
                        generation: state.generations.get(&key).copied().unwrap_or(0),
                    };
                    let (tx, rx) = watch::channel(());
                    state.inflight.insert(key.clone(), rx);
                    LookupStep::Lead { token, tx }
                }
            };

            match step {
                LookupStep::Hit(page) => {
                    if self.policy.hit_delay_ms > 0 {
                        // Synchronous resolution makes lists flicker; yield briefly.
                        tokio::time::sleep(std::time::Duration::from_millis(
                            self.policy.hit_delay_ms,
                        ))
                        .await;
                    }
                    return Ok(page);
                }
                LookupStep::Wait(mut rx) => {
                    // Wakes when the leader drops its sender, success or not.
                    let _ = rx.changed().await;
                    continue;
                }
                LookupStep::Lead { token, tx } => {
                    let result = self
                        .fetch_and_store(&key, filters, page, page_size, token)
                        .await;
                    if let Ok(mut state) = self.state.lock() {
                        state.inflight.remove(&key);
                        // The write-back already happened (or was discarded),
                        // so the key's generation bookkeeping is done.
                        state.generations.remove(&key);
                    }
                    drop(tx);
                    return result;
                }
            }
        }
    }

    async fn fetch_and_store(
        &self,
        key: &str,
        filters: &ActivityFilters,
        page: u32,
        page_size: u32,
        token: FetchToken,
    ) -> ActivityResult<ActivityPage> {
        let effective = self.normalize(filters);
        let fetched = self
            .fetcher
            .fetch_activities(&effective, page, page_size)
            .await?;

        let ttl = self.policy.ttl_for(filters, page_size);
        let now = self.clock.now();
        let mut state = self.lock()?;
        let current_generation = state.generations.get(key).copied().unwrap_or(0);
        if state.epoch == token.epoch && current_generation == token.generation {
            state.entries.insert(
                key.to_string(),
                CacheEntry {
                    page: fetched.clone(),
                    created_at: now,
                    expires_at: now + ttl,
                },
            );
            Self::evict_over_capacity(&mut state, self.policy.capacity);
        } else {
            tracing::debug!(key, "discarding fetch result for key invalidated mid-flight");
        }
        Ok(fetched)
    }

    /// Expand an empty `types` filter per the configured policy
    fn normalize(&self, filters: &ActivityFilters) -> ActivityFilters {
        if filters.types.is_empty() {
            let mut effective = filters.clone();
            effective.types = self.policy.default_type_expansion.clone();
            effective
        } else {
            filters.clone()
        }
    }

    fn evict_over_capacity(state: &mut CacheState, capacity: usize) {
        while state.entries.len() > capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(key, entry)| (entry.created_at, (*key).clone()))
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    state.entries.remove(&key);
                    state.evictions += 1;
                    tracing::debug!(key, "evicted oldest entry over capacity");
                }
                None => break,
            }
        }
    }

    /// Throw away cached entries per scope; returns the number removed
    ///
    /// Every variant also advances the relevant generation counters so that
    /// fetches already in flight for the invalidated keys cannot write back.
    pub fn invalidate(&self, scope: InvalidationScope) -> ActivityResult<usize> {
        let mut state = self.lock()?;
        let removed = match scope {
            InvalidationScope::All => Self::clear_all(&mut state),
            InvalidationScope::Activity(id) => {
                tracing::debug!(activity_id = %id, "activity-scoped invalidation clears the whole cache");
                Self::clear_all(&mut state)
            }
            InvalidationScope::Entry {
                filters,
                page,
                page_size,
            } => {
                let key = generate_cache_key(&filters, page, page_size);
                let removed = usize::from(state.entries.remove(&key).is_some());
                // A generation bump only matters to a fetch already on the
                // wire; without one the removal alone is complete.
                if state.inflight.contains_key(&key) {
                    *state.generations.entry(key).or_insert(0) += 1;
                }
                removed
            }
            InvalidationScope::Type(ty) => {
                let needle = ty.as_str();
                let matching: BTreeSet<String> = state
                    .entries
                    .keys()
                    .chain(state.inflight.keys())
                    .filter(|key| key.contains(needle))
                    .cloned()
                    .collect();
                let mut removed = 0;
                for key in matching {
                    if state.entries.remove(&key).is_some() {
                        removed += 1;
                    }
                    if state.inflight.contains_key(&key) {
                        *state.generations.entry(key).or_insert(0) += 1;
                    }
                }
                removed
            }
        };
        tracing::debug!(removed, "cache invalidated");
        Ok(removed)
    }

    fn clear_all(state: &mut CacheState) -> usize {
        let removed = state.entries.len();
        state.entries.clear();
        // The epoch bump covers every key, in-flight ones included.
        state.generations.clear();
        state.epoch += 1;
        removed
    }

    /// Remove every entry past its expiry; returns the number removed
    ///
    /// Called on a fixed interval by [`spawn_sweeper`](Self::spawn_sweeper),
    /// and directly by tests.
    pub fn sweep_expired(&self) -> ActivityResult<usize> {
        let mut state = self.lock()?;
        let now = self.clock.now();
        let before = state.entries.len();
        state.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before - state.entries.len();
        state.swept += removed as u64;
        Ok(removed)
    }

    /// Run the expiry sweep on the policy interval until the cache is dropped
    ///
    /// The task holds only a weak reference, so it never keeps the cache
    /// alive; it exits on the first tick after the last strong reference is
    /// gone. Dropping the returned handle detaches the task without stopping
    /// it; `abort()` stops it early.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let cache = Arc::downgrade(self);
        let period = std::time::Duration::from_secs(self.policy.sweep_interval_secs.max(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick of a tokio interval fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                match cache.sweep_expired() {
                    Ok(0) => {}
                    Ok(removed) => tracing::debug!(removed, "expiry sweep removed entries"),
                    Err(error) => tracing::warn!(%error, "expiry sweep failed"),
                }
            }
        })
    }

    /// Current accounting snapshot
    pub fn stats(&self) -> ActivityResult<CacheStats> {
        let state = self.lock()?;
        Ok(CacheStats {
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            swept: state.swept,
            entries: state.entries.len(),
        })
    }

    /// Number of live-or-expired entries currently stored
    pub fn entry_count(&self) -> ActivityResult<usize> {
        Ok(self.lock()?.entries.len())
    }

    fn lock(&self) -> ActivityResult<MutexGuard<'_, CacheState>> {
        self.state
            .lock()
            .map_err(|_| ActivityError::Internal("cache state lock poisoned".to_string()))
    }

    #[cfg(test)]
    fn generation_count(&self) -> usize {
        self.state.lock().map(|s| s.generations.len()).unwrap_or(0)
    }

    #[cfg(test)]
    fn entry_window(&self, key: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let state = self.state.lock().ok()?;
        state
            .entries
            .get(key)
            .map(|e| (e.created_at, e.expires_at))
    }
}
