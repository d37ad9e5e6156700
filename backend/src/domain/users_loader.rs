//! Time-bounded cached loader over the get-users usecase.
//!
//! One process-wide entry memoizes the full user list under a constant key.
//! Expiry is checked on read against an injected clock; there is no
//! background eviction. Mutations invalidate the entry explicitly so the
//! next read re-executes the usecase even inside the validity window.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::debug;

use crate::domain::users_service::{GetUsersResult, GetUsersService};
use crate::domain::Error;

/// Cache key for the single memoized user list.
pub const USERS_CACHE_KEY: &str = "users-list";

/// Validity window for a cached user list.
const CACHE_TTL_SECONDS: i64 = 3600;

struct CacheEntry {
    result: GetUsersResult,
    stored_at: DateTime<Utc>,
}

/// Memoizing wrapper around [`GetUsersService`].
///
/// Concurrent cache misses inside the same window may each execute the
/// usecase and race to store; the last writer wins. The value is a pure
/// read and re-computation is idempotent, so the race is benign. Failed
/// executions never populate the cache. The entry lock is never held
/// across an await point.
pub struct CachedUsersLoader {
    service: GetUsersService,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    entry: Mutex<Option<CacheEntry>>,
}

impl CachedUsersLoader {
    /// Wrap a usecase with the default one-hour validity window.
    pub fn new(service: GetUsersService, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(service, clock, TimeDelta::seconds(CACHE_TTL_SECONDS))
    }

    /// Wrap a usecase with an explicit validity window.
    pub fn with_ttl(service: GetUsersService, clock: Arc<dyn Clock>, ttl: TimeDelta) -> Self {
        Self {
            service,
            clock,
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Return the cached user list, executing the usecase on a miss.
    pub async fn load(&self) -> Result<GetUsersResult, Error> {
        if let Some(result) = self.fresh_entry() {
            debug!(key = USERS_CACHE_KEY, "users cache hit");
            return Ok(result);
        }

        debug!(key = USERS_CACHE_KEY, "users cache miss");
        let result = self.service.execute().await?;
        *self.guard() = Some(CacheEntry {
            result: result.clone(),
            stored_at: self.clock.utc(),
        });
        Ok(result)
    }

    /// Drop the cached entry so the next [`load`](Self::load) re-executes,
    /// regardless of elapsed time.
    pub fn invalidate(&self) {
        debug!(key = USERS_CACHE_KEY, "users cache invalidated");
        *self.guard() = None;
    }

    fn fresh_entry(&self) -> Option<GetUsersResult> {
        let guard = self.guard();
        guard
            .as_ref()
            .filter(|entry| self.clock.utc() - entry.stored_at < self.ttl)
            .map(|entry| entry.result.clone())
    }

    fn guard(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        // A poisoned lock only means a panicking thread held it mid-store;
        // the entry itself is a plain value and remains usable.
        match self.entry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
