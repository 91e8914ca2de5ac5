//! Cache trait for the company reference table.
//!
//! This module defines the [`CorpCache`] trait. The cache holds exactly one
//! table which is replaced wholesale on refresh and never partially
//! updated. Staleness is decided by the accessor, which takes `now` as an
//! argument together with an explicit TTL so implementations stay
//! deterministic under test.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::{error::Result, types::CorpEntry};

/// Trait for caching the bulk company reference table.
#[async_trait]
pub trait CorpCache: Send + Sync {
    /// Retrieves the cached table if present and younger than `ttl` as of
    /// `now`.
    ///
    /// Returns `Ok(Some(entries))` on a fresh hit, `Ok(None)` when the
    /// table is absent or stale.
    async fn get(&self, now: DateTime<Utc>, ttl: Duration) -> Result<Option<Vec<CorpEntry>>>;

    /// Replaces the cached table wholesale, stamped with `now`.
    async fn put(&self, entries: &[CorpEntry], now: DateTime<Utc>) -> Result<()>;

    /// Discards the cached table (explicit manual clear).
    async fn clear(&self) -> Result<()>;
}
