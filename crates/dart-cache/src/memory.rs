//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dart_core::{CorpCache, CorpEntry, Result};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// The cached table plus the timestamp it was fetched at.
#[derive(Debug, Clone)]
struct TableEntry {
    entries: Vec<CorpEntry>,
    fetched_at: DateTime<Utc>,
}

impl TableEntry {
    fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now.signed_duration_since(self.fetched_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Simple in-memory cache for the company reference table.
///
/// The table is held in an `RwLock`-protected slot and is lost when the
/// cache is dropped. Entries are cloned on get/put.
#[derive(Debug, Default)]
pub struct InMemoryCorpCache {
    table: RwLock<Option<TableEntry>>,
}

impl InMemoryCorpCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CorpCache for InMemoryCorpCache {
    #[instrument(skip(self))]
    async fn get(&self, now: DateTime<Utc>, ttl: Duration) -> Result<Option<Vec<CorpEntry>>> {
        let table = self.table.read().await;
        match table.as_ref() {
            Some(entry) if entry.is_stale(now, ttl) => {
                debug!(fetched_at = %entry.fetched_at, "Cached corp table is stale");
                Ok(None)
            }
            Some(entry) => {
                debug!(count = entry.entries.len(), "Cache hit for corp table");
                Ok(Some(entry.entries.clone()))
            }
            None => {
                debug!("Cache miss for corp table");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn put(&self, entries: &[CorpEntry], now: DateTime<Utc>) -> Result<()> {
        let mut table = self.table.write().await;
        *table = Some(TableEntry {
            entries: entries.to_vec(),
            fetched_at: now,
        });
        debug!("Cached {} corp entries", entries.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        *self.table.write().await = None;
        debug!("Cleared corp table cache");
        Ok(())
    }
}
