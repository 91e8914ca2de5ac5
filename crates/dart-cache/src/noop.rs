//! No-op cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dart_core::{CorpCache, CorpEntry, Result};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and `put`/`clear` succeed without doing
/// anything, so every resolution that reaches the bulk tier re-downloads
/// the reference table. Useful for disabling caching or testing code paths
/// without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCorpCache;

impl NoopCorpCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CorpCache for NoopCorpCache {
    async fn get(&self, _now: DateTime<Utc>, _ttl: Duration) -> Result<Option<Vec<CorpEntry>>> {
        trace!("NoopCorpCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _entries: &[CorpEntry], _now: DateTime<Utc>) -> Result<()> {
        trace!("NoopCorpCache: put called, doing nothing");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCorpCache: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dart_core::CorpCode;

    #[tokio::test]
    async fn test_noop_cache_never_stores() {
        let cache = NoopCorpCache::new();
        let now = Utc::now();
        let ttl = Duration::from_secs(3600);

        let entries = vec![
            CorpEntry::new("Samsung Electronics", CorpCode::new("00126380"))
                .with_stock_code("005930"),
        ];

        assert!(cache.put(&entries, now).await.is_ok());
        assert!(cache.get(now, ttl).await.unwrap().is_none());
        assert!(cache.clear().await.is_ok());
    }

    #[test]
    fn test_noop_cache_is_copy() {
        let cache1 = NoopCorpCache::new();
        let cache2 = cache1; // Copy
        let _cache3 = cache2; // Still works because Copy
    }
}
