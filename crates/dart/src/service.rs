//! End-to-end lookup service composing the resolver and the fetch cascade.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};
use polars::prelude::DataFrame;
use tracing::{debug, warn};

use dart_core::{
    ApiOutcome, CorpCache, CorpCode, CorpEntry, DartError, DisclosureSource, ReportCode, Result,
    StatementQuery,
};
use dart_cache::InMemoryCorpCache;

use crate::curated::curated_table;
use crate::fetch::{FetchedStatement, cascade_plan};
use crate::frame;
use crate::resolve;

/// Default TTL for the bulk company reference table.
pub const DEFAULT_REFERENCE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Company resolution and statement lookup over one disclosure source.
///
/// Holds the curated static table, the reference-table cache, and the
/// source, and runs both cascades. Safe to invoke repeatedly: identical
/// inputs repeat the same cascade deterministically, network flakiness
/// aside.
///
/// # Example
///
/// ```rust,ignore
/// use dart::{DartService, OpendartClient};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> dart::Result<()> {
///     let service = DartService::new(Arc::new(OpendartClient::new("api_key")));
///
///     let report = service.finstate("Samsung Electronics", Some(2023)).await?;
///     println!("{}", report.frame);
///
///     Ok(())
/// }
/// ```
pub struct DartService {
    source: Arc<dyn DisclosureSource>,
    cache: Arc<dyn CorpCache>,
    curated: Vec<CorpEntry>,
    reference_ttl: Duration,
    /// Keeps at most one reference-table download in flight.
    refresh_lock: tokio::sync::Mutex<()>,
}

impl fmt::Debug for DartService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DartService")
            .field("source", &self.source.name())
            .field("curated", &self.curated.len())
            .field("reference_ttl", &self.reference_ttl)
            .finish()
    }
}

/// A fully resolved, fetched, and projected financial statement.
#[derive(Clone, Debug)]
pub struct FinstateReport {
    /// The resolved company identifier.
    pub corp_code: CorpCode,
    /// The cascade variant that produced the rows.
    pub query: StatementQuery,
    /// The projected statement table.
    pub frame: DataFrame,
    /// True when the preferred columns were absent and raw passthrough
    /// columns are exposed instead.
    pub nonstandard: bool,
}

impl DartService {
    /// Create a service over the given source with an in-memory cache and
    /// the default reference TTL.
    #[must_use]
    pub fn new(source: Arc<dyn DisclosureSource>) -> Self {
        Self {
            source,
            cache: Arc::new(InMemoryCorpCache::new()),
            curated: curated_table(),
            reference_ttl: DEFAULT_REFERENCE_TTL,
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Use a different reference-table cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CorpCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Override the reference-table TTL.
    #[must_use]
    pub fn with_reference_ttl(mut self, ttl: Duration) -> Self {
        self.reference_ttl = ttl;
        self
    }

    /// Replace the curated static table.
    #[must_use]
    pub fn with_curated(mut self, entries: Vec<CorpEntry>) -> Self {
        self.curated = entries;
        self
    }

    /// Resolve a free-text company name, 6-digit stock code, or 8-digit
    /// corp code to the stable DART identifier.
    ///
    /// Tiers, first success wins: curated exact match, curated fuzzy
    /// match, remote single lookup, bulk reference-table search. Remote
    /// failures at the lookup tier are swallowed and the cascade
    /// continues; a failed bulk download is terminal
    /// ([`DartError::ReferenceUnavailable`]).
    ///
    /// # Errors
    ///
    /// [`DartError::AmbiguousName`] carries the candidate set when the
    /// bulk tier matches more than one company; callers pick one and
    /// resolve again with its corp code.
    pub async fn resolve(&self, query: &str) -> Result<CorpCode> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DartError::InvalidParameter("empty query".to_string()));
        }

        // Raw corp codes pass straight through, so disambiguation
        // follow-ups don't re-run the cascade.
        if resolve::is_corp_code(query) {
            return Ok(CorpCode::new(query));
        }

        if let Some(entry) = resolve::exact_match(&self.curated, query) {
            debug!(corp_code = %entry.corp_code, "Resolved via curated exact match");
            return Ok(entry.corp_code.clone());
        }

        if let Some(entry) = resolve::fuzzy_match(&self.curated, query) {
            debug!(corp_code = %entry.corp_code, "Resolved via curated fuzzy match");
            return Ok(entry.corp_code.clone());
        }

        if let Some(corp_code) = self.remote_lookup(query).await {
            debug!(%corp_code, "Resolved via remote lookup");
            return Ok(corp_code);
        }

        let table = self.reference_table().await?;
        let mut matches = resolve::search_table(&table, query);
        match matches.len() {
            0 => Err(DartError::CompanyNotFound(query.to_string())),
            1 => {
                let entry = matches.remove(0);
                debug!(corp_code = %entry.corp_code, "Resolved via reference table");
                Ok(entry.corp_code)
            }
            n => {
                debug!(candidates = n, "Reference table search is ambiguous");
                Err(DartError::AmbiguousName {
                    query: query.to_string(),
                    candidates: resolve::rank_candidates(matches, query),
                })
            }
        }
    }

    /// One remote lookup call; failures become "no candidate" so the
    /// resolution cascade can continue to the bulk tier.
    async fn remote_lookup(&self, query: &str) -> Option<CorpCode> {
        let outcome = if resolve::is_stock_code(query) {
            self.source
                .company_by_stock_code(query)
                .await
                .map(|entry| vec![entry])
        } else {
            self.source.search_company(query).await
        };

        match outcome {
            ApiOutcome::Success(hits) => {
                if hits.is_empty() {
                    debug!("Remote lookup returned no candidates");
                }
                hits.into_iter().next().map(|entry| entry.corp_code)
            }
            ApiOutcome::Rejected { code, message } => {
                warn!(code, message, "Remote lookup rejected, falling through");
                None
            }
            ApiOutcome::Transport(reason) => {
                warn!(reason, "Remote lookup transport failure, falling through");
                None
            }
        }
    }

    /// Return the reference table, downloading it when absent or stale.
    ///
    /// The refresh is single-flight: a second caller waits for the lock,
    /// then re-reads the now-fresh cache instead of downloading again.
    async fn reference_table(&self) -> Result<Vec<CorpEntry>> {
        if let Some(entries) = self.cache.get(Utc::now(), self.reference_ttl).await? {
            return Ok(entries);
        }

        let _guard = self.refresh_lock.lock().await;

        if let Some(entries) = self.cache.get(Utc::now(), self.reference_ttl).await? {
            return Ok(entries);
        }

        debug!("Refreshing company reference table");
        let entries = self
            .source
            .download_corp_table()
            .await
            .map_err(|e| DartError::ReferenceUnavailable(e.to_string()))?;

        if let Err(e) = self.cache.put(&entries, Utc::now()).await {
            warn!(error = %e, "Failed to cache reference table");
        }

        Ok(entries)
    }

    /// Drop the cached reference table; the next bulk-tier resolution
    /// downloads a fresh one.
    pub async fn clear_reference_cache(&self) -> Result<()> {
        self.cache.clear().await
    }

    /// Fetch the financial statement for a company and fiscal year
    /// through the fallback cascade.
    ///
    /// `report` overrides the starting report type (default annual).
    /// Returns the rows together with the variant that produced them.
    pub async fn fetch_statement(
        &self,
        corp_code: &CorpCode,
        year: i32,
        report: Option<ReportCode>,
    ) -> Result<FetchedStatement> {
        self.fetch_statement_as_of(corp_code, year, report, Utc::now().year())
            .await
    }

    async fn fetch_statement_as_of(
        &self,
        corp_code: &CorpCode,
        year: i32,
        report: Option<ReportCode>,
        current_year: i32,
    ) -> Result<FetchedStatement> {
        let plan = cascade_plan(corp_code, year, report.unwrap_or_default(), current_year);

        for query in plan {
            match self.source.fetch_statement(&query).await {
                ApiOutcome::Success(rows) if !rows.is_empty() => {
                    debug!(
                        report = ?query.report,
                        fs_div = ?query.fs_div,
                        bsns_year = query.bsns_year,
                        rows = rows.len(),
                        "Cascade step succeeded"
                    );
                    return Ok(FetchedStatement { query, rows });
                }
                ApiOutcome::Success(_) => {
                    debug!(
                        report = ?query.report,
                        fs_div = ?query.fs_div,
                        bsns_year = query.bsns_year,
                        "Cascade step returned no rows, trying next"
                    );
                }
                ApiOutcome::Rejected { code, message } => {
                    debug!(code, message, "Cascade step rejected, trying next");
                }
                ApiOutcome::Transport(reason) => {
                    warn!(reason, "Cascade step transport failure, trying next");
                }
            }
        }

        Err(DartError::ReportNotFound {
            corp_code: corp_code.to_string(),
            year,
        })
    }

    /// Resolve a query, fetch its statement, and project the result.
    ///
    /// When `year` is `None` the most recent completed fiscal year
    /// (current calendar year minus one) is used.
    pub async fn finstate(&self, query: &str, year: Option<i32>) -> Result<FinstateReport> {
        let corp_code = self.resolve(query).await?;
        let year = year.unwrap_or_else(|| Utc::now().year() - 1);

        let fetched = self.fetch_statement(&corp_code, year, None).await?;
        let projected = frame::project(&fetched.rows)?;

        if projected.nonstandard {
            warn!(
                %corp_code,
                year,
                "Statement rows carried a non-standard schema; exposing raw columns"
            );
        }

        Ok(FinstateReport {
            corp_code,
            query: fetched.query,
            frame: projected.frame,
            nonstandard: projected.nonstandard,
        })
    }
}
