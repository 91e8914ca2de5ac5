//! The transport trait for the remote disclosure service.
//!
//! [`DisclosureSource`] abstracts the four outbound calls the resolver and
//! fetcher need, so cascade logic can be exercised against scripted
//! implementations in tests.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    outcome::ApiOutcome,
    report::StatementQuery,
    types::{CorpEntry, StatementRow},
};

/// The remote disclosure service, reduced to the calls the cascades need.
///
/// The three `ApiOutcome`-returning calls never fail hard: transport and
/// rejection outcomes are data for the caller's cascade, not errors. The
/// bulk download is the exception, since no further fallback tier exists
/// behind it.
#[async_trait]
pub trait DisclosureSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g. "OpenDART").
    fn name(&self) -> &str;

    /// Looks up companies by registered name.
    ///
    /// Candidates are returned in service order; the resolver takes the
    /// first one.
    async fn search_company(&self, corp_name: &str) -> ApiOutcome<Vec<CorpEntry>>;

    /// Resolves a public 6-digit stock code to a company entry.
    async fn company_by_stock_code(&self, stock_code: &str) -> ApiOutcome<CorpEntry>;

    /// Downloads the full company reference table.
    ///
    /// This is the only call whose failure is a hard error; callers
    /// surface it as "reference data unavailable".
    async fn download_corp_table(&self) -> Result<Vec<CorpEntry>>;

    /// Fetches the statement rows for one fully-specified query.
    ///
    /// An empty row list with a success status is a valid outcome; the
    /// fetch cascade decides whether to advance.
    async fn fetch_statement(&self, query: &StatementQuery) -> ApiOutcome<Vec<StatementRow>>;
}
