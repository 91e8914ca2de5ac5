//! Error types for disclosure lookups.
//!
//! This module defines [`DartError`] which covers all error cases that can
//! occur when resolving a company or fetching a financial statement report.

use thiserror::Error;

use crate::types::CorpEntry;

/// Errors that can occur during disclosure operations.
#[derive(Error, Debug)]
pub enum DartError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("network error: {0}")]
    Network(String),

    /// A well-formed non-success status returned by the OpenDART service.
    #[error("rejected by OpenDART ({code}): {message}")]
    Rejected {
        /// OpenDART status code (e.g. "013" for no data, "020" for quota).
        code: String,
        /// Human-readable message from the service.
        message: String,
    },

    /// No company matched the query at any resolution tier.
    #[error("no company found for \"{0}\"")]
    CompanyNotFound(String),

    /// The query matched more than one company; the caller must pick one
    /// of the candidates and resolve again.
    #[error("\"{query}\" matched {n} companies; pick a candidate and retry", n = candidates.len())]
    AmbiguousName {
        /// The query that was ambiguous.
        query: String,
        /// Matching entries, listed companies first, at most ten.
        candidates: Vec<CorpEntry>,
    },

    /// The report-fetch cascade was exhausted without a non-empty response.
    #[error("no financial statement for {corp_code} in fiscal year {year}")]
    ReportNotFound {
        /// The company identifier that was queried.
        corp_code: String,
        /// The fiscal year that was queried.
        year: i32,
    },

    /// The bulk reference table could not be downloaded, so the last
    /// resolution tier is unavailable.
    #[error("reference data unavailable: {0}")]
    ReferenceUnavailable(String),

    /// A response had an unexpected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Error interacting with the reference-table cache.
    #[error("cache error: {0}")]
    Cache(String),

    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using [`DartError`].
pub type Result<T> = std::result::Result<T, DartError>;
