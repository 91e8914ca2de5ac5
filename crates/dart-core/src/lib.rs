#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the OpenDART disclosure client.
//!
//! This crate provides the foundational abstractions for resolving
//! companies and fetching financial statement reports:
//!
//! - [`CorpCode`](types::CorpCode) - Stable 8-digit DART identifier
//! - [`CorpEntry`](types::CorpEntry) - Company reference-table entry
//! - [`StatementQuery`](report::StatementQuery) - One fully-specified report request
//! - [`ApiOutcome`](outcome::ApiOutcome) - Per-call outcome classification
//! - [`DisclosureSource`](source::DisclosureSource) - The remote service transport
//! - [`CorpCache`](cache::CorpCache) - Reference-table caching abstraction

/// Cache trait for the company reference table.
pub mod cache;
/// Error types for disclosure lookups.
pub mod error;
/// Per-call outcome classification.
pub mod outcome;
/// Report type and consolidation scope definitions.
pub mod report;
/// The transport trait for the remote disclosure service.
pub mod source;
/// Core data types (CorpCode, CorpEntry, StatementRow).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::CorpCache;
pub use error::{DartError, Result};
pub use outcome::ApiOutcome;
pub use report::{FsDiv, ReportCode, StatementQuery};
pub use source::DisclosureSource;
pub use types::{CorpCode, CorpEntry, StatementRow};
