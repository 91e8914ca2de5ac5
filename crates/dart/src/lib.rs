#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company resolution and financial-statement lookup for Korea's OpenDART
//! disclosure service.
//!
//! This crate turns free-text company names into stable DART identifiers
//! and `(identifier, year)` pairs into projected financial-statement
//! tables. It re-exports core types, the cache implementations, and the
//! OpenDART client, and provides a [`DartService`] that runs the
//! resolution and report-fetch cascades end to end.
//!
//! # Features
//!
//! - `opendart` - HTTP client for the OpenDART service
//! - `cache-sqlite` - SQLite-backed reference-table cache
//!
//! # Example
//!
//! ```rust,ignore
//! use dart::{DartService, OpendartClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> dart::Result<()> {
//!     let client = OpendartClient::new(std::env::var("DART_API_KEY").unwrap());
//!     let service = DartService::new(Arc::new(client));
//!
//!     let report = service.finstate("삼성전자", Some(2023)).await?;
//!     println!("{}", report.frame);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use dart_core::*;

// Cache implementations
#[cfg(feature = "cache-sqlite")]
pub use dart_cache::SqliteCorpCache;
pub use dart_cache::{InMemoryCorpCache, NoopCorpCache};

// OpenDART client
#[cfg(feature = "opendart")]
pub use dart_opendart::OpendartClient;

mod curated;
mod fetch;
mod frame;
mod resolve;
mod service;

pub use curated::curated_table;
pub use fetch::{FetchedStatement, cascade_plan};
pub use frame::{PREFERRED_COLUMNS, StatementFrame, project};
pub use service::{DEFAULT_REFERENCE_TTL, DartService, FinstateReport};
