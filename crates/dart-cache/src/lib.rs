#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Reference-table caching implementations for the OpenDART client.
//!
//! This crate provides implementations of the [`CorpCache`] trait from
//! `dart-core`:
//!
//! - [`SqliteCorpCache`] - Persistent SQLite-based cache (default, requires `sqlite` feature)
//! - [`InMemoryCorpCache`] - Simple in-memory cache
//! - [`NoopCorpCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

/// SQLite-based cache implementation.
#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-export the trait for convenience
pub use dart_core::CorpCache;

// Re-export implementations
pub use memory::InMemoryCorpCache;
pub use noop::NoopCorpCache;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteCorpCache;
