//! Core data types for disclosure lookups.
//!
//! This module defines the fundamental data structures:
//!
//! - [`CorpCode`] - The stable 8-digit DART company identifier
//! - [`CorpEntry`] - One row of the company reference table
//! - [`StatementRow`] - One account line of a fetched financial statement

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The stable company identifier used by the OpenDART service.
///
/// This is DART's internal 8-digit `corp_code`, distinct from the public
/// 6-digit stock (ticker) code. Codes are zero-padded to 8 digits on
/// creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorpCode(String);

impl CorpCode {
    /// Creates a new corp code, zero-padding to 8 digits.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(format!("{:0>8}", s.into()))
    }

    /// Returns the corp code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CorpCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for CorpCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CorpCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// One entry of the company reference table.
///
/// Entries are immutable once loaded, whether they come from the curated
/// static table or from the bulk `corpCode.xml` download. Within one
/// reference table no two entries share a [`CorpCode`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpEntry {
    /// Registered company name.
    pub corp_name: String,
    /// Stable DART identifier.
    pub corp_code: CorpCode,
    /// Public 6-digit stock code, present only for listed companies.
    pub stock_code: Option<String>,
    /// Whether the company trades on an exchange.
    pub listed: bool,
}

impl CorpEntry {
    /// Creates an unlisted entry with the required fields.
    #[must_use]
    pub fn new(corp_name: impl Into<String>, corp_code: CorpCode) -> Self {
        Self {
            corp_name: corp_name.into(),
            corp_code,
            stock_code: None,
            listed: false,
        }
    }

    /// Sets the stock code, marking the entry as listed.
    #[must_use]
    pub fn with_stock_code(mut self, stock_code: impl Into<String>) -> Self {
        self.stock_code = Some(stock_code.into());
        self.listed = true;
        self
    }
}

/// One account line of a fetched financial statement.
///
/// The four preferred columns are modeled explicitly; everything else the
/// service returns (`fs_nm`, `thstrm_dt`, `currency`, ...) is carried as
/// passthrough in [`extra`](Self::extra). Rows are read-only downstream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Statement name (e.g. "재무상태표" / balance sheet).
    #[serde(default)]
    pub sj_nm: Option<String>,
    /// Account name (e.g. "유동자산" / current assets).
    #[serde(default)]
    pub account_nm: Option<String>,
    /// Current-period amount, as the service formats it.
    #[serde(default)]
    pub thstrm_amount: Option<String>,
    /// Prior-period amount, as the service formats it.
    #[serde(default)]
    pub frmtrm_amount: Option<String>,
    /// Every other field of the row, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StatementRow {
    /// Returns true if the row carries at least one of the preferred
    /// columns (`sj_nm`, `account_nm`, `thstrm_amount`, `frmtrm_amount`).
    #[must_use]
    pub const fn has_preferred_columns(&self) -> bool {
        self.sj_nm.is_some()
            || self.account_nm.is_some()
            || self.thstrm_amount.is_some()
            || self.frmtrm_amount.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corp_code_is_zero_padded() {
        let code = CorpCode::new("126380");
        assert_eq!(code.as_str(), "00126380");
        assert_eq!(code.as_str().len(), 8);

        // Already 8 digits stays untouched
        assert_eq!(CorpCode::new("00164779").as_str(), "00164779");
    }

    #[test]
    fn stock_code_marks_entry_listed() {
        let entry = CorpEntry::new("Samsung Electronics", CorpCode::new("00126380"));
        assert!(!entry.listed);

        let entry = entry.with_stock_code("005930");
        assert!(entry.listed);
        assert_eq!(entry.stock_code.as_deref(), Some("005930"));
    }

    #[test]
    fn statement_row_passthrough_fields() {
        let json = r#"{
            "sj_nm": "재무상태표",
            "account_nm": "유동자산",
            "thstrm_amount": "218,470,581,000,000",
            "frmtrm_amount": "195,936,557,000,000",
            "fs_nm": "연결재무제표",
            "ord": "1"
        }"#;
        let row: StatementRow = serde_json::from_str(json).unwrap();
        assert!(row.has_preferred_columns());
        assert_eq!(row.extra.len(), 2);
        assert_eq!(
            row.extra.get("fs_nm").and_then(|v| v.as_str()),
            Some("연결재무제표")
        );
    }

    #[test]
    fn statement_row_without_preferred_columns() {
        let json = r#"{"some_field": "x", "other": "y"}"#;
        let row: StatementRow = serde_json::from_str(json).unwrap();
        assert!(!row.has_preferred_columns());
        assert_eq!(row.extra.len(), 2);
    }
}
