//! Report type and consolidation scope definitions.
//!
//! This module defines [`ReportCode`] for the periodic report family,
//! [`FsDiv`] for the consolidation scope, and [`StatementQuery`] which
//! fully determines one outbound statement request.

use serde::{Deserialize, Serialize};

use crate::types::CorpCode;

/// Periodic report type, mapped to DART's `reprt_code` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportCode {
    /// Annual business report (사업보고서).
    #[default]
    Annual,
    /// Semi-annual report (반기보고서).
    SemiAnnual,
    /// First-quarter report (1분기보고서).
    FirstQuarter,
    /// Third-quarter report (3분기보고서).
    ThirdQuarter,
}

impl ReportCode {
    /// Returns the wire value of this report type.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Annual => "11011",
            Self::SemiAnnual => "11012",
            Self::FirstQuarter => "11013",
            Self::ThirdQuarter => "11014",
        }
    }

    /// Parses a wire value back into a report type.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "11011" => Some(Self::Annual),
            "11012" => Some(Self::SemiAnnual),
            "11013" => Some(Self::FirstQuarter),
            "11014" => Some(Self::ThirdQuarter),
            _ => None,
        }
    }
}

/// Consolidation scope of a financial statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FsDiv {
    /// Consolidated statements including subsidiaries (`CFS`).
    #[default]
    Consolidated,
    /// Standalone statements of the parent entity (`OFS`).
    Standalone,
}

impl FsDiv {
    /// Returns the wire value of this consolidation scope.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Consolidated => "CFS",
            Self::Standalone => "OFS",
        }
    }
}

/// Fully determines one outbound statement request.
///
/// A query value is never mutated in place; fallback steps produce new
/// values via the `with_*` transformations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatementQuery {
    /// Target company identifier.
    pub corp_code: CorpCode,
    /// Target fiscal (business) year.
    pub bsns_year: i32,
    /// Report type to request.
    pub report: ReportCode,
    /// Consolidation scope to request.
    pub fs_div: FsDiv,
}

impl StatementQuery {
    /// Creates a query for the given company and fiscal year with the
    /// default report type (annual) and scope (consolidated).
    #[must_use]
    pub fn new(corp_code: CorpCode, bsns_year: i32) -> Self {
        Self {
            corp_code,
            bsns_year,
            report: ReportCode::default(),
            fs_div: FsDiv::default(),
        }
    }

    /// Returns a new query with the given report type.
    #[must_use]
    pub fn with_report(mut self, report: ReportCode) -> Self {
        self.report = report;
        self
    }

    /// Returns a new query with the given consolidation scope.
    #[must_use]
    pub fn with_fs_div(mut self, fs_div: FsDiv) -> Self {
        self.fs_div = fs_div;
        self
    }

    /// Returns a new query for a different fiscal year.
    #[must_use]
    pub fn with_year(mut self, bsns_year: i32) -> Self {
        self.bsns_year = bsns_year;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_codes_round_trip() {
        for report in [
            ReportCode::Annual,
            ReportCode::SemiAnnual,
            ReportCode::FirstQuarter,
            ReportCode::ThirdQuarter,
        ] {
            assert_eq!(ReportCode::from_code(report.code()), Some(report));
        }
        assert_eq!(ReportCode::from_code("99999"), None);
    }

    #[test]
    fn fs_div_wire_values() {
        assert_eq!(FsDiv::Consolidated.code(), "CFS");
        assert_eq!(FsDiv::Standalone.code(), "OFS");
    }

    #[test]
    fn query_transformations_are_pure() {
        let base = StatementQuery::new(CorpCode::new("00126380"), 2024);
        let fallback = base.clone().with_fs_div(FsDiv::Standalone);

        assert_eq!(base.fs_div, FsDiv::Consolidated);
        assert_eq!(fallback.fs_div, FsDiv::Standalone);
        assert_eq!(base.corp_code, fallback.corp_code);

        let prior = fallback.with_year(2023);
        assert_eq!(prior.bsns_year, 2023);
    }
}
