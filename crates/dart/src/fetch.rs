//! The report-fetch fallback cascade.
//!
//! The cascade is materialized up front as an ordered, deduplicated list
//! of [`StatementQuery`] values by [`cascade_plan`], so its ordering and
//! termination can be tested without any transport. Each step is a pure
//! transformation of the previous query, never an in-place mutation.

use std::collections::HashSet;

use dart_core::{CorpCode, FsDiv, ReportCode, StatementQuery, StatementRow};

/// A successfully fetched statement, tagged with the query variant that
/// produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchedStatement {
    /// The cascade variant that returned data.
    pub query: StatementQuery,
    /// The statement rows, in service order.
    pub rows: Vec<StatementRow>,
}

/// Build the ordered cascade of query variants for one fetch.
///
/// Order:
/// 1. `(year, report, Consolidated)`
/// 2. `(year, report, Standalone)`
/// 3. `(year, ThirdQuarter, Standalone)` - the most recent quarterly
///    report, with the scope inherited from the previous step
/// 4. when `year` is the current calendar year, variants 1 and 2 again
///    with `year - 1`
///
/// Exact variants are never repeated, so the cascade visits a bounded,
/// strictly ordered set of states even if the service alternates error
/// codes between calls.
#[must_use]
pub fn cascade_plan(
    corp_code: &CorpCode,
    year: i32,
    report: ReportCode,
    current_year: i32,
) -> Vec<StatementQuery> {
    let consolidated = StatementQuery::new(corp_code.clone(), year).with_report(report);
    let standalone = consolidated.clone().with_fs_div(FsDiv::Standalone);

    let mut steps = vec![
        consolidated.clone(),
        standalone.clone(),
        standalone.clone().with_report(ReportCode::ThirdQuarter),
    ];

    if year == current_year {
        steps.push(consolidated.with_year(year - 1));
        steps.push(standalone.with_year(year - 1));
    }

    let mut seen = HashSet::new();
    steps.retain(|q| seen.insert(q.clone()));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> CorpCode {
        CorpCode::new("00126380")
    }

    #[test]
    fn plan_for_past_year_has_three_steps() {
        let plan = cascade_plan(&code(), 2022, ReportCode::Annual, 2025);

        assert_eq!(plan.len(), 3);
        assert_eq!(
            (plan[0].report, plan[0].fs_div),
            (ReportCode::Annual, FsDiv::Consolidated)
        );
        assert_eq!(
            (plan[1].report, plan[1].fs_div),
            (ReportCode::Annual, FsDiv::Standalone)
        );
        assert_eq!(
            (plan[2].report, plan[2].fs_div),
            (ReportCode::ThirdQuarter, FsDiv::Standalone)
        );
        assert!(plan.iter().all(|q| q.bsns_year == 2022));
    }

    #[test]
    fn plan_for_current_year_retries_prior_year() {
        let plan = cascade_plan(&code(), 2025, ReportCode::Annual, 2025);

        assert_eq!(plan.len(), 5);
        assert_eq!(plan[3].bsns_year, 2024);
        assert_eq!(
            (plan[3].report, plan[3].fs_div),
            (ReportCode::Annual, FsDiv::Consolidated)
        );
        assert_eq!(plan[4].bsns_year, 2024);
        assert_eq!(plan[4].fs_div, FsDiv::Standalone);
    }

    #[test]
    fn plan_never_revisits_a_variant() {
        // A third-quarter starting report would collide with the quarterly
        // fallback step; the duplicate must be dropped, not retried.
        let plan = cascade_plan(&code(), 2025, ReportCode::ThirdQuarter, 2025);

        let unique: HashSet<_> = plan.iter().cloned().collect();
        assert_eq!(unique.len(), plan.len());
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn plan_is_deterministic() {
        let a = cascade_plan(&code(), 2024, ReportCode::Annual, 2025);
        let b = cascade_plan(&code(), 2024, ReportCode::Annual, 2025);
        assert_eq!(a, b);
    }
}
