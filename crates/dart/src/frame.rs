//! Column projection of fetched statement rows.
//!
//! A fetched statement is projected onto the four preferred columns. When
//! a response carries none of them (a non-standard schema), every
//! passthrough column is exposed instead and the result is flagged so the
//! caller can decide whether to proceed with the raw row set.

use std::collections::BTreeSet;

use polars::prelude::*;

use dart_core::{DartError, Result, StatementRow};

/// The preferred output columns, in presentation order.
pub const PREFERRED_COLUMNS: [&str; 4] = ["sj_nm", "account_nm", "thstrm_amount", "frmtrm_amount"];

/// The projected statement table.
#[derive(Clone, Debug)]
pub struct StatementFrame {
    /// The projected rows.
    pub frame: DataFrame,
    /// True when the rows carried none of the preferred columns and every
    /// passthrough column was exposed instead.
    pub nonstandard: bool,
}

/// Project statement rows onto the preferred column set.
pub fn project(rows: &[StatementRow]) -> Result<StatementFrame> {
    if rows.is_empty() {
        return Ok(StatementFrame {
            frame: DataFrame::empty(),
            nonstandard: false,
        });
    }

    if rows.iter().any(StatementRow::has_preferred_columns) {
        let frame = DataFrame::new(vec![
            Column::new(
                "sj_nm".into(),
                rows.iter().map(|r| r.sj_nm.clone()).collect::<Vec<_>>(),
            ),
            Column::new(
                "account_nm".into(),
                rows.iter()
                    .map(|r| r.account_nm.clone())
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "thstrm_amount".into(),
                rows.iter()
                    .map(|r| r.thstrm_amount.clone())
                    .collect::<Vec<_>>(),
            ),
            Column::new(
                "frmtrm_amount".into(),
                rows.iter()
                    .map(|r| r.frmtrm_amount.clone())
                    .collect::<Vec<_>>(),
            ),
        ])
        .map_err(|e| DartError::Parse(e.to_string()))?;

        return Ok(StatementFrame {
            frame,
            nonstandard: false,
        });
    }

    // Non-standard schema: expose every passthrough column instead of
    // failing. BTreeSet keeps the column order deterministic.
    let names: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.extra.keys().map(String::as_str))
        .collect();

    let columns = names
        .into_iter()
        .map(|name| {
            let values: Vec<Option<String>> = rows
                .iter()
                .map(|r| r.extra.get(name).map(stringify_value))
                .collect();
            Column::new(name.into(), values)
        })
        .collect::<Vec<_>>();

    let frame = DataFrame::new(columns).map_err(|e| DartError::Parse(e.to_string()))?;

    Ok(StatementFrame {
        frame,
        nonstandard: true,
    })
}

/// Render a passthrough JSON value the way the service formats strings.
fn stringify_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
