//! Matching and ranking helpers for the identifier-resolution cascade.
//!
//! The tier ordering itself lives in [`DartService::resolve`]; this module
//! keeps the per-tier matching rules as pure functions so they can be
//! tested without a service.
//!
//! [`DartService::resolve`]: crate::DartService::resolve

use dart_core::CorpEntry;

/// Maximum number of candidates surfaced on an ambiguous match.
pub(crate) const MAX_CANDIDATES: usize = 10;

/// Returns true if the query looks like a public 6-digit stock code.
pub(crate) fn is_stock_code(query: &str) -> bool {
    query.len() == 6 && query.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if the query looks like an 8-digit DART corp code.
pub(crate) fn is_corp_code(query: &str) -> bool {
    query.len() == 8 && query.bytes().all(|b| b.is_ascii_digit())
}

/// Exact match: the query equals an entry's name or stock code.
pub(crate) fn exact_match<'a>(entries: &'a [CorpEntry], query: &str) -> Option<&'a CorpEntry> {
    entries
        .iter()
        .find(|e| e.corp_name == query || e.stock_code.as_deref() == Some(query))
}

/// Fuzzy match: the query is a substring of an entry's name, or contains
/// it. First hit in table order wins; this is a heuristic, not a ranked
/// similarity score.
pub(crate) fn fuzzy_match<'a>(entries: &'a [CorpEntry], query: &str) -> Option<&'a CorpEntry> {
    entries
        .iter()
        .find(|e| e.corp_name.contains(query) || query.contains(&e.corp_name))
}

/// Substring scan over the bulk reference table.
///
/// Stock codes are matched exactly so ticker queries work against the
/// bulk table too.
pub(crate) fn search_table(entries: &[CorpEntry], query: &str) -> Vec<CorpEntry> {
    entries
        .iter()
        .filter(|e| e.corp_name.contains(query) || e.stock_code.as_deref() == Some(query))
        .cloned()
        .collect()
}

/// Order ambiguous candidates for presentation: listed companies first,
/// then by how close the name length is to the query length, capped at
/// [`MAX_CANDIDATES`].
pub(crate) fn rank_candidates(mut candidates: Vec<CorpEntry>, query: &str) -> Vec<CorpEntry> {
    let query_len = query.chars().count() as i64;
    candidates.sort_by_key(|e| {
        let name_len = e.corp_name.chars().count() as i64;
        (!e.listed, (name_len - query_len).abs())
    });
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use dart_core::CorpCode;

    fn entry(name: &str, code: &str) -> CorpEntry {
        CorpEntry::new(name, CorpCode::new(code))
    }

    fn listed(name: &str, code: &str, ticker: &str) -> CorpEntry {
        entry(name, code).with_stock_code(ticker)
    }

    #[test]
    fn stock_and_corp_code_shapes() {
        assert!(is_stock_code("005930"));
        assert!(!is_stock_code("05930"));
        assert!(!is_stock_code("00593A"));

        assert!(is_corp_code("00126380"));
        assert!(!is_corp_code("005930"));
    }

    #[test]
    fn exact_match_on_name_and_ticker() {
        let table = vec![listed("Samsung Electronics", "00126380", "005930")];

        assert!(exact_match(&table, "Samsung Electronics").is_some());
        assert!(exact_match(&table, "005930").is_some());
        assert!(exact_match(&table, "Samsung").is_none());
    }

    #[test]
    fn fuzzy_match_both_directions_first_wins() {
        let table = vec![
            listed("Samsung Electronics", "00126380", "005930"),
            listed("Samsung SDI", "00126362", "006400"),
        ];

        // Query is a substring of the entry name
        let hit = fuzzy_match(&table, "Samsung").unwrap();
        assert_eq!(hit.corp_code, CorpCode::new("00126380"));

        // Query contains the entry name
        let hit = fuzzy_match(&table, "Samsung SDI Co., Ltd.").unwrap();
        assert_eq!(hit.corp_code, CorpCode::new("00126362"));
    }

    #[test]
    fn search_table_matches_substring_and_ticker() {
        let table = vec![
            listed("Samsung Electronics", "00126380", "005930"),
            entry("Samsung Electronics Service", "00144155"),
            listed("SK hynix", "00164779", "000660"),
        ];

        assert_eq!(search_table(&table, "Samsung Electronics").len(), 2);
        assert_eq!(search_table(&table, "000660").len(), 1);
        assert!(search_table(&table, "Hanwha").is_empty());
    }

    #[test]
    fn rank_candidates_prefers_listed_then_name_length() {
        let candidates = vec![
            entry("Samsung Electronics Service", "00144155"),
            listed("Samsung Electronics America Holdings", "00999991", "900001"),
            listed("Samsung Electronics", "00126380", "005930"),
        ];

        let ranked = rank_candidates(candidates, "Samsung Electronics");

        // Listed entries come first; among listed, closest name length wins.
        assert_eq!(ranked[0].corp_code, CorpCode::new("00126380"));
        assert!(ranked[1].listed);
        assert!(!ranked[2].listed);
    }

    #[test]
    fn rank_candidates_caps_at_ten() {
        let candidates: Vec<CorpEntry> = (0..25)
            .map(|i| CorpEntry::new(format!("Samsung Unit {i}"), CorpCode::new(format!("{i:08}"))))
            .collect();

        assert_eq!(rank_candidates(candidates, "Samsung").len(), MAX_CANDIDATES);
    }
}
