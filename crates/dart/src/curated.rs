//! Curated static table of frequently-queried companies.
//!
//! A small table of well-known KOSPI issuers checked before any network
//! call. Iteration order matters: fuzzy matches take the first hit.

use dart_core::{CorpCode, CorpEntry};

/// (name, corp_code, stock_code) triples for the curated table.
const CURATED: &[(&str, &str, &str)] = &[
    ("Samsung Electronics", "00126380", "005930"),
    ("SK hynix", "00164779", "000660"),
    ("LG Energy Solution", "00520029", "373220"),
    ("Samsung Biologics", "00877059", "207940"),
    ("Hyundai Motor", "00164742", "005380"),
    ("Kia", "00106641", "000270"),
    ("Celltrion", "00421045", "068270"),
    ("NAVER", "00266961", "035420"),
    ("Kakao", "00258801", "035720"),
    ("LG Chem", "00356361", "051910"),
    ("POSCO Holdings", "00155319", "005490"),
    ("Samsung SDI", "00126362", "006400"),
    ("LG Electronics", "00401731", "066570"),
    ("Hyundai Mobis", "00164788", "012330"),
    ("KB Financial Group", "00547583", "105560"),
    ("Shinhan Financial Group", "00382199", "055550"),
    ("Samsung C&T", "00149655", "028260"),
    ("SK Telecom", "00159023", "017670"),
    ("KT", "00186858", "030200"),
    ("Korea Electric Power", "00159193", "015760"),
];

/// Build the curated reference entries in table order.
#[must_use]
pub fn curated_table() -> Vec<CorpEntry> {
    CURATED
        .iter()
        .map(|(name, corp_code, stock_code)| {
            CorpEntry::new(*name, CorpCode::new(*corp_code)).with_stock_code(*stock_code)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn curated_corp_codes_are_unique() {
        let table = curated_table();
        let codes: HashSet<_> = table.iter().map(|e| e.corp_code.clone()).collect();
        assert_eq!(codes.len(), table.len());
    }

    #[test]
    fn curated_entries_are_listed() {
        for entry in curated_table() {
            assert!(entry.listed, "{} should be listed", entry.corp_name);
            assert_eq!(entry.stock_code.as_ref().map(String::len), Some(6));
        }
    }
}
