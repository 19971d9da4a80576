//! Duplicate and missing term classification for batch-term lookups.

use std::collections::HashMap;

use crate::types::Hit;

/// Anomaly summary derived from an aggregated batch-term lookup.
///
/// Every input term lands in exactly one of: matched (present in the hit
/// collection), `dup` (matched more than once), or `missing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Terms that matched more than one record, with their hit counts,
    /// in first-seen order.
    pub dup: Vec<(String, usize)>,
    /// Terms that matched nothing.
    pub missing: Vec<String>,
}

impl Classification {
    pub fn is_clean(&self) -> bool {
        self.dup.is_empty() && self.missing.is_empty()
    }
}

/// One pass over the aggregated hits: `notfound` hits contribute their term
/// to `missing`, everything else is tallied by originating term.
pub fn classify(hits: &[Hit]) -> Classification {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    let mut missing = Vec::new();
    for hit in hits {
        let Some(query) = hit.query.as_deref() else {
            continue;
        };
        if hit.notfound {
            missing.push(query.to_string());
        } else {
            let count = counts.entry(query).or_insert(0);
            if *count == 0 {
                order.push(query);
            }
            *count += 1;
        }
    }
    let dup = order
        .into_iter()
        .filter(|query| counts[query] > 1)
        .map(|query| (query.to_string(), counts[query]))
        .collect();
    Classification { dup, missing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hits(values: serde_json::Value) -> Vec<Hit> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_dup_and_missing_detection() {
        let hits = hits(json!([
            {"query": "X", "_id": "1"},
            {"query": "X", "_id": "2"},
            {"query": "Y", "_id": "3"},
            {"query": "Z", "notfound": true}
        ]));
        let summary = classify(&hits);
        assert_eq!(summary.dup, vec![("X".to_string(), 2)]);
        assert_eq!(summary.missing, vec!["Z".to_string()]);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_clean_lookup() {
        let hits = hits(json!([
            {"query": "1017", "_id": "1017"},
            {"query": "695", "_id": "695"}
        ]));
        let summary = classify(&hits);
        assert!(summary.is_clean());
    }

    #[test]
    fn test_dup_order_is_first_seen() {
        let hits = hits(json!([
            {"query": "B", "_id": "1"},
            {"query": "A", "_id": "2"},
            {"query": "B", "_id": "3"},
            {"query": "A", "_id": "4"},
            {"query": "A", "_id": "5"}
        ]));
        let summary = classify(&hits);
        assert_eq!(
            summary.dup,
            vec![("B".to_string(), 2), ("A".to_string(), 3)]
        );
    }

    #[test]
    fn test_hits_without_query_are_ignored() {
        let hits = hits(json!([{"_id": "1017", "symbol": "CDK2"}]));
        assert!(classify(&hits).is_clean());
    }
}
