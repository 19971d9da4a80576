//! Ordered aggregation of per-batch payloads.

use crate::batch::pacing::BatchPayload;
use crate::types::{Hit, Payload};
use crate::{Error, Result};

/// Raw-passthrough output: one opaque payload per issued batch, collapsed
/// when exactly one batch was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawBatches {
    Single(String),
    Multiple(Vec<String>),
}

impl RawBatches {
    pub fn len(&self) -> usize {
        match self {
            RawBatches::Single(_) => 1,
            RawBatches::Multiple(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            RawBatches::Single(payload) => vec![payload],
            RawBatches::Multiple(items) => items,
        }
    }
}

/// Flatten per-batch hit arrays into one collection, preserving relative
/// order across and within batches.
pub fn collect_hits(batches: Vec<BatchPayload>) -> Result<Vec<Hit>> {
    let mut out = Vec::new();
    for batch in batches {
        match batch.payload {
            Payload::Json(value) => {
                let hits: Vec<Hit> = serde_json::from_value(value)?;
                out.extend(hits);
            }
            Payload::Text(_) => {
                return Err(Error::invalid_argument(
                    "raw batch payloads cannot be aggregated into hits",
                ))
            }
        }
    }
    Ok(out)
}

/// Collect per-batch payloads verbatim for raw passthrough mode.
pub fn collect_raw(batches: Vec<BatchPayload>) -> RawBatches {
    let mut out: Vec<String> = batches
        .into_iter()
        .map(|batch| match batch.payload {
            Payload::Text(text) => text,
            Payload::Json(value) => value.to_string(),
        })
        .collect();
    if out.len() == 1 {
        RawBatches::Single(out.remove(0))
    } else {
        RawBatches::Multiple(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn json_batch(value: serde_json::Value) -> BatchPayload {
        BatchPayload {
            from_cache: false,
            payload: Payload::Json(value),
        }
    }

    fn text_batch(text: &str) -> BatchPayload {
        BatchPayload {
            from_cache: false,
            payload: Payload::Text(text.to_string()),
        }
    }

    #[test]
    fn test_collect_hits_preserves_order() {
        let batches = vec![
            json_batch(json!([{"query": "a", "_id": "1"}, {"query": "b", "_id": "2"}])),
            json_batch(json!([{"query": "c", "_id": "3"}])),
        ];
        let hits = collect_hits(batches).unwrap();
        let queries: Vec<_> = hits.iter().map(|h| h.query.as_deref().unwrap()).collect();
        assert_eq!(queries, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_collect_hits_empty() {
        assert!(collect_hits(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_collect_raw_collapses_single_batch() {
        let raw = collect_raw(vec![text_batch("[{\"query\":\"a\"}]")]);
        assert_eq!(raw, RawBatches::Single("[{\"query\":\"a\"}]".to_string()));
    }

    #[test]
    fn test_collect_raw_keeps_one_payload_per_batch() {
        let raw = collect_raw(vec![text_batch("[1]"), text_batch("[2]"), text_batch("[3]")]);
        assert_eq!(raw.len(), 3);
        assert_eq!(
            raw.into_vec(),
            vec!["[1]".to_string(), "[2]".to_string(), "[3]".to_string()]
        );
    }
}
