//! Tabular conversion of hit collections.
//!
//! A pure formatting utility: flattens a hit collection (or a query page)
//! into a rectangular table for export or display. Columns are the ordered
//! union of top-level fields across all hits; absent cells are `null`.

use std::collections::HashSet;

use serde_json::Value;

use crate::types::{Hit, QueryResponse};

/// How table rows are indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableIndex {
    /// Index rows by each hit's `query` field, falling back to the row
    /// number for hits without one.
    #[default]
    Query,
    /// Index rows by row number; `query` becomes an ordinary column.
    Row,
}

/// A rectangular view over a hit collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitTable {
    pub columns: Vec<String>,
    pub index: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl HitTable {
    pub fn from_hits(hits: &[Hit], index: TableIndex) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        if index == TableIndex::Row && hits.iter().any(|hit| hit.query.is_some()) {
            columns.push("query".to_string());
        }
        for hit in hits {
            for key in hit.fields.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }
        if hits.iter().any(|hit| hit.notfound) {
            columns.push("notfound".to_string());
        }

        let mut index_values = Vec::with_capacity(hits.len());
        let mut rows = Vec::with_capacity(hits.len());
        for (row_number, hit) in hits.iter().enumerate() {
            index_values.push(match index {
                TableIndex::Query => hit
                    .query
                    .clone()
                    .unwrap_or_else(|| row_number.to_string()),
                TableIndex::Row => row_number.to_string(),
            });
            let row = columns
                .iter()
                .map(|column| match column.as_str() {
                    "query" => hit
                        .query
                        .as_ref()
                        .map(|q| Value::String(q.clone()))
                        .unwrap_or(Value::Null),
                    "notfound" => Value::Bool(hit.notfound),
                    name => hit.fields.get(name).cloned().unwrap_or(Value::Null),
                })
                .collect();
            rows.push(row);
        }

        Self {
            columns,
            index: index_values,
            rows,
        }
    }

    /// Convert one query page's hit envelope.
    pub fn from_response(response: &QueryResponse, index: TableIndex) -> Self {
        Self::from_hits(&response.hits, index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by row position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)
    }
}
