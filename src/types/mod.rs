//! Core type definitions: service records, query pages, and term lists.

mod hit;
mod terms;

pub use hit::{Hit, QueryResponse};
pub use terms::{format_list, split_list, Terms};

/// A response body, either decoded or carried through verbatim for raw
/// passthrough mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}
