use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One matched record returned by the service for a query.
///
/// The schema is open: beyond the two fields the client interprets, all
/// service-defined fields are retained in [`Hit::fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// The originating query term for batch lookups; absent on plain queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Synthetic marker set by the service when a query term had no match.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub notfound: bool,
    /// All remaining service-defined fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Hit {
    /// Look up a service-defined field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The `_id` field, when present and a string.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("_id").and_then(Value::as_str)
    }
}

/// One page of a `/query` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<Hit>,
    /// Opaque continuation token for fetch-all mode. Expires server-side
    /// roughly one minute after issue.
    #[serde(
        rename = "_scroll_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scroll_id: Option<String>,
    /// Error payload attached by the service; terminates a scroll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// Advisory warning attached by the service.
    #[serde(rename = "_warning", default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QueryResponse {
    /// The service error message, if any, rendered as text.
    pub fn error_message(&self) -> Option<String> {
        match &self.error {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }
}
