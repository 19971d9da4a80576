use crate::{Error, ErrorContext, Result};
use serde_json::Value;

/// Caller-supplied gene identifiers or query terms.
///
/// The service accepts either a comma-delimited string or an ordered
/// collection; both normalize to one canonical `Vec<String>` before any
/// batching logic runs. Order is significant and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terms {
    /// A delimited string, e.g. `"1017,695"`.
    Delimited(String),
    /// An ordered collection of terms.
    List(Vec<String>),
}

impl Terms {
    /// Normalize into the canonical ordered representation.
    ///
    /// Delimited strings split on commas; surrounding whitespace is trimmed
    /// and empty entries dropped, so an empty string yields no terms.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Terms::Delimited(s) => split_list(s),
            Terms::List(items) => items
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Build terms from a decoded JSON value.
    ///
    /// Accepts a string or an array of strings/numbers; any other shape
    /// fails with [`Error::InvalidArgument`].
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Terms::Delimited(s.clone())),
            Value::Array(items) => {
                let mut terms = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => terms.push(s.clone()),
                        Value::Number(n) => terms.push(n.to_string()),
                        other => {
                            return Err(Error::invalid_argument_with_context(
                                "terms must be strings or numbers",
                                ErrorContext::new()
                                    .with_field_path(format!("terms[{}]", i))
                                    .with_details(format!("got {}", json_type_name(other))),
                            ))
                        }
                    }
                }
                Ok(Terms::List(terms))
            }
            other => Err(Error::invalid_argument_with_context(
                "input must be a comma-delimited string or a list of terms",
                ErrorContext::new().with_details(format!("got {}", json_type_name(other))),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<&str> for Terms {
    fn from(s: &str) -> Self {
        Terms::Delimited(s.to_string())
    }
}

impl From<String> for Terms {
    fn from(s: String) -> Self {
        Terms::Delimited(s)
    }
}

impl From<Vec<String>> for Terms {
    fn from(items: Vec<String>) -> Self {
        Terms::List(items)
    }
}

impl From<Vec<&str>> for Terms {
    fn from(items: Vec<&str>) -> Self {
        Terms::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Terms {
    fn from(items: &[&str]) -> Self {
        Terms::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[String]> for Terms {
    fn from(items: &[String]) -> Self {
        Terms::List(items.to_vec())
    }
}

impl From<Vec<u64>> for Terms {
    fn from(items: Vec<u64>) -> Self {
        Terms::List(items.into_iter().map(|n| n.to_string()).collect())
    }
}

impl From<&[u64]> for Terms {
    fn from(items: &[u64]) -> Self {
        Terms::List(items.iter().map(|n| n.to_string()).collect())
    }
}

/// Join terms into the delimited form the service expects.
pub fn format_list(items: &[String]) -> String {
    items.join(",")
}

/// Split a delimited string back into terms.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_split_round_trip() {
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let joined = format_list(&items);
        assert_eq!(joined, "a,b,c");
        assert_eq!(split_list(&joined), items);
    }

    #[test]
    fn test_delimited_normalization() {
        let terms = Terms::from("1017, 695 ,,BTK");
        assert_eq!(terms.normalize(), vec!["1017", "695", "BTK"]);
        assert!(Terms::from("").normalize().is_empty());
    }

    #[test]
    fn test_list_normalization_preserves_order() {
        let terms = Terms::from(vec!["X", "Y", "X", "Z"]);
        assert_eq!(terms.normalize(), vec!["X", "Y", "X", "Z"]);
    }

    #[test]
    fn test_numeric_ids() {
        let terms = Terms::from(vec![1017u64, 695]);
        assert_eq!(terms.normalize(), vec!["1017", "695"]);
    }

    #[test]
    fn test_from_json_accepts_strings_and_arrays() {
        assert_eq!(
            Terms::from_json(&json!("1017,695")).unwrap().normalize(),
            vec!["1017", "695"]
        );
        assert_eq!(
            Terms::from_json(&json!(["1017", 695])).unwrap().normalize(),
            vec!["1017", "695"]
        );
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        for bad in [json!(42), json!({"ids": []}), json!(true), json!(null)] {
            let err = Terms::from_json(&bad).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { .. }));
        }
        let err = Terms::from_json(&json!(["ok", {"not": "ok"}])).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
