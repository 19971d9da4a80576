//! Wire-level parameter names and ordered parameter maps.
//!
//! Parameter names are fixed by the remote service and must round-trip
//! byte-for-byte. [`Params`] preserves insertion order so that request
//! signatures (and therefore cache keys) are deterministic.

/// Free-text or id-mapping query string.
pub const Q: &str = "q";
/// Comma-joined identifier list for batch annotation lookups.
pub const IDS: &str = "ids";
/// Comma-joined field selection; `all` selects every available field.
pub const FIELDS: &str = "fields";
/// Species filter (taxonomy id or common name).
pub const SPECIES: &str = "species";
/// Page size.
pub const SIZE: &str = "size";
/// Page offset.
pub const SKIP: &str = "skip";
/// Sort field; a `-` prefix requests descending order.
pub const SORT: &str = "sort";
/// Identifier namespaces searched by batch-term lookups.
pub const SCOPES: &str = "scopes";
/// Caller identification for heavy API users.
pub const EMAIL: &str = "email";
/// Restrict results to genes with Entrez ids.
pub const ENTREZONLY: &str = "entrezonly";
/// Continuation token for fetch-all mode.
pub const SCROLL_ID: &str = "scroll_id";
/// Requests scroll-based retrieval of the entire result set.
pub const FETCH_ALL: &str = "fetch_all";

/// Back-compatible alias for [`FIELDS`], accepted at the options boundary.
pub const FILTER_ALIAS: &str = "filter";
/// Back-compatible alias for [`SCOPES`], accepted at the options boundary.
pub const SCOPE_ALIAS: &str = "scope";

/// An ordered collection of wire parameters.
///
/// Duplicate names are not expected; [`Params::set`] replaces in place so a
/// scroll loop can advance its continuation token without growing the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(&mut self, name: &str, value: impl Into<String>) {
        self.0.push((name.to_string(), value.into()));
    }

    /// Replace a parameter in place, appending if absent.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The ordered name/value pairs, ready for query-string or form encoding.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Canonical `name=value&...` rendering used for request signatures.
    pub fn canonical_string(&self) -> String {
        self.0
            .iter()
            .map(|(n, v)| format!("{}={}", n, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Append every pair of `other`.
    pub fn extend(&mut self, other: &Params) {
        self.0.extend(other.0.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut params = Params::new();
        params.push(Q, "cdk2");
        params.push(SIZE, "5");
        params.push(SPECIES, "human");
        let names: Vec<&str> = params.pairs().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec![Q, SIZE, SPECIES]);
        assert_eq!(params.canonical_string(), "q=cdk2&size=5&species=human");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = Params::new();
        params.push(Q, "cdk2");
        params.push(SCROLL_ID, "s1");
        params.set(SCROLL_ID, "s2");
        assert_eq!(params.get(SCROLL_ID), Some("s2"));
        assert_eq!(params.len(), 2);
        params.set(FETCH_ALL, "true");
        assert_eq!(params.len(), 3);
    }
}
