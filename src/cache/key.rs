//! Cache key derivation.

use sha2::{Digest, Sha256};

use crate::params::Params;

/// An opaque cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity of a read request: verb, target path, and ordered
/// parameters. Two requests with the same signature are interchangeable,
/// which is what makes the response cacheable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignature<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub params: &'a Params,
}

impl<'a> RequestSignature<'a> {
    pub fn new(method: &'a str, path: &'a str, params: &'a Params) -> Self {
        Self {
            method,
            path,
            params,
        }
    }

    pub fn key(&self) -> CacheKey {
        let mut hasher = Sha256::new();
        hasher.update(self.method.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.path.as_bytes());
        hasher.update(b"\n");
        hasher.update(self.params.canonical_string().as_bytes());
        let hash: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        CacheKey::new(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_same_request_same_key() {
        let mut a = Params::new();
        a.push(params::Q, "cdk2");
        a.push(params::SIZE, "5");
        let b = a.clone();
        assert_eq!(
            RequestSignature::new("GET", "/query", &a).key(),
            RequestSignature::new("GET", "/query", &b).key()
        );
    }

    #[test]
    fn test_key_depends_on_method_path_and_params() {
        let mut a = Params::new();
        a.push(params::Q, "cdk2");
        let mut b = Params::new();
        b.push(params::Q, "cdk1");
        let base = RequestSignature::new("GET", "/query", &a).key();
        assert_ne!(base, RequestSignature::new("POST", "/query", &a).key());
        assert_ne!(base, RequestSignature::new("GET", "/gene", &a).key());
        assert_ne!(base, RequestSignature::new("GET", "/query", &b).key());
    }
}
