use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::batch::BatchPayload;
use crate::cache::{CacheManager, RequestSignature};
use crate::params::Params;
use crate::types::Payload;
use crate::{Error, Result};

/// Whether a request may be answered from (and recorded into) the response
/// cache. Scroll continuation requests always bypass it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Use,
    Bypass,
}

/// How to interpret the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decode {
    Json,
    Text,
}

/// One executed service request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub from_cache: bool,
    pub status: u16,
    pub body: Payload,
}

impl ServiceResponse {
    /// The decoded JSON body; fails if the request asked for raw text.
    pub fn into_json(self) -> Result<Value> {
        match self.body {
            Payload::Json(value) => Ok(value),
            Payload::Text(_) => Err(Error::invalid_argument(
                "expected a decoded JSON body, got raw text",
            )),
        }
    }
}

impl From<ServiceResponse> for BatchPayload {
    fn from(response: ServiceResponse) -> Self {
        BatchPayload {
            from_cache: response.from_cache,
            payload: response.body,
        }
    }
}

// The cached value: status plus verbatim body text, decoded on the way out.
#[derive(Debug, Serialize, Deserialize)]
struct CachedResponse {
    status: u16,
    body: String,
}

/// Blocking-point HTTP execution for the client.
///
/// Owns the connection pool, the optional response cache, and strict status
/// checking. Every public operation funnels through [`HttpTransport::get`]
/// or [`HttpTransport::post`]; there is no retry logic at this layer.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    cache: Option<Arc<CacheManager>>,
    strict_status: bool,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("cache", &self.cache.is_some())
            .field("strict_status", &self.strict_status)
            .finish()
    }
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        cache: Option<Arc<CacheManager>>,
        strict_status: bool,
    ) -> Result<Self> {
        let base = url::Url::parse(base_url)
            .map_err(|e| Error::configuration(format!("invalid base url {:?}: {}", base_url, e)))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;
        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            cache,
            strict_status,
        })
    }

    pub fn cache(&self) -> Option<&Arc<CacheManager>> {
        self.cache.as_ref()
    }

    pub async fn get(
        &self,
        path: &str,
        params: &Params,
        decode: Decode,
        policy: CachePolicy,
    ) -> Result<ServiceResponse> {
        self.execute(Method::GET, path, params, decode, policy).await
    }

    pub async fn post(
        &self,
        path: &str,
        params: &Params,
        decode: Decode,
        policy: CachePolicy,
    ) -> Result<ServiceResponse> {
        self.execute(Method::POST, path, params, decode, policy)
            .await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        decode: Decode,
        policy: CachePolicy,
    ) -> Result<ServiceResponse> {
        let key = RequestSignature::new(method.as_str(), path, params).key();
        if let (CachePolicy::Use, Some(cache)) = (policy, &self.cache) {
            if cache.enabled() {
                if let Some(cached) = cache.get::<CachedResponse>(&key).await? {
                    return finish(cached.status, cached.body, true, decode);
                }
            }
        }

        let url = format!("{}{}", self.base_url, path);
        let request = if method == Method::POST {
            self.client.post(&url).form(params.pairs())
        } else {
            self.client.get(&url).query(params.pairs())
        };
        let response = request
            .header("x-request-id", Uuid::new_v4().to_string())
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(TransportError::Http)?;

        if self.strict_status && !(200..300).contains(&status) {
            return Err(Error::remote(status, remote_message(&text)));
        }

        if let (CachePolicy::Use, Some(cache)) = (policy, &self.cache) {
            if cache.enabled() && (200..300).contains(&status) {
                cache
                    .put(
                        &key,
                        &CachedResponse {
                            status,
                            body: text.clone(),
                        },
                    )
                    .await?;
            }
        }

        finish(status, text, false, decode)
    }
}

fn finish(status: u16, text: String, from_cache: bool, decode: Decode) -> Result<ServiceResponse> {
    let body = match decode {
        Decode::Text => Payload::Text(text),
        Decode::Json => Payload::Json(serde_json::from_str(&text)?),
    };
    Ok(ServiceResponse {
        from_cache,
        status,
        body,
    })
}

// Pull the service's own error message out of an error body when it has
// one; otherwise fall back to a truncated body excerpt.
fn remote_message(text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let excerpt: String = text.chars().take(200).collect();
    if excerpt.is_empty() {
        "request failed".to_string()
    } else {
        excerpt
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
