use std::sync::Arc;
use std::time::Duration;

use crate::batch::DEFAULT_STEP;
use crate::cache::{CacheBackend, CacheConfig, CacheManager};
use crate::client::core::{GeneClient, DEFAULT_BASE_URL};
use crate::transport::HttpTransport;
use crate::{Error, Result};

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct GeneClientBuilder {
    base_url: String,
    timeout: Duration,
    step: usize,
    delay: Duration,
    cache: Option<Arc<CacheManager>>,
    strict_status: bool,
}

impl GeneClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            step: DEFAULT_STEP,
            delay: Duration::from_secs(1),
            cache: None,
            strict_status: true,
        }
    }

    /// Override the service base URL (primarily for testing with mock
    /// servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-request timeout at the HTTP layer.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Batch size for batched operations. Clamped at request time to the
    /// largest batch the service accepts.
    pub fn step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Delay inserted between successive batch requests. `Duration::ZERO`
    /// disables pacing.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Install a response cache over the given backend.
    pub fn with_cache(mut self, backend: Box<dyn CacheBackend>, config: CacheConfig) -> Self {
        self.cache = Some(Arc::new(CacheManager::new(backend, config)));
        self
    }

    /// Install an externally managed cache.
    pub fn with_cache_manager(mut self, cache: Arc<CacheManager>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Disable strict HTTP status checking: error responses pass through
    /// uninterpreted instead of failing.
    pub fn strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<GeneClient> {
        if self.step == 0 {
            return Err(Error::invalid_argument("step must be a positive integer"));
        }
        let transport = Arc::new(HttpTransport::new(
            &self.base_url,
            self.timeout,
            self.cache.clone(),
            self.strict_status,
        )?);
        Ok(GeneClient {
            transport,
            cache: self.cache,
            step: self.step,
            delay: self.delay,
        })
    }
}

impl Default for GeneClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        let client = GeneClientBuilder::new().build().unwrap();
        assert!(client.cache().is_none());
    }

    #[test]
    fn test_zero_step_rejected_at_build_time() {
        let err = GeneClientBuilder::new().step(0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = GeneClientBuilder::new().base_url("::::").build().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
