//! Sequential batch execution with inter-request pacing.

use std::future::Future;
use std::time::Duration;

use tracing::info;

use crate::batch::chunker::{Chunks, DEFAULT_STEP};
use crate::types::Payload;
use crate::Result;

/// Outcome of one batch request.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPayload {
    /// Whether the response was served from the response cache.
    pub from_cache: bool,
    pub payload: Payload,
}

/// Drives a per-chunk request function over a chunked input, strictly one
/// request at a time, in input order.
///
/// The upstream service enforces undocumented rate limits, so a fixed delay
/// is inserted between successive requests (never after the last, and not
/// after a cache hit). This is unconditional pacing, not error-driven retry;
/// request failures propagate immediately.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    pub step: usize,
    pub delay: Duration,
    pub verbose: bool,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            delay: Duration::from_secs(1),
            verbose: true,
        }
    }
}

impl BatchRunner {
    pub fn new(step: usize, delay: Duration, verbose: bool) -> Self {
        Self {
            step,
            delay,
            verbose,
        }
    }

    /// Execute `exec` once per chunk of `items`, collecting one payload per
    /// chunk in order.
    ///
    /// Progress is reported through `tracing` as the 1-based index range of
    /// each chunk, with completion annotated when served from cache.
    /// Single-chunk inputs suppress progress reporting.
    pub async fn run<T, F, Fut>(&self, items: &[T], mut exec: F) -> Result<Vec<BatchPayload>>
    where
        T: Clone,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = Result<BatchPayload>>,
    {
        let chunks = Chunks::new(items, self.step)?;
        let verbose = self.verbose && items.len() > chunks.effective_step();
        let total = items.len();
        let mut out = Vec::with_capacity(chunks.chunk_count());
        let mut start = 1usize;
        for (chunk, cnt) in chunks {
            if verbose {
                info!("querying {}-{}...", start, cnt);
            }
            let result = exec(chunk.to_vec()).await?;
            if verbose {
                if result.from_cache {
                    info!("done. (from cache)");
                } else {
                    info!("done.");
                }
            }
            let from_cache = result.from_cache;
            out.push(result);
            // Pacing applies between chunks only, and never after a cache hit.
            if cnt < total && !self.delay.is_zero() && !from_cache {
                tokio::time::sleep(self.delay).await;
            }
            start = cnt + 1;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn payload(n: usize) -> BatchPayload {
        BatchPayload {
            from_cache: false,
            payload: Payload::Json(json!(n)),
        }
    }

    #[tokio::test]
    async fn test_single_chunk_issues_one_call() {
        let runner = BatchRunner::new(1000, Duration::ZERO, true);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let items = vec!["1017".to_string(), "695".to_string()];
        let out = runner
            .run(&items, |chunk| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                assert_eq!(chunk, vec!["1017".to_string(), "695".to_string()]);
                async move { Ok(payload(n)) }
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn test_chunk_sizes_and_order() {
        let runner = BatchRunner::new(1000, Duration::ZERO, false);
        let items: Vec<String> = (0..2500).map(|i| i.to_string()).collect();
        let sizes = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&sizes);
        let out = runner
            .run(&items, |chunk| {
                let mut sizes = sink.lock().unwrap();
                sizes.push(chunk.len());
                let n = sizes.len();
                async move { Ok(payload(n)) }
            })
            .await
            .unwrap();
        assert_eq!(*sizes.lock().unwrap(), vec![1000, 1000, 500]);
        let order: Vec<_> = out
            .into_iter()
            .map(|p| match p.payload {
                Payload::Json(v) => v.as_u64().unwrap(),
                Payload::Text(_) => unreachable!(),
            })
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_chunks_but_not_after_last() {
        let runner = BatchRunner::new(10, Duration::from_secs(1), false);
        let items: Vec<String> = (0..25).map(|i| i.to_string()).collect();
        let begin = tokio::time::Instant::now();
        runner
            .run(&items, |_chunk| async move { Ok(payload(0)) })
            .await
            .unwrap();
        // 3 chunks, 2 inter-chunk delays.
        assert_eq!(begin.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hits_skip_pacing() {
        let runner = BatchRunner::new(10, Duration::from_secs(1), false);
        let items: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        let begin = tokio::time::Instant::now();
        runner
            .run(&items, |_chunk| async move {
                Ok(BatchPayload {
                    from_cache: true,
                    payload: Payload::Json(json!([])),
                })
            })
            .await
            .unwrap();
        assert_eq!(begin.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_errors_propagate_immediately() {
        let runner = BatchRunner::new(1, Duration::ZERO, false);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let items: Vec<String> = (0..5).map(|i| i.to_string()).collect();
        let err = runner
            .run(&items, |_chunk| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 1 {
                        Err(crate::Error::remote(500, "boom"))
                    } else {
                        Ok(payload(n))
                    }
                }
            })
            .await
            .unwrap_err();
        assert!(err.is_status(500));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
