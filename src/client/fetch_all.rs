//! Scroll-based retrieval of an entire result set.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::stream::unfold;
use tracing::{info, warn};

use crate::client::core::QUERY_ENDPOINT;
use crate::params::{self, Params};
use crate::transport::{CachePolicy, Decode, HttpTransport};
use crate::types::{Hit, QueryResponse};
use crate::{BoxStream, Result};

/// Prefix of the error payload marking normal scroll exhaustion.
const NO_MORE_RESULTS: &str = "No results to return";

struct ScrollState {
    transport: Arc<HttpTransport>,
    params: Params,
    buffered: VecDeque<Hit>,
    verbose: bool,
    started: bool,
    finished: bool,
}

/// Build the lazy hit stream for a fetch-all query.
///
/// `params` must already carry the query and the `fetch_all` marker. Pages
/// are requested one at a time as the caller pulls; dropping the stream
/// stops further requests.
pub(crate) fn stream(
    transport: Arc<HttpTransport>,
    params: Params,
    verbose: bool,
) -> BoxStream<'static, Hit> {
    let state = ScrollState {
        transport,
        params,
        buffered: VecDeque::new(),
        verbose,
        started: false,
        finished: false,
    };
    Box::pin(unfold(state, |mut state| async move {
        loop {
            if let Some(hit) = state.buffered.pop_front() {
                return Some((Ok(hit), state));
            }
            if state.finished {
                return None;
            }
            match state.next_page().await {
                Ok(page) => state.absorb(page),
                Err(e) => {
                    state.finished = true;
                    return Some((Err(e), state));
                }
            }
        }
    }))
}

impl ScrollState {
    async fn next_page(&mut self) -> Result<QueryResponse> {
        // Scroll state is never served from, nor recorded into, the cache.
        let response = self
            .transport
            .get(QUERY_ENDPOINT, &self.params, Decode::Json, CachePolicy::Bypass)
            .await?;
        Ok(serde_json::from_value(response.into_json()?)?)
    }

    fn absorb(&mut self, page: QueryResponse) {
        if let Some(error) = page.error_message() {
            // Continuation tokens expire server-side after about a minute
            // between page requests; an expired scroll surfaces here as an
            // early, incomplete end of the sequence.
            if !error.starts_with(NO_MORE_RESULTS) {
                warn!("fetch-all terminated early: {}", error);
            }
            self.finished = true;
            return;
        }
        if self.verbose {
            if let Some(warning) = &page.warning {
                warn!("{}", warning);
            }
        }
        if !self.started {
            self.started = true;
            if self.verbose {
                if let Some(total) = page.total {
                    info!("Fetching {} gene(s)...", total);
                }
            }
        }
        match page.scroll_id {
            Some(id) => self.params.set(params::SCROLL_ID, id),
            None => self.finished = true,
        }
        if page.hits.is_empty() {
            self.finished = true;
        }
        self.buffered.extend(page.hits);
    }
}
