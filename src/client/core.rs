use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::batch::{
    classify, collect_hits, collect_raw, BatchPayload, BatchRunner, Classification, RawBatches,
};
use crate::cache::CacheManager;
use crate::client::builder::GeneClientBuilder;
use crate::client::fetch_all;
use crate::options::{GeneOptions, QueryManyOptions, QueryOptions};
use crate::params::{self, Params};
use crate::transport::{CachePolicy, Decode, HttpTransport};
use crate::types::{format_list, Hit, QueryResponse, Terms};
use crate::{BoxStream, Error, Result};

/// Production service base URL.
pub const DEFAULT_BASE_URL: &str = "https://mygene.info/v3";

/// Field set returned by annotation lookups when the caller does not pick
/// one. Pass [`crate::Fields::All`] for every available field.
pub const DEFAULT_GENE_FIELDS: &str = "symbol,name,taxid,entrezgene";

pub(crate) const GENE_ENDPOINT: &str = "/gene";
pub(crate) const QUERY_ENDPOINT: &str = "/query";
const METADATA_ENDPOINT: &str = "/metadata";
const METADATA_FIELDS_ENDPOINT: &str = "/metadata/fields";

/// Client for the gene annotation service.
///
/// All operations are read-only. Batched operations issue their requests
/// strictly one after another with inter-request pacing; nothing is retried
/// here.
pub struct GeneClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) cache: Option<Arc<CacheManager>>,
    pub(crate) step: usize,
    pub(crate) delay: Duration,
}

impl std::fmt::Debug for GeneClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneClient")
            .field("cache", &self.cache.is_some())
            .field("step", &self.step)
            .field("delay", &self.delay)
            .finish()
    }
}

/// Result of a batch-term lookup: the ordered hits plus the anomaly
/// summaries derived from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryManyOutput {
    /// Ordered concatenation of every hit across all batches.
    pub hits: Vec<Hit>,
    /// Terms that matched more than one record, with hit counts.
    pub dup: Vec<(String, usize)>,
    /// Terms that matched nothing.
    pub missing: Vec<String>,
}

impl QueryManyOutput {
    pub fn is_clean(&self) -> bool {
        self.dup.is_empty() && self.missing.is_empty()
    }
}

impl GeneClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self> {
        GeneClientBuilder::new().build()
    }

    pub fn builder() -> GeneClientBuilder {
        GeneClientBuilder::new()
    }

    /// The installed response cache, if any.
    pub fn cache(&self) -> Option<&CacheManager> {
        self.cache.as_deref()
    }

    fn runner(&self, verbose: bool) -> BatchRunner {
        BatchRunner::new(self.step, self.delay, verbose)
    }

    /// Look up the annotation object for one gene id.
    ///
    /// Returns `Ok(None)` when the service reports no match for the id;
    /// transport failures propagate as errors.
    pub async fn gene(&self, id: &str, options: &GeneOptions) -> Result<Option<Hit>> {
        let mut request = Params::new();
        if let Some(fields) = options.fields.resolve(Some(DEFAULT_GENE_FIELDS)) {
            request.push(params::FIELDS, fields);
        }
        push_common(&mut request, &options.species, options.entrezonly, &options.email);
        let path = format!("{}/{}", GENE_ENDPOINT, id);
        match self
            .transport
            .get(&path, &request, Decode::Json, CachePolicy::Use)
            .await
        {
            Ok(response) => Ok(Some(serde_json::from_value(response.into_json()?)?)),
            Err(Error::Remote { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Look up annotation objects for a collection of gene ids.
    ///
    /// Ids may be a comma-delimited string or an ordered collection; large
    /// inputs are split into service-sized batches and the per-batch hits
    /// concatenated in input order.
    pub async fn genes(
        &self,
        ids: impl Into<Terms>,
        options: &GeneOptions,
    ) -> Result<Vec<Hit>> {
        let batches = self
            .genes_batches(ids.into(), options, Decode::Json)
            .await?;
        collect_hits(batches)
    }

    /// Raw-passthrough variant of [`GeneClient::genes`]: returns one opaque
    /// payload per issued batch, collapsed when only one batch was issued.
    pub async fn genes_raw(
        &self,
        ids: impl Into<Terms>,
        options: &GeneOptions,
    ) -> Result<RawBatches> {
        let batches = self
            .genes_batches(ids.into(), options, Decode::Text)
            .await?;
        Ok(collect_raw(batches))
    }

    async fn genes_batches(
        &self,
        ids: Terms,
        options: &GeneOptions,
        decode: Decode,
    ) -> Result<Vec<BatchPayload>> {
        let terms = ids.normalize();
        let mut base = Params::new();
        if let Some(fields) = options.fields.resolve(Some(DEFAULT_GENE_FIELDS)) {
            base.push(params::FIELDS, fields);
        }
        push_common(&mut base, &options.species, options.entrezonly, &options.email);
        let transport = &self.transport;
        self.runner(options.verbose)
            .run(&terms, |chunk| {
                let mut form = Params::new();
                form.push(params::IDS, format_list(&chunk));
                form.extend(&base);
                async move {
                    transport
                        .post(GENE_ENDPOINT, &form, decode, CachePolicy::Use)
                        .await
                        .map(BatchPayload::from)
                }
            })
            .await
    }

    /// Run a free-text or structured query, returning one result page.
    pub async fn query(&self, q: &str, options: &QueryOptions) -> Result<QueryResponse> {
        let request = query_params(q, options);
        let response = self
            .transport
            .get(QUERY_ENDPOINT, &request, Decode::Json, CachePolicy::Use)
            .await?;
        Ok(serde_json::from_value(response.into_json()?)?)
    }

    /// Stream every hit of a query through the service's scroll protocol.
    ///
    /// The stream is lazy, single-pass, and non-restartable: dropping it
    /// stops further page requests. Continuation tokens expire server-side
    /// after roughly one minute between page requests; an expired scroll
    /// ends the stream early after a logged warning rather than failing.
    pub fn query_fetch_all(&self, q: &str, options: &QueryOptions) -> BoxStream<'static, Hit> {
        let mut request = query_params(q, options);
        request.set(params::FETCH_ALL, "true");
        fetch_all::stream(Arc::clone(&self.transport), request, options.verbose)
    }

    /// Map a collection of query terms (symbols, ids, ...) to genes.
    ///
    /// Terms may be a comma-delimited string or an ordered collection.
    /// After aggregation the hits are classified: terms with several hits
    /// are reported in `dup`, terms without any in `missing`.
    pub async fn query_many(
        &self,
        terms: impl Into<Terms>,
        options: &QueryManyOptions,
    ) -> Result<QueryManyOutput> {
        let batches = self
            .query_many_batches(terms.into(), options, Decode::Json)
            .await?;
        let hits = collect_hits(batches)?;
        let Classification { dup, missing } = classify(&hits);
        if options.verbose {
            info!("Finished.");
            if !dup.is_empty() {
                warn!("{} input query terms found dup hits", dup.len());
            }
            if !missing.is_empty() {
                warn!("{} input query terms found no hit", missing.len());
            }
        }
        Ok(QueryManyOutput { hits, dup, missing })
    }

    /// Raw-passthrough variant of [`GeneClient::query_many`]: skips result
    /// parsing and classification.
    pub async fn query_many_raw(
        &self,
        terms: impl Into<Terms>,
        options: &QueryManyOptions,
    ) -> Result<RawBatches> {
        let batches = self
            .query_many_batches(terms.into(), options, Decode::Text)
            .await?;
        Ok(collect_raw(batches))
    }

    async fn query_many_batches(
        &self,
        terms: Terms,
        options: &QueryManyOptions,
        decode: Decode,
    ) -> Result<Vec<BatchPayload>> {
        let terms = terms.normalize();
        let mut base = Params::new();
        if let Some(scopes) = &options.scopes {
            base.push(params::SCOPES, scopes.clone());
        }
        if let Some(fields) = options.fields.resolve(None) {
            base.push(params::FIELDS, fields);
        }
        push_common(&mut base, &options.species, options.entrezonly, &options.email);
        let transport = &self.transport;
        self.runner(options.verbose)
            .run(&terms, |chunk| {
                let mut form = Params::new();
                form.push(params::Q, format_list(&chunk));
                form.extend(&base);
                async move {
                    transport
                        .post(QUERY_ENDPOINT, &form, decode, CachePolicy::Use)
                        .await
                        .map(BatchPayload::from)
                }
            })
            .await
    }

    /// Service metadata: data sources, document counts, build version.
    pub async fn metadata(&self) -> Result<Value> {
        let response = self
            .transport
            .get(METADATA_ENDPOINT, &Params::new(), Decode::Json, CachePolicy::Use)
            .await?;
        response.into_json()
    }

    /// Available annotation fields, optionally filtered by a
    /// case-insensitive substring of the field name.
    pub async fn fields(&self, search: Option<&str>) -> Result<Map<String, Value>> {
        let response = self
            .transport
            .get(
                METADATA_FIELDS_ENDPOINT,
                &Params::new(),
                Decode::Json,
                CachePolicy::Use,
            )
            .await?;
        let all: Map<String, Value> = serde_json::from_value(response.into_json()?)?;
        Ok(match search {
            Some(term) => {
                let needle = term.to_lowercase();
                all.into_iter()
                    .filter(|(name, _)| name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => all,
        })
    }
}

fn query_params(q: &str, options: &QueryOptions) -> Params {
    let mut request = Params::new();
    request.push(params::Q, q);
    if let Some(fields) = options.fields.resolve(None) {
        request.push(params::FIELDS, fields);
    }
    if let Some(size) = options.size {
        request.push(params::SIZE, size.to_string());
    }
    if let Some(skip) = options.skip {
        request.push(params::SKIP, skip.to_string());
    }
    if let Some(sort) = &options.sort {
        request.push(params::SORT, sort.clone());
    }
    push_common(&mut request, &options.species, options.entrezonly, &options.email);
    request
}

fn push_common(
    request: &mut Params,
    species: &Option<String>,
    entrezonly: Option<bool>,
    email: &Option<String>,
) {
    if let Some(species) = species {
        request.push(params::SPECIES, species.clone());
    }
    if let Some(entrezonly) = entrezonly {
        request.push(params::ENTREZONLY, if entrezonly { "true" } else { "false" });
    }
    if let Some(email) = email {
        request.push(params::EMAIL, email.clone());
    }
}
