//! # mygene
//!
//! Async Rust client for the [MyGene.info](https://mygene.info) gene
//! annotation web service.
//!
//! ## Overview
//!
//! This library wraps the MyGene.info REST API: single-gene annotation
//! lookup, batch annotation lookup, free-text and structured queries, and
//! batch id-mapping. Large inputs are transparently partitioned into
//! service-sized batches, issued sequentially with inter-request pacing,
//! and re-assembled into one ordered result collection.
//!
//! ## Key Features
//!
//! - **Unified Client**: [`GeneClient`] provides a single entry point for
//!   all service operations, built via [`GeneClientBuilder`]
//! - **Batching**: inputs of any size are chunked, paced, and aggregated in
//!   input order via the [`batch`] module
//! - **Classification**: batch id-mapping reports duplicate and unmatched
//!   query terms alongside the primary results
//! - **Fetch-all**: unbounded queries stream every hit through the
//!   service's scroll protocol as a lazy, single-pass [`futures::Stream`]
//! - **Caching**: optional response caching with pluggable backends via the
//!   [`cache`] module
//! - **Tabular conversion**: flatten hit collections into a simple table
//!   via the [`table`] module
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mygene::{GeneClient, GeneOptions, QueryManyOptions};
//!
//! #[tokio::main]
//! async fn main() -> mygene::Result<()> {
//!     let client = GeneClient::builder().build()?;
//!
//!     // Single annotation lookup; `None` means the id is unknown.
//!     let gene = client.gene("1017", &GeneOptions::new()).await?;
//!
//!     // Batch id-mapping with duplicate/missing classification.
//!     let mapped = client
//!         .query_many(
//!             vec!["1017", "695", "NA_TEST"],
//!             &QueryManyOptions::new().scopes("entrezgene"),
//!         )
//!         .await?;
//!     println!("{} hits, {} missing", mapped.hits.len(), mapped.missing.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, and per-operation request dispatch |
//! | [`batch`] | Chunking, pacing, aggregation, dup/missing classification |
//! | [`types`] | Core type definitions (hits, query pages, term lists) |
//! | [`options`] | Per-call configuration structs with defaults |
//! | [`params`] | Wire-level parameter names and ordered parameter maps |
//! | [`transport`] | Blocking-point HTTP execution over `reqwest` |
//! | [`cache`] | Response caching with pluggable backends |
//! | [`table`] | Tabular conversion of hit collections |

pub mod batch;
pub mod cache;
pub mod client;
pub mod options;
pub mod params;
pub mod table;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use batch::{BatchRunner, Classification, RawBatches};
pub use client::{GeneClient, GeneClientBuilder, QueryManyOutput, DEFAULT_BASE_URL};
pub use options::{Fields, GeneOptions, QueryManyOptions, QueryOptions};
pub use table::{HitTable, TableIndex};
pub use types::{Hit, QueryResponse, Terms};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
