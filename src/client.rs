//! Client interface for the gene annotation service.
//!
//! The public surface is one client type plus one builder; per-operation
//! request construction lives in submodules under `src/client/`.

pub mod builder;
pub mod core;
mod fetch_all;

pub use builder::GeneClientBuilder;
pub use self::core::{GeneClient, QueryManyOutput, DEFAULT_BASE_URL, DEFAULT_GENE_FIELDS};
