//! Batched repeated-query engine.
//!
//! Arbitrarily large inputs are partitioned into service-sized chunks,
//! issued one request at a time with inter-request pacing, and re-assembled
//! into one ordered result collection. Batch-term lookups additionally
//! classify anomalies: terms matching more than one record and terms
//! matching none.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Chunks`] | Fixed-size contiguous partition with cumulative counts |
//! | [`BatchRunner`] | Sequential per-chunk execution with pacing and progress |
//! | [`collect_hits`] / [`collect_raw`] | Ordered aggregation of per-batch payloads |
//! | [`classify`] | Duplicate and missing term detection |

mod aggregate;
mod chunker;
mod classify;
mod pacing;

pub use aggregate::{collect_hits, collect_raw, RawBatches};
pub use chunker::{Chunks, DEFAULT_STEP, MAX_QUERY};
pub use classify::{classify, Classification};
pub use pacing::{BatchPayload, BatchRunner};
