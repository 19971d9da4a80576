//! Blocking-point HTTP execution over `reqwest`.

mod http;

pub use http::{CachePolicy, Decode, HttpTransport, ServiceResponse, TransportError};
