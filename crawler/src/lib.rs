//! Fetching a contiguous range of comic payloads into a [`Collection`](comicdex_core::Collection).

pub mod collect;
pub mod error;
pub mod fetch;
pub mod source;

pub use collect::{Collector, CollectorConfig, FailurePolicy};
pub use error::{CollectError, FetchError};
pub use fetch::{decode_payload, Fetch, FetchOptions, HttpFetcher};
pub use source::{ComicSource, DEFAULT_BASE_URL};
