//! Request de-duplication and memoization for gateway reads.

pub mod request_cache;

pub use request_cache::{CacheStats, RequestCache, SharedValue};
