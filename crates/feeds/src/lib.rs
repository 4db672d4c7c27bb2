//! Rate-limited REST access to the exchange ticker API.
//!
//! ## Architecture
//!
//! - `rest` - Indodax public API client (pair list + per-pair ticker)
//! - `limiter` - token-bucket request rate limiting against the API quota
//! - `cache` - short-TTL memoized ticker lookups shared by all polling cycles

pub mod cache;
pub mod error;
pub mod limiter;
pub mod rest;

pub use cache::*;
pub use error::*;
pub use limiter::*;
pub use rest::*;
