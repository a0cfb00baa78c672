//! Public extension contracts (rate limiting, entity caching).
//!
//! The dispatch core consumes these traits rather than concrete types, so downstream services
//! can bring their own rate budget or persistent cache. The crate ships a token-bucket
//! [`RateLimitPolicy`] and no [`EntityCache`] implementation.

pub mod entity_cache;
pub mod rate_limit;

pub use entity_cache::*;
pub use rate_limit::*;
