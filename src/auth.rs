//! OAuth credential model, token endpoint call, and the single-slot credential cache.

pub mod credential;
pub mod oauth;
pub mod token_cache;

pub use credential::*;
pub use oauth::*;
pub use token_cache::*;
