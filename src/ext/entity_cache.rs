//! Persistent entity cache contract that consumers may place in front of the dispatch core.

// self
use crate::_prelude::*;

/// Key/value store for decoded entities, addressed by string keys.
///
/// Values are stored as JSON so any backend (in-process map, Redis, disk) can hold them. TTLs
/// can be overridden per entity type, identified by [`std::any::type_name`]. The crate only
/// consumes this contract through [`Client::execute_cached`](crate::client::Client::execute_cached).
pub trait EntityCache
where
	Self: Send + Sync,
{
	/// Prefix the backend prepends to every key.
	fn key_prefix(&self) -> &str;

	/// Returns the value stored under `key`, if present and not expired.
	fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CacheError>;

	/// Stores `value` under `key`, expiring after `ttl` when provided.
	fn set(
		&self,
		key: &str,
		value: serde_json::Value,
		ttl: Option<Duration>,
	) -> Result<(), CacheError>;

	/// Deletes `keys`, returning whether anything was removed.
	fn del(&self, keys: &[&str]) -> Result<bool, CacheError>;

	/// Remaining lifetime of `key`, if it exists and expires.
	fn ttl(&self, key: &str) -> Result<Option<Duration>, CacheError>;

	/// Resets the expiry of `keys` to `ttl`.
	fn update_ttl(&self, ttl: Duration, keys: &[&str]) -> Result<bool, CacheError>;

	/// TTL applied to entities of type `entity`, if overridden.
	fn entity_ttl(&self, entity: &'static str) -> Option<Duration>;

	/// Overrides the TTL for entities of type `entity`, returning the previous override.
	fn set_entity_ttl(&self, entity: &'static str, ttl: Duration) -> Option<Duration>;

	/// Removes every entry under [`EntityCache::key_prefix`].
	fn flush(&self) -> Result<(), CacheError>;
}

/// Error type produced by [`EntityCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Serialization failures surfaced while storing or loading a value.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
