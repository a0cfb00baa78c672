//! Single-slot credential cache with single-flight population.

// self
use crate::{
	_prelude::*,
	auth::{Credential, OAuthApi},
	error::AuthError,
};

/// Source of fresh credentials for a [`TokenCache`].
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Requests a new credential.
	fn fetch(&self) -> Result<Credential>;
}
impl TokenSource for OAuthApi {
	fn fetch(&self) -> Result<Credential> {
		self.request_token()
	}
}

/// Holds at most one credential, populated on first use and reused until invalidated.
///
/// The slot lock is held while a credential is fetched, so concurrent first uses issue a
/// single token request and every waiter observes its result. There is no TTL-driven refresh;
/// call [`TokenCache::invalidate`] or [`TokenCache::refresh`] to replace a stale credential.
pub struct TokenCache {
	source: Arc<dyn TokenSource>,
	slot: Mutex<Option<Credential>>,
}
impl TokenCache {
	/// Creates an empty cache backed by `source`.
	pub fn new(source: Arc<dyn TokenSource>) -> Self {
		Self { source, slot: Mutex::new(None) }
	}

	/// Returns the cached credential, fetching one if the slot is empty.
	///
	/// Fetch failures leave the slot empty and surface as [`Error::Auth`].
	pub fn get(&self) -> Result<Credential> {
		let mut slot = self.slot.lock();

		if let Some(credential) = slot.as_ref() {
			return Ok(credential.clone());
		}

		let credential = self.fetch()?;

		*slot = Some(credential.clone());

		Ok(credential)
	}

	/// Replaces the cached credential with a freshly fetched one.
	///
	/// On failure the previous credential is kept.
	pub fn refresh(&self) -> Result<Credential> {
		let mut slot = self.slot.lock();
		let credential = self.fetch()?;

		*slot = Some(credential.clone());

		Ok(credential)
	}

	/// Empties the slot so the next [`TokenCache::get`] fetches a new credential.
	pub fn invalidate(&self) {
		if self.slot.lock().take().is_some() {
			tracing::debug!("Cached Battle.net credential invalidated.");
		}
	}

	/// Returns the cached credential without fetching.
	pub fn peek(&self) -> Option<Credential> {
		self.slot.lock().clone()
	}

	fn fetch(&self) -> Result<Credential> {
		self.source.fetch().map_err(|e| {
			tracing::error!(error = %e, "Unable to obtain a Battle.net credential.");

			AuthError::token_request(e).into()
		})
	}
}
impl Debug for TokenCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenCache").field("cached", &self.slot.lock().is_some()).finish()
	}
}
