//! Client context: configuration, call construction, and the lazy resolver.
//!
//! A [`Client`] is built once and is cheap to clone. Every clone shares the same rate limiter,
//! credential slot, and transport, so lazy resources decoded by one clone resolve through the
//! same budget and token as the call that produced them.

// crates.io
use oauth2::{ClientId, ClientSecret};
use url::Position;
// self
use crate::{
	_prelude::*,
	auth::{Credential, OAuthApi, TokenCache, parse_token_url},
	call::{Call, Decoder},
	entity::{self, Entity, FullIndex, IndexItem, Key, KeyIndex},
	error::ConfigError,
	ext::{EntityCache, RateLimitPolicy},
	http::{ApiRequest, HttpTransport, ReqwestHttpClient},
	interceptor::{DecoratedTransport, RequestDecorator},
	proxy::{ApiProxy, ProxyConfig},
	region::{self, Locale, Region},
	wow::WowApi,
};

/// Handle to the game-data API for one region and locale.
#[derive(Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}
impl Client {
	/// Starts a [`ClientBuilder`].
	pub fn builder() -> ClientBuilder {
		ClientBuilder::default()
	}

	/// Selected region.
	pub fn region(&self) -> Region {
		self.inner.region
	}

	/// Selected locale.
	pub fn locale(&self) -> Locale {
		self.inner.locale
	}

	/// Base URL relative paths are joined onto.
	pub fn base_url(&self) -> &Url {
		&self.inner.base_url
	}

	/// Executor configuration.
	pub fn proxy_config(&self) -> &ProxyConfig {
		self.inner.proxy.config()
	}

	/// Builds a `GET` call for `path`, relative to [`Client::base_url`].
	///
	/// The path may carry an `addNamespace` placeholder and any explicit query parameters.
	pub fn call<T>(&self, path: &str) -> Result<Call<T>>
	where
		T: Entity,
	{
		let url = self
			.inner
			.base_url
			.join(path)
			.map_err(|source| ConfigError::invalid_url(path, source))?;

		Ok(self.call_url(url))
	}

	/// Builds a `GET` call for an already fully-qualified URL.
	pub fn call_url<T>(&self, url: Url) -> Call<T>
	where
		T: Entity,
	{
		Call::new(ApiRequest::get(url), self.inner.transport.clone(), Decoder::bound(self.clone()))
	}

	/// Builds and executes a `GET` call for `path`.
	pub fn get<T>(&self, path: &str) -> Result<T>
	where
		T: Entity,
	{
		self.execute(&self.call(path)?)
	}

	/// Executes `call` through the rate-limited, throttle-aware executor.
	pub fn execute<T>(&self, call: &Call<T>) -> Result<T>
	where
		T: Entity,
	{
		self.inner.proxy.execute(call)
	}

	/// Executes a full index call and returns its entries in server order.
	pub fn execute_index<I>(&self, call: &Call<I>) -> Result<Vec<IndexItem<I::Full>>>
	where
		I: FullIndex,
	{
		entity::unwrap_index(self.execute(call))
	}

	/// Executes a key index call and returns its permalinks in server order.
	pub fn execute_key_index<I>(&self, call: &Call<I>) -> Result<Vec<Key<I::Full>>>
	where
		I: KeyIndex,
	{
		entity::unwrap_key_index(self.execute(call))
	}

	/// Fetches and decodes the resource behind `permalink`.
	///
	/// The URL is used verbatim; only the credential and locale are added when missing. Results
	/// are never memoized, so every call is a separate round trip.
	pub fn resolve<T>(&self, permalink: &Url) -> Result<T>
	where
		T: Entity,
	{
		tracing::debug!(path = permalink.path(), "Resolving Battle.net permalink.");

		self.execute(&self.call_url(permalink.clone()))
	}

	/// Executes `call`, serving it from `cache` when possible.
	///
	/// Entries are keyed by the cache prefix plus the undecorated path and query, and stored as
	/// the raw JSON payload with the TTL the cache assigns to `T`. Values loaded from the cache
	/// are decoded with this client attached, like fresh responses.
	pub fn execute_cached<T>(&self, cache: &dyn EntityCache, call: &Call<T>) -> Result<T>
	where
		T: Entity,
	{
		let url = call.url();
		let key = format!("{}{}", cache.key_prefix(), &url[Position::BeforePath..]);

		if let Some(value) = cache.get(&key)? {
			tracing::debug!(key, "Battle.net entity served from cache.");

			if let Some(entity) = call.decoder().decode_value(url, value)? {
				return Ok(entity);
			}
		}

		let value = self.execute(&call.with_payload::<serde_json::Value>())?;
		let entity = call
			.decoder()
			.decode_value(url, value.clone())?
			.ok_or_else(|| Error::NoResponse { url: url.to_owned(), status: 200 })?;

		cache.set(&key, value, cache.entity_ttl(std::any::type_name::<T>()))?;

		Ok(entity)
	}

	/// Returns the cached credential, fetching one if none is cached yet.
	pub fn credential(&self) -> Result<Credential> {
		self.inner.token_cache.get()
	}

	/// Drops the cached credential; the next call fetches a new one.
	pub fn invalidate_token(&self) {
		self.inner.token_cache.invalidate();
	}

	/// World of Warcraft game-data endpoints.
	pub fn wow(&self) -> WowApi {
		WowApi::new(self.clone())
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.inner.base_url.as_str())
			.field("region", &self.inner.region)
			.field("locale", &self.inner.locale)
			.finish()
	}
}

struct ClientInner {
	base_url: Url,
	region: Region,
	locale: Locale,
	proxy: Arc<ApiProxy>,
	transport: Arc<dyn HttpTransport>,
	token_cache: Arc<TokenCache>,
}

/// Builder for [`Client`] values.
#[derive(Default)]
pub struct ClientBuilder {
	client_id: Option<ClientId>,
	client_secret: Option<ClientSecret>,
	region: Option<Region>,
	locale: Option<Locale>,
	base_url: Option<String>,
	oauth_url: Option<String>,
	proxy_config: ProxyConfig,
	rate_limiter: Option<Arc<dyn RateLimitPolicy>>,
	http_transport: Option<Arc<dyn HttpTransport>>,
}
impl ClientBuilder {
	/// Sets the application client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(ClientId::new(client_id.into()));

		self
	}

	/// Sets the application client secret.
	pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
		self.client_secret = Some(ClientSecret::new(client_secret.into()));

		self
	}

	/// Selects the region; defaults to the locale's region, or North America.
	pub fn region(mut self, region: Region) -> Self {
		self.region = Some(region);

		self
	}

	/// Selects the locale; defaults to the region's first supported locale.
	pub fn locale(mut self, locale: Locale) -> Self {
		self.locale = Some(locale);

		self
	}

	/// Overrides the API base URL derived from the region.
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());

		self
	}

	/// Overrides the token endpoint derived from the region.
	pub fn oauth_url(mut self, oauth_url: impl Into<String>) -> Self {
		self.oauth_url = Some(oauth_url.into());

		self
	}

	/// Overrides the executor configuration.
	pub fn proxy_config(mut self, proxy_config: ProxyConfig) -> Self {
		self.proxy_config = proxy_config;

		self
	}

	/// Replaces the token bucket built from [`ProxyConfig::requests_per_second`].
	pub fn rate_limiter(mut self, rate_limiter: Arc<dyn RateLimitPolicy>) -> Self {
		self.rate_limiter = Some(rate_limiter);

		self
	}

	/// Replaces the default reqwest transport.
	pub fn http_transport(mut self, http_transport: Arc<dyn HttpTransport>) -> Self {
		self.http_transport = Some(http_transport);

		self
	}

	/// Validates the configuration and assembles the client.
	pub fn build(self) -> Result<Client> {
		let client_id = self.client_id.ok_or(ConfigError::MissingClientId)?;
		let client_secret = self.client_secret.ok_or(ConfigError::MissingClientSecret)?;
		let (region, locale) = region::resolve_region_locale(self.region, self.locale)?;
		let base_url = parse_base_url(self.base_url.unwrap_or_else(|| region.api_base_url()))?;
		let token_url = parse_token_url(
			&self.oauth_url.unwrap_or_else(|| region.oauth_token_url()),
		)?;

		self.proxy_config.validate()?;

		let proxy = Arc::new(match self.rate_limiter {
			Some(rate_limiter) => ApiProxy::with_rate_limiter(self.proxy_config, rate_limiter)?,
			None => ApiProxy::new(self.proxy_config)?,
		});
		let http_transport: Arc<dyn HttpTransport> = match self.http_transport {
			Some(http_transport) => http_transport,
			None => Arc::new(ReqwestHttpClient::new()?),
		};
		let oauth =
			OAuthApi::new(proxy.clone(), http_transport.clone(), token_url, client_id, client_secret);
		let token_cache = Arc::new(TokenCache::new(Arc::new(oauth)));
		let decorator = Arc::new(RequestDecorator::new(token_cache.clone(), region, locale));
		let transport = Arc::new(DecoratedTransport::new(http_transport, decorator));

		tracing::debug!(%region, %locale, base_url = base_url.as_str(), "Battle.net client built.");

		Ok(Client {
			inner: Arc::new(ClientInner { base_url, region, locale, proxy, transport, token_cache }),
		})
	}
}
impl Debug for ClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientBuilder")
			.field("client_id", &self.client_id)
			.field("region", &self.region)
			.field("locale", &self.locale)
			.field("base_url", &self.base_url)
			.field("oauth_url", &self.oauth_url)
			.field("proxy_config", &self.proxy_config)
			.finish()
	}
}

/// Parses the base URL, making sure relative paths join below it.
fn parse_base_url(value: String) -> Result<Url, ConfigError> {
	let normalized = if value.ends_with('/') { value } else { format!("{value}/") };

	Url::parse(&normalized).map_err(|source| ConfigError::invalid_url(normalized.as_str(), source))
}
