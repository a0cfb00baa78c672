//! Request decoration applied to every game-data call.
//!
//! Decoration runs in a fixed order, each step leaving caller-supplied values alone:
//!
//! 1. `access_token`: added from the cached credential when absent; the token endpoint is only
//!    consulted when the parameter is missing
//! 2. `namespace`: when absent and an `addNamespace` placeholder names a known namespace, the
//!    placeholder is replaced by `namespace=<namespace>-<region>`
//! 3. `locale`: added from the client configuration when absent
//!
//! Every step adds at most one value and never duplicates an existing key.

// self
use crate::{
	_prelude::*,
	auth::TokenCache,
	http::{ApiRequest, HttpTransport, RawResponse},
	region::{Locale, Namespace, Region},
};

/// Query parameter carrying the bearer token.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";
/// Placeholder parameter naming an unqualified namespace.
pub const ADD_NAMESPACE_PARAM: &str = "addNamespace";
/// Query parameter carrying the region-qualified namespace.
pub const NAMESPACE_PARAM: &str = "namespace";
/// Query parameter carrying the response locale.
pub const LOCALE_PARAM: &str = "locale";

/// Rewrites outbound requests with credentials, namespace, and locale.
#[derive(Debug)]
pub struct RequestDecorator {
	token_cache: Arc<TokenCache>,
	region: Region,
	locale: Locale,
}
impl RequestDecorator {
	/// Creates a decorator for `region` and `locale`, drawing tokens from `token_cache`.
	pub fn new(token_cache: Arc<TokenCache>, region: Region, locale: Locale) -> Self {
		Self { token_cache, region, locale }
	}

	/// Credential cache consulted for `access_token`.
	pub fn token_cache(&self) -> &Arc<TokenCache> {
		&self.token_cache
	}

	/// Applies every decoration step to `request`.
	pub fn decorate(&self, request: ApiRequest) -> Result<ApiRequest> {
		let request = self.with_access_token(request)?;
		let request = self.with_namespace(request);

		Ok(self.with_locale(request))
	}

	fn with_access_token(&self, mut request: ApiRequest) -> Result<ApiRequest> {
		if request.has_query_param(ACCESS_TOKEN_PARAM) {
			return Ok(request);
		}

		let credential = self.token_cache.get()?;

		request.url.query_pairs_mut().append_pair(ACCESS_TOKEN_PARAM, credential.secret());

		Ok(request)
	}

	fn with_namespace(&self, mut request: ApiRequest) -> ApiRequest {
		if request.has_query_param(NAMESPACE_PARAM) {
			return request;
		}

		let Some(namespace) = request
			.query_param(ADD_NAMESPACE_PARAM)
			.and_then(|placeholder| placeholder.parse::<Namespace>().ok())
		else {
			return request;
		};
		let kept = request
			.url
			.query_pairs()
			.filter(|(key, _)| key != ADD_NAMESPACE_PARAM)
			.map(|(key, value)| (key.into_owned(), value.into_owned()))
			.collect::<Vec<_>>();

		request
			.url
			.query_pairs_mut()
			.clear()
			.extend_pairs(kept)
			.append_pair(NAMESPACE_PARAM, &namespace.qualified(self.region));

		request
	}

	fn with_locale(&self, mut request: ApiRequest) -> ApiRequest {
		if !request.has_query_param(LOCALE_PARAM) {
			request.url.query_pairs_mut().append_pair(LOCALE_PARAM, self.locale.as_str());
		}

		request
	}
}

/// Transport that decorates each request before handing it to the wrapped transport.
pub struct DecoratedTransport {
	inner: Arc<dyn HttpTransport>,
	decorator: Arc<RequestDecorator>,
}
impl DecoratedTransport {
	/// Wraps `inner` with `decorator`.
	pub fn new(inner: Arc<dyn HttpTransport>, decorator: Arc<RequestDecorator>) -> Self {
		Self { inner, decorator }
	}
}
impl HttpTransport for DecoratedTransport {
	/// Transport failures report the undecorated URL.
	fn send(&self, request: ApiRequest) -> Result<RawResponse> {
		let url = request.url.clone();
		let decorated = self.decorator.decorate(request)?;

		self.inner.send(decorated).map_err(|e| match e {
			Error::Transport { source, .. } => Error::Transport { url, source },
			e => e,
		})
	}
}
impl Debug for DecoratedTransport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DecoratedTransport").field("decorator", &self.decorator).finish()
	}
}
