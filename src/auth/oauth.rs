//! Client-credentials token call, dispatched through the same executor as API calls.

// crates.io
use oauth2::{ClientId, ClientSecret};
// self
use crate::{
	_prelude::*,
	auth::Credential,
	call::{Call, Decoder},
	error::ConfigError,
	http::{ApiRequest, BasicAuth, HttpTransport},
	proxy::ApiProxy,
};

/// Issues credentials from the token endpoint using HTTP Basic client authentication.
///
/// The token call uses the undecorated transport (it must not carry a bearer token itself) but
/// still goes through [`ApiProxy`], so it shares the rate limit and throttle handling.
#[derive(Clone)]
pub struct OAuthApi {
	proxy: Arc<ApiProxy>,
	transport: Arc<dyn HttpTransport>,
	token_url: Url,
	auth: BasicAuth,
}
impl OAuthApi {
	/// Grant requested from the token endpoint.
	pub const GRANT_TYPE: &'static str = "client_credentials";

	/// Creates the token API for `token_url`.
	pub fn new(
		proxy: Arc<ApiProxy>,
		transport: Arc<dyn HttpTransport>,
		token_url: Url,
		client_id: ClientId,
		client_secret: ClientSecret,
	) -> Self {
		Self { proxy, transport, token_url, auth: BasicAuth::new(client_id, client_secret) }
	}

	/// Token endpoint without query parameters.
	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	/// Builds the token call.
	pub fn token_call(&self) -> Call<Credential> {
		let mut url = self.token_url.clone();

		url.query_pairs_mut().append_pair("grant_type", Self::GRANT_TYPE);

		let request = ApiRequest::post(url).with_basic_auth(self.auth.clone());

		Call::new(request, self.transport.clone(), Decoder::detached())
	}

	/// Requests a new credential.
	pub fn request_token(&self) -> Result<Credential> {
		let credential = self.proxy.execute(&self.token_call())?;

		tracing::info!(
			token_type = %credential.token_type,
			expires_in = credential.expires_in,
			"Obtained Battle.net OAuth credential."
		);

		Ok(credential)
	}
}
impl Debug for OAuthApi {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthApi")
			.field("token_url", &self.token_url.as_str())
			.field("client_id", &self.auth.client_id.as_str())
			.finish()
	}
}

/// Parses a token endpoint URL.
pub(crate) fn parse_token_url(value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::invalid_url(value, source))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		ext::Unlimited,
		http::{Method, RawResponse},
		proxy::{ProxyConfig, tests::ScriptedTransport},
	};

	fn oauth(transport: Arc<ScriptedTransport>) -> OAuthApi {
		let proxy = ApiProxy::with_rate_limiter(
			ProxyConfig::default().with_retry_interval(Duration::from_millis(1)),
			Arc::new(Unlimited),
		)
		.expect("Proxy configuration should be valid.");

		OAuthApi::new(
			Arc::new(proxy),
			transport,
			parse_token_url("https://eu.battle.net/oauth/token").expect("Token URL should parse."),
			ClientId::new("client-id".into()),
			ClientSecret::new("client-secret".into()),
		)
	}

	#[test]
	fn token_call_posts_client_credentials_grant_with_basic_auth() {
		let transport = ScriptedTransport::always(RawResponse::new(
			200,
			r#"{"access_token": "issued", "token_type": "bearer", "expires_in": 86399}"#,
		));
		let credential = oauth(transport.clone()).request_token().expect("Token call should succeed.");
		let requests = transport.requests();

		assert_eq!(credential.secret(), "issued");
		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].method, Method::Post);
		assert_eq!(
			requests[0].url.as_str(),
			"https://eu.battle.net/oauth/token?grant_type=client_credentials"
		);

		let auth = requests[0].basic_auth.as_ref().expect("Token call must carry Basic auth.");

		assert_eq!(auth.client_id.as_str(), "client-id");
		assert_eq!(auth.client_secret.secret(), "client-secret");
	}

	#[test]
	fn token_call_is_retried_when_throttled() {
		let transport = ScriptedTransport::new(
			[RawResponse::new(429, Vec::new())],
			RawResponse::new(200, r#"{"access_token": "issued", "token_type": "bearer"}"#),
		);
		let credential = oauth(transport.clone()).request_token().expect("Token call should succeed.");

		assert_eq!(credential.secret(), "issued");
		assert_eq!(transport.calls(), 2);
	}

	#[test]
	fn rejected_client_is_a_failure() {
		let transport = ScriptedTransport::always(RawResponse::new(
			401,
			r#"{"error": "unauthorized", "error_description": "Bad client credentials"}"#,
		));
		let err = oauth(transport).request_token().expect_err("401 must fail.");

		assert!(matches!(err, Error::NoResponse { status: 401, .. }));
	}
}
