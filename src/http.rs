//! Transport primitives for API and token calls.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. The default
//! [`ReqwestHttpClient`] wraps a blocking reqwest client; tests and downstream crates can plug in
//! their own implementation through [`ClientBuilder::http_transport`](crate::client::ClientBuilder::http_transport).

// std
use std::ops::Deref;
// crates.io
use oauth2::{ClientId, ClientSecret};
use reqwest::Method as ReqwestMethod;
// self
use crate::_prelude::*;

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`, used by every game-data endpoint.
	Get,
	/// `POST`, used by the token endpoint.
	Post,
}
impl Method {
	/// Returns the wire name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// HTTP Basic credentials sent to the token endpoint.
#[derive(Clone, Debug)]
pub struct BasicAuth {
	/// Application client identifier.
	pub client_id: ClientId,
	/// Application client secret; redacted in `Debug`.
	pub client_secret: ClientSecret,
}
impl BasicAuth {
	/// Creates a credential pair.
	pub fn new(client_id: ClientId, client_secret: ClientSecret) -> Self {
		Self { client_id, client_secret }
	}
}

/// One outbound HTTP operation.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// Request method.
	pub method: Method,
	/// Fully-qualified target, including query parameters.
	pub url: Url,
	/// Optional Basic credentials.
	pub basic_auth: Option<BasicAuth>,
}
impl ApiRequest {
	/// Creates a `GET` request.
	pub fn get(url: Url) -> Self {
		Self { method: Method::Get, url, basic_auth: None }
	}

	/// Creates a `POST` request.
	pub fn post(url: Url) -> Self {
		Self { method: Method::Post, url, basic_auth: None }
	}

	/// Attaches Basic credentials.
	pub fn with_basic_auth(mut self, auth: BasicAuth) -> Self {
		self.basic_auth = Some(auth);

		self
	}

	/// Returns the first value of a query parameter, if present.
	pub fn query_param(&self, name: &str) -> Option<String> {
		self.url.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
	}

	/// Whether the URL carries a query parameter named `name`.
	pub fn has_query_param(&self, name: &str) -> bool {
		self.url.query_pairs().any(|(key, _)| key == name)
	}
}

/// Raw HTTP response before decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Status code reported by the API when it throttles a caller.
	pub const TOO_MANY_REQUESTS: u16 = 429;

	/// Creates a response from its parts.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Whether the API signaled throttling.
	pub fn is_throttled(&self) -> bool {
		self.status == Self::TOO_MANY_REQUESTS
	}
}

/// Blocking HTTP transport shared by every call a client makes.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can serve concurrent
/// callers. Failures to reach the server must be reported as [`Error::Transport`]; any HTTP
/// status, including 429 and 5xx, is a successful transport outcome.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the raw response.
	fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// Thin wrapper around the blocking [`ReqwestClient`].
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds a client with reqwest defaults.
	pub fn new() -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}

	/// Wraps an existing blocking reqwest client.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl HttpTransport for ReqwestHttpClient {
	fn send(&self, request: ApiRequest) -> Result<RawResponse> {
		let method = match request.method {
			Method::Get => ReqwestMethod::GET,
			Method::Post => ReqwestMethod::POST,
		};
		let mut builder = self.0.request(method, request.url.clone());

		if let Some(auth) = &request.basic_auth {
			builder = builder
				.basic_auth(auth.client_id.as_str(), Some(auth.client_secret.secret().as_str()));
		}

		// reqwest errors embed the request URL, which carries the access token.
		let response =
			builder.send().map_err(|e| Error::transport(&request.url, e.without_url()))?;
		let status = response.status().as_u16();
		let body =
			response.bytes().map_err(|e| Error::transport(&request.url, e.without_url()))?;

		Ok(RawResponse::new(status, body.to_vec()))
	}
}
