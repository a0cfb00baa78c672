//! Client-level error types shared by the dispatch core, the token cache, and the resolvers.

// self
use crate::{_prelude::*, ext::CacheError, region::{Locale, Region}};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical failure returned by every dispatch operation.
///
/// The [`Display`] output of each variant is the human-readable diagnostic surfaced to callers.
/// URLs carried by the variants are the undecorated call targets, so bearer tokens never leak
/// into diagnostics or logs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The OAuth credential could not be obtained.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Failure raised by a consumer-supplied entity cache.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		CacheError,
	),

	/// Network or I/O failure while executing a call; never retried.
	#[error("Error retrieving valid response from Battle.net. url={url}, exception={source}")]
	Transport {
		/// Target of the failed call.
		url: Url,
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// Response payload could not be decoded into the expected type; never retried.
	#[error("Error decoding response from Battle.net. url={url}, exception={source}")]
	Decode {
		/// Target of the failed call.
		url: Url,
		/// Structured decoding failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The API kept answering with HTTP 429 until the retry budget ran out.
	#[error("Maximum number of throttle retries hit")]
	ThrottleRetriesExhausted {
		/// Number of throttled attempts observed.
		attempts: u32,
	},
	/// Non-success status, or a success status without a body.
	#[error("Unable to get an API response from Battle.net: {url}")]
	NoResponse {
		/// Target of the failed call.
		url: Url,
		/// HTTP status code returned by the API.
		status: u16,
	},
	/// A lazy resource was resolved without an owning client attached.
	#[error("Entity was decoded without an owning client and cannot be resolved.")]
	Detached,
}
impl Error {
	/// Wraps a transport failure together with the call target.
	pub fn transport(url: &Url, src: impl Into<TransportError>) -> Self {
		Self::Transport { url: url.to_owned(), source: src.into() }
	}

	/// Whether this error is the throttle-exhaustion failure.
	pub fn is_throttled(&self) -> bool {
		matches!(self, Self::ThrottleRetriesExhausted { .. })
	}
}

/// Construction and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured URL cannot be parsed or joined.
	#[error("URL `{value}` is invalid.")]
	InvalidUrl {
		/// Offending input.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},

	/// No client identifier was supplied.
	#[error("Client identifier is required.")]
	MissingClientId,
	/// No client secret was supplied.
	#[error("Client secret is required.")]
	MissingClientSecret,
	/// The requested locale is not served by the requested region.
	#[error("Locale {locale} is not supported by region {region}.")]
	LocaleNotInRegion {
		/// Requested locale.
		locale: Locale,
		/// Requested region.
		region: Region,
	},
	/// A region, locale, or namespace label is unknown.
	#[error("Unknown {kind} `{value}`.")]
	UnknownLabel {
		/// Kind of label being parsed.
		kind: &'static str,
		/// Offending input.
		value: String,
	},
	/// Rate limit must be a finite, positive number of requests per second.
	#[error("Rate limit must be a positive number of requests per second, got {value}.")]
	InvalidRateLimit {
		/// Offending rate.
		value: f64,
	},
	/// Throttle retries must allow at least one attempt.
	#[error("Maximum throttle retries must be at least 1.")]
	ZeroThrottleRetries,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_url(value: impl Into<String>, source: url::ParseError) -> Self {
		Self::InvalidUrl { value: value.into(), source }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Credential bootstrap failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The token endpoint call failed; the underlying dispatch error is attached.
	#[error("Unable to obtain an OAuth access token from Battle.net: {source}")]
	TokenRequest {
		/// Failure returned by the token call.
		#[source]
		source: Box<Error>,
	},
}
impl AuthError {
	pub(crate) fn token_request(source: Error) -> Self {
		Self::TokenRequest { source: Box::new(source) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("{source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
