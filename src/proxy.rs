//! Call executor: rate limiting, throttle retries, and response-to-result translation.
//!
//! [`ApiProxy::execute`] drives one logical call through a bounded attempt loop:
//!
//! 1. acquire a permit from the shared [`RateLimitPolicy`]
//! 2. execute the call; transport and decode failures end the chain immediately
//! 3. on HTTP 429, count the attempt and stop with [`Error::ThrottleRetriesExhausted`] once the
//!    count equals [`ProxyConfig::max_throttle_retries`]; otherwise sleep
//!    [`ProxyConfig::retry_interval`] and retry a clone of the call
//! 4. any other non-success status, or a missing body, yields [`Error::NoResponse`]
//!
//! With `max_throttle_retries = n`, a call that is throttled on every attempt is sent exactly `n`
//! times. Retry budgets are per call chain; concurrent calls never share them.

// std
use std::thread;
// self
use crate::{
	_prelude::*,
	call::Call,
	entity::Entity,
	error::ConfigError,
	ext::{RateLimitPolicy, TokenBucket},
	obs::{self, DispatchOutcome, DispatchSpan},
};

/// Tunables for [`ApiProxy`].
#[derive(Clone, Debug, PartialEq)]
pub struct ProxyConfig {
	/// Steady rate enforced by the default [`TokenBucket`].
	pub requests_per_second: f64,
	/// Number of throttled attempts after which a call gives up; must be at least 1.
	pub max_throttle_retries: u32,
	/// Fixed sleep between throttled attempts.
	pub retry_interval: Duration,
}
impl ProxyConfig {
	/// Default steady rate.
	pub const DEFAULT_REQUESTS_PER_SECOND: f64 = TokenBucket::DEFAULT_PERMITS_PER_SECOND;
	/// Default throttle retry budget.
	pub const DEFAULT_MAX_THROTTLE_RETRIES: u32 = 10;
	/// Default sleep between throttled attempts.
	pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(500);

	/// Overrides the steady rate.
	pub fn with_requests_per_second(mut self, rate: f64) -> Self {
		self.requests_per_second = rate;

		self
	}

	/// Overrides the throttle retry budget.
	pub fn with_max_throttle_retries(mut self, max: u32) -> Self {
		self.max_throttle_retries = max;

		self
	}

	/// Overrides the sleep between throttled attempts.
	pub fn with_retry_interval(mut self, interval: Duration) -> Self {
		self.retry_interval = interval;

		self
	}

	/// Checks the values the executor relies on.
	///
	/// The rate must yield a representable, non-zero interval between permits.
	pub fn validate(&self) -> Result<(), ConfigError> {
		TokenBucket::new(self.requests_per_second)?;

		if self.max_throttle_retries == 0 {
			return Err(ConfigError::ZeroThrottleRetries);
		}

		Ok(())
	}
}
impl Default for ProxyConfig {
	fn default() -> Self {
		Self {
			requests_per_second: Self::DEFAULT_REQUESTS_PER_SECOND,
			max_throttle_retries: Self::DEFAULT_MAX_THROTTLE_RETRIES,
			retry_interval: Self::DEFAULT_RETRY_INTERVAL,
		}
	}
}

/// Executes [`Call`]s under a shared rate limit with bounded throttle retries.
#[derive(Clone)]
pub struct ApiProxy {
	config: ProxyConfig,
	rate_limiter: Arc<dyn RateLimitPolicy>,
}
impl ApiProxy {
	/// Creates a proxy backed by a [`TokenBucket`] at the configured rate.
	pub fn new(config: ProxyConfig) -> Result<Self, ConfigError> {
		config.validate()?;

		let bucket = TokenBucket::new(config.requests_per_second)?;

		Ok(Self { config, rate_limiter: Arc::new(bucket) })
	}

	/// Creates a proxy that consults a caller-provided rate limit policy.
	///
	/// `config.requests_per_second` is ignored in favor of the policy.
	pub fn with_rate_limiter(
		config: ProxyConfig,
		rate_limiter: Arc<dyn RateLimitPolicy>,
	) -> Result<Self, ConfigError> {
		if config.max_throttle_retries == 0 {
			return Err(ConfigError::ZeroThrottleRetries);
		}

		Ok(Self { config, rate_limiter })
	}

	/// Active configuration.
	pub fn config(&self) -> &ProxyConfig {
		&self.config
	}

	/// Executes `call`, retrying on throttling, and returns the decoded payload.
	pub fn execute<T>(&self, call: &Call<T>) -> Result<T>
	where
		T: Entity,
	{
		let _span = DispatchSpan::new(call.request().method.as_str(), call.url()).entered();
		let max = self.config.max_throttle_retries;
		let mut attempt = 0_u32;

		loop {
			let waited = self.rate_limiter.acquire();
			let attempt_call = call.clone();
			let response = attempt_call.execute().inspect_err(|e| {
				tracing::error!(error = %e, "Battle.net API call failed.");
				obs::record_dispatch_outcome(DispatchOutcome::Failure);
			})?;

			tracing::debug!(
				path = attempt_call.url().path(),
				status = response.status,
				rate_limit_wait_ms = waited.as_secs_f64() * 1_000.,
				"Battle.net API call executed."
			);

			if response.is_throttled() {
				attempt += 1;

				tracing::warn!(attempt, max, "Battle.net is throttling requests.");

				if attempt == max {
					tracing::error!(attempt, "Maximum throttle retries hit; stopping.");
					obs::record_dispatch_outcome(DispatchOutcome::Exhausted);

					return Err(Error::ThrottleRetriesExhausted { attempts: attempt });
				}

				obs::record_dispatch_outcome(DispatchOutcome::Throttled);
				thread::sleep(self.config.retry_interval);

				continue;
			}

			return match response.body {
				Some(body) => {
					obs::record_dispatch_outcome(DispatchOutcome::Success);

					Ok(body)
				},
				None => {
					let err =
						Error::NoResponse { url: call.url().to_owned(), status: response.status };

					tracing::error!(status = response.status, "{err}");
					obs::record_dispatch_outcome(DispatchOutcome::Failure);

					Err(err)
				},
			};
		}
	}
}
impl Debug for ApiProxy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiProxy").field("config", &self.config).finish()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;
	use crate::{
		call::Decoder,
		ext::Unlimited,
		http::{ApiRequest, HttpTransport, RawResponse},
	};

	/// Transport replaying a fixed script of responses; the last entry repeats forever.
	pub(crate) struct ScriptedTransport {
		script: Mutex<VecDeque<Result<RawResponse>>>,
		last: RawResponse,
		requests: Mutex<Vec<ApiRequest>>,
		calls: AtomicUsize,
	}
	impl ScriptedTransport {
		pub(crate) fn new(
			script: impl IntoIterator<Item = RawResponse>,
			last: RawResponse,
		) -> Arc<Self> {
			Arc::new(Self {
				script: Mutex::new(script.into_iter().map(Ok).collect()),
				last,
				requests: Mutex::default(),
				calls: AtomicUsize::new(0),
			})
		}

		pub(crate) fn always(response: RawResponse) -> Arc<Self> {
			Self::new([], response)
		}

		pub(crate) fn failing_once(then: RawResponse) -> Arc<Self> {
			let transport = Self::always(then);
			let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
			let url = Url::parse("https://scripted.invalid/").expect("Scripted URL should parse.");

			transport.script.lock().push_back(Err(Error::transport(&url, io)));

			transport
		}

		pub(crate) fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}

		pub(crate) fn requests(&self) -> Vec<ApiRequest> {
			self.requests.lock().clone()
		}
	}
	impl HttpTransport for ScriptedTransport {
		fn send(&self, request: ApiRequest) -> Result<RawResponse> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.requests.lock().push(request);

			self.script.lock().pop_front().unwrap_or_else(|| Ok(self.last.clone()))
		}
	}

	#[derive(Debug, Deserialize, PartialEq)]
	struct Title {
		id: u64,
	}
	impl Entity for Title {}

	const TITLE: &str = r#"{"id": 90}"#;

	fn proxy(max_throttle_retries: u32) -> ApiProxy {
		let config = ProxyConfig::default()
			.with_max_throttle_retries(max_throttle_retries)
			.with_retry_interval(Duration::from_millis(1));

		ApiProxy::with_rate_limiter(config, Arc::new(Unlimited))
			.expect("Proxy configuration should be valid.")
	}

	fn call(transport: Arc<ScriptedTransport>) -> Call<Title> {
		let url = Url::parse("https://us.api.blizzard.com/data/wow/title/90")
			.expect("Test URL should parse.");

		Call::new(ApiRequest::get(url), transport, Decoder::detached())
	}

	fn throttled() -> RawResponse {
		RawResponse::new(429, Vec::new())
	}

	#[test]
	fn returns_decoded_payload() {
		let transport = ScriptedTransport::always(RawResponse::new(200, TITLE));
		let title = proxy(1).execute(&call(transport.clone())).expect("Call should succeed.");

		assert_eq!(title, Title { id: 90 });
		assert_eq!(transport.calls(), 1);
	}

	#[test]
	fn retries_throttled_calls_until_success() {
		for retries in 1..4 {
			let transport = ScriptedTransport::new(
				std::iter::repeat_with(throttled).take(retries),
				RawResponse::new(200, TITLE),
			);
			let title = proxy(4).execute(&call(transport.clone())).expect("Call should succeed.");

			assert_eq!(title, Title { id: 90 });
			assert_eq!(transport.calls(), retries + 1);
		}
	}

	#[test]
	fn stops_when_attempts_equal_the_maximum() {
		let transport = ScriptedTransport::always(throttled());
		let err = proxy(2).execute(&call(transport.clone())).expect_err("Call must give up.");

		assert_eq!(err.to_string(), "Maximum number of throttle retries hit");
		assert!(matches!(err, Error::ThrottleRetriesExhausted { attempts: 2 }));
		assert_eq!(transport.calls(), 2);
	}

	#[test]
	fn single_retry_budget_sends_exactly_once() {
		let transport = ScriptedTransport::always(throttled());
		let err = proxy(1).execute(&call(transport.clone())).expect_err("Call must give up.");

		assert!(err.is_throttled());
		assert_eq!(transport.calls(), 1);
	}

	#[test]
	fn throttled_one_short_of_the_maximum_still_succeeds() {
		let transport = ScriptedTransport::new(
			std::iter::repeat_with(throttled).take(9),
			RawResponse::new(200, TITLE),
		);
		let title = proxy(10).execute(&call(transport.clone())).expect("Call should succeed.");

		assert_eq!(title.id, 90);
		assert_eq!(transport.calls(), 10);
	}

	#[test]
	fn null_body_is_a_failure_naming_the_url() {
		let transport = ScriptedTransport::always(RawResponse::new(200, "null"));
		let err = proxy(1).execute(&call(transport)).expect_err("Null body must fail.");

		assert!(matches!(err, Error::NoResponse { status: 200, .. }));
		assert_eq!(
			err.to_string(),
			"Unable to get an API response from Battle.net: https://us.api.blizzard.com/data/wow/title/90"
		);
	}

	#[test]
	fn non_success_status_is_a_failure() {
		let transport = ScriptedTransport::always(RawResponse::new(404, r#"{"code": 404}"#));
		let err = proxy(3).execute(&call(transport.clone())).expect_err("404 must fail.");

		assert!(matches!(err, Error::NoResponse { status: 404, .. }));
		assert_eq!(transport.calls(), 1);
	}

	#[test]
	fn transport_failures_are_not_retried() {
		let transport = ScriptedTransport::failing_once(RawResponse::new(200, TITLE));
		let err = proxy(3).execute(&call(transport.clone())).expect_err("Transport must fail.");

		assert!(matches!(err, Error::Transport { .. }));
		assert_eq!(transport.calls(), 1);
	}

	#[test]
	fn decode_failures_are_not_retried() {
		let transport = ScriptedTransport::always(RawResponse::new(200, r#"{"id": "ninety"}"#));
		let err = proxy(3).execute(&call(transport.clone())).expect_err("Decode must fail.");

		assert!(matches!(err, Error::Decode { .. }));
		assert_eq!(transport.calls(), 1);
	}

	#[test]
	fn concurrent_calls_have_independent_budgets() {
		let proxy = Arc::new(proxy(3));
		let handles = (0..4)
			.map(|_| {
				let proxy = proxy.clone();

				thread::spawn(move || {
					let transport = ScriptedTransport::new(
						std::iter::repeat_with(throttled).take(2),
						RawResponse::new(200, TITLE),
					);

					proxy.execute(&call(transport)).map(|title| title.id)
				})
			})
			.collect::<Vec<_>>();

		for handle in handles {
			let id = handle
				.join()
				.expect("Executing thread should not panic.")
				.expect("Every chain should succeed within its own budget.");

			assert_eq!(id, 90);
		}
	}

	#[test]
	fn rejects_zero_retry_budget() {
		let config = ProxyConfig::default().with_max_throttle_retries(0);

		assert!(matches!(ApiProxy::new(config), Err(ConfigError::ZeroThrottleRetries)));
	}

	#[test]
	fn rates_without_a_representable_interval_are_rejected() {
		for rate in [1e-300, 1e300] {
			let config = ProxyConfig::default().with_requests_per_second(rate);

			assert!(matches!(config.validate(), Err(ConfigError::InvalidRateLimit { .. })));
			assert!(matches!(ApiProxy::new(config), Err(ConfigError::InvalidRateLimit { .. })));
		}
	}

	#[test]
	fn defaults_match_documented_values() {
		let config = ProxyConfig::default();

		assert_eq!(config.requests_per_second, 10.);
		assert_eq!(config.max_throttle_retries, 10);
		assert_eq!(config.retry_interval, Duration::from_millis(500));
	}
}
