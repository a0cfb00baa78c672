//! Rate limit policy consulted before every outbound call.

// std
use std::{num::NonZeroU32, thread};
// crates.io
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter, clock::Clock};
// self
use crate::{_prelude::*, error::ConfigError};

/// Strategy that blocks the calling thread until the next call may proceed.
///
/// One policy instance guards every call made by a client, including token requests, so
/// implementations must provide cross-thread mutual exclusion over their budget.
pub trait RateLimitPolicy
where
	Self: Send + Sync,
{
	/// Blocks until a permit is available and returns how long the caller waited.
	///
	/// Acquisition never fails; it can only delay.
	fn acquire(&self) -> Duration;
}

/// Token bucket issuing permits at a steady rate, backed by a GCRA limiter.
///
/// The burst is a single permit, so calls are spaced evenly by [`TokenBucket::interval`] rather
/// than released in clumps.
pub struct TokenBucket {
	interval: Duration,
	limiter: DefaultDirectRateLimiter,
}
impl TokenBucket {
	/// Default steady rate.
	pub const DEFAULT_PERMITS_PER_SECOND: f64 = 10.;

	/// Creates a bucket issuing `permits_per_second` permits.
	///
	/// Rates whose interval cannot be represented as a non-zero [`Duration`] are rejected.
	pub fn new(permits_per_second: f64) -> Result<Self, ConfigError> {
		let invalid = || ConfigError::InvalidRateLimit { value: permits_per_second };

		if !permits_per_second.is_finite() || permits_per_second <= 0. {
			return Err(invalid());
		}

		let interval = Duration::try_from_secs_f64(1. / permits_per_second).map_err(|_| invalid())?;
		let quota = Quota::with_period(interval).ok_or_else(invalid)?.allow_burst(NonZeroU32::MIN);

		Ok(Self { interval, limiter: RateLimiter::direct(quota) })
	}

	/// Interval between two permits at the steady rate.
	pub fn interval(&self) -> Duration {
		self.interval
	}
}
impl Default for TokenBucket {
	fn default() -> Self {
		let interval = Duration::from_millis(100);
		let quota = Quota::per_second(NonZeroU32::MIN.saturating_add(9));

		Self { interval, limiter: RateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)) }
	}
}
impl RateLimitPolicy for TokenBucket {
	fn acquire(&self) -> Duration {
		let mut waited = Duration::ZERO;

		while let Err(not_until) = self.limiter.check() {
			let wait = not_until.wait_time_from(self.limiter.clock().now());

			thread::sleep(wait);

			waited += wait;
		}

		waited
	}
}
impl Debug for TokenBucket {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenBucket").field("interval", &self.interval).finish()
	}
}

/// Policy that never waits; useful for tests and for callers that budget elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unlimited;
impl RateLimitPolicy for Unlimited {
	fn acquire(&self) -> Duration {
		Duration::ZERO
	}
}
