//! Observability helpers for the dispatch core.
//!
//! Every dispatch runs inside a `battlenet.dispatch` span carrying the call path. Enable the
//! `metrics` feature to increment the `battlenet_dispatch_total` counter, labeled by `outcome`,
//! for each attempt result.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Outcome labels recorded for each executed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
	/// Decoded payload returned to the caller.
	Success,
	/// HTTP 429 observed; the call will be retried.
	Throttled,
	/// HTTP 429 observed and the retry budget is spent.
	Exhausted,
	/// Transport, decode, status, or empty-body failure.
	Failure,
}
impl DispatchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchOutcome::Success => "success",
			DispatchOutcome::Throttled => "throttled",
			DispatchOutcome::Exhausted => "exhausted",
			DispatchOutcome::Failure => "failure",
		}
	}
}
impl Display for DispatchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
