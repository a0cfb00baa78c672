// self
use crate::_prelude::*;

/// Span wrapping every attempt chain of one logical call.
#[derive(Clone, Debug)]
pub struct DispatchSpan {
	span: tracing::Span,
}
impl DispatchSpan {
	/// Creates a span tagged with the call method and path.
	///
	/// Only the path is recorded; query strings may carry credentials.
	pub fn new(method: &'static str, url: &Url) -> Self {
		let span = tracing::info_span!("battlenet.dispatch", method, path = url.path());

		Self { span }
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> DispatchSpanGuard {
		DispatchSpanGuard { _guard: self.span.entered() }
	}
}

/// RAII guard returned by [`DispatchSpan::entered`].
pub struct DispatchSpanGuard {
	_guard: tracing::span::EnteredSpan,
}
impl Debug for DispatchSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("DispatchSpanGuard(..)")
	}
}
