// self
use crate::{_prelude::*, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by broker flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind, stage, and provider name.
	pub fn new(kind: FlowKind, stage: &'static str, provider: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("oauth1_broker.flow", flow = kind.as_str(), stage, provider);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage, provider);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event for a completed flow.
pub fn trace_success(kind: FlowKind) {
	#[cfg(feature = "tracing")]
	tracing::debug!(flow = kind.as_str(), "OAuth flow completed.");

	#[cfg(not(feature = "tracing"))]
	let _ = kind;
}

/// Emits a `warn` event for a failed flow. Error displays never include secrets.
pub fn trace_failure(kind: FlowKind, err: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(flow = kind.as_str(), class = ?err.class(), error = %err, "OAuth flow failed.");

	#[cfg(not(feature = "tracing"))]
	let _ = (kind, err);
}
