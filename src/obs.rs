//! Optional observability helpers for broker flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to run each flow inside an `oauth1_broker.flow` span with
//!   the `flow` and `stage` fields, plus a `warn` event on failure. Secrets never reach spans or
//!   events.
//! - Enable `metrics` to increment the `oauth1_broker_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Broker operations observed by the obs layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Leg 1: temporary credential request.
	RequestToken,
	/// Leg 2: verifier exchange for the access pair.
	AccessToken,
	/// Signed resource call with an access pair.
	ApiCall,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::RequestToken => "request_token",
			FlowKind::AccessToken => "access_token",
			FlowKind::ApiCall => "api_call",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a broker operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records the terminal outcome of a flow: metrics counter plus a log event.
pub fn record_result<T>(kind: FlowKind, result: &Result<T>) {
	match result {
		Ok(_) => {
			record_flow_outcome(kind, FlowOutcome::Success);
			trace_success(kind);
		},
		Err(err) => {
			record_flow_outcome(kind, FlowOutcome::Failure);
			trace_failure(kind, err);
		},
	}
}
