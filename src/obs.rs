//! Optional observability hooks for signing and dispatch.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each dispatch in a `session_bearer.request` span carrying the
//!   `method` and `stage` fields, and to emit a `debug` event per token lookup (the token value
//!   itself is never recorded).
//! - Enable `metrics` to increment the `session_bearer_token_total` counter for every lookup,
//!   labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Result of looking up the session token for one outgoing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenOutcome {
	/// A bearer header was attached.
	Attached,
	/// No token was stored (or it was an empty string).
	Absent,
	/// The stored value could not be decoded or encoded as a header.
	Malformed,
	/// The store itself failed to answer.
	Unreadable,
}
impl TokenOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenOutcome::Attached => "attached",
			TokenOutcome::Absent => "absent",
			TokenOutcome::Malformed => "malformed",
			TokenOutcome::Unreadable => "unreadable",
		}
	}
}
impl Display for TokenOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records a token lookup through every enabled backend.
pub fn record_token_outcome(outcome: TokenOutcome) {
	trace_token_outcome(outcome);
	count_token_outcome(outcome);
}
