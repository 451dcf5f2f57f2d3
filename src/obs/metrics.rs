// self
use crate::obs::TokenOutcome;

/// Counts a token lookup via the global metrics recorder (when enabled).
pub fn count_token_outcome(outcome: TokenOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("session_bearer_token_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
