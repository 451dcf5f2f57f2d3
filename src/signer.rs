//! Pre-send hooks that attach credentials to outbound requests.

// self
use crate::{
	_prelude::*,
	auth::{self, SessionToken, TokenParseError},
	config::DEFAULT_TOKEN_KEY,
	obs::{self, TokenOutcome},
	session::SessionStore,
};

/// Pipeline stage applied to every request right before it reaches the transport.
///
/// An error returned here aborts the call before anything is sent and is surfaced to the
/// caller as-is.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Consumes the request and returns it with authorization state applied.
	fn sign(&self, request: Request) -> Result<Request>;
}

/// Signer that leaves requests untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSigner;
impl RequestSigner for NoopSigner {
	fn sign(&self, request: Request) -> Result<Request> {
		Ok(request)
	}
}

/// Reads the session token from a [`SessionStore`] on every call and attaches it as a bearer
/// header. Missing, unreadable, or malformed tokens leave the request unsigned.
#[derive(Clone)]
pub struct SessionBearerSigner {
	store: Arc<dyn SessionStore>,
	key: String,
}
impl SessionBearerSigner {
	/// Signs with the token stored under [`DEFAULT_TOKEN_KEY`].
	pub fn new(store: Arc<dyn SessionStore>) -> Self {
		Self::with_key(store, DEFAULT_TOKEN_KEY)
	}

	/// Signs with the token stored under `key`.
	pub fn with_key(store: Arc<dyn SessionStore>, key: impl Into<String>) -> Self {
		Self { store, key: key.into() }
	}

	/// Session store key this signer reads.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Current session token, or `None` when no usable token is stored.
	///
	/// A token that cannot be carried in a header counts as unusable.
	pub fn token(&self) -> Option<SessionToken> {
		self.lookup().ok().map(|(token, _)| token)
	}

	fn lookup(&self) -> Result<(SessionToken, HeaderValue), TokenOutcome> {
		let raw = self
			.store
			.get(&self.key)
			.map_err(|_| TokenOutcome::Unreadable)?
			.ok_or(TokenOutcome::Absent)?;
		let token = SessionToken::parse_stored(&raw).map_err(|e| match e {
			TokenParseError::Empty => TokenOutcome::Absent,
			TokenParseError::Malformed | TokenParseError::NotAString => TokenOutcome::Malformed,
		})?;
		let value = auth::bearer_value(&token).ok_or(TokenOutcome::Malformed)?;

		Ok((token, value))
	}
}
impl Debug for SessionBearerSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionBearerSigner").field("key", &self.key).finish_non_exhaustive()
	}
}
impl RequestSigner for SessionBearerSigner {
	fn sign(&self, request: Request) -> Result<Request> {
		match self.lookup() {
			Ok((_, value)) => {
				obs::record_token_outcome(TokenOutcome::Attached);

				Ok(auth::with_authorization(request, value))
			},
			Err(outcome) => {
				obs::record_token_outcome(outcome);

				Ok(request)
			},
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::session::{MemorySessionStore, StoreError};

	struct BrokenStore;
	impl SessionStore for BrokenStore {
		fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
			Err(StoreError::Backend { message: "storage disabled".into() })
		}

		fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
			Err(StoreError::Backend { message: "storage disabled".into() })
		}

		fn remove(&self, _key: &str) -> Result<Option<String>, StoreError> {
			Err(StoreError::Backend { message: "storage disabled".into() })
		}
	}

	fn request() -> Request {
		Request::new(
			Method::POST,
			Url::parse("https://api.example.com/enroll").expect("Fixture URL should parse."),
		)
	}

	fn signer_with(raw: Option<&str>) -> SessionBearerSigner {
		let store = MemorySessionStore::default();

		if let Some(value) = raw {
			store.set(DEFAULT_TOKEN_KEY, value.into()).expect("Memory store set should succeed.");
		}

		SessionBearerSigner::new(Arc::new(store))
	}

	fn authorization(signer: &SessionBearerSigner) -> Option<String> {
		let signed = signer.sign(request()).expect("Signing must never fail.");

		signed
			.headers()
			.get(AUTHORIZATION)
			.map(|v| v.to_str().expect("Header should be ASCII.").to_owned())
	}

	#[test]
	fn stored_token_becomes_bearer_header() {
		assert_eq!(
			authorization(&signer_with(Some("\"abc123\""))).as_deref(),
			Some("Bearer abc123")
		);
	}

	#[test]
	fn unusable_values_are_treated_as_absent() {
		for raw in [None, Some("\"\""), Some("{not json"), Some("null"), Some("\"a\\nb\"")] {
			assert_eq!(authorization(&signer_with(raw)), None, "raw value {raw:?}");
		}
	}

	#[test]
	fn lookup_classifies_each_stored_value() {
		let cases = [
			(None, TokenOutcome::Absent),
			(Some("\"\""), TokenOutcome::Absent),
			(Some("{x"), TokenOutcome::Malformed),
			(Some("null"), TokenOutcome::Malformed),
			(Some("7"), TokenOutcome::Malformed),
			(Some("\"line\\nbreak\""), TokenOutcome::Malformed),
		];

		for (raw, expected) in cases {
			let outcome = signer_with(raw).lookup().map(|(token, _)| token);

			assert_eq!(outcome, Err(expected), "raw value {raw:?}");
		}

		assert_eq!(
			SessionBearerSigner::new(Arc::new(BrokenStore)).lookup().map(|(token, _)| token),
			Err(TokenOutcome::Unreadable)
		);
	}

	#[test]
	fn lookup_builds_the_sensitive_header_value() {
		let (token, value) =
			signer_with(Some("\"abc123\"")).lookup().expect("Stored token should be usable.");

		assert_eq!(token.expose(), "abc123");
		assert_eq!(value, "Bearer abc123");
		assert!(value.is_sensitive());
	}

	#[test]
	fn unencodable_token_is_not_reported_as_usable() {
		let signer = signer_with(Some("\"line\\nbreak\""));

		assert!(signer.token().is_none());
		assert_eq!(authorization(&signer), None);
	}

	#[test]
	fn store_failures_are_treated_as_absent() {
		let signer = SessionBearerSigner::new(Arc::new(BrokenStore));

		assert!(signer.token().is_none());
		assert_eq!(authorization(&signer), None);
	}

	#[test]
	fn custom_key_is_honored() {
		let store =
			MemorySessionStore::with_entries([("jwt", "\"k-1\""), ("accessToken", "\"x\"")]);
		let signer = SessionBearerSigner::with_key(Arc::new(store), "jwt");

		assert_eq!(signer.key(), "jwt");
		assert_eq!(authorization(&signer).as_deref(), Some("Bearer k-1"));
	}

	#[test]
	fn token_is_read_fresh_for_every_request() {
		let store = MemorySessionStore::default();
		let signer = SessionBearerSigner::new(Arc::new(store.clone()));

		assert_eq!(authorization(&signer), None);

		store.set(DEFAULT_TOKEN_KEY, SessionToken::new("late").to_stored()).expect("Set failed.");

		assert_eq!(authorization(&signer).as_deref(), Some("Bearer late"));

		store.remove(DEFAULT_TOKEN_KEY).expect("Remove failed.");

		assert_eq!(authorization(&signer), None);
	}

	#[test]
	fn debug_output_hides_store_contents() {
		let rendered = format!("{:?}", signer_with(Some("\"abc123\"")));

		assert!(!rendered.contains("abc123"));
		assert!(rendered.contains("accessToken"));
	}
}
