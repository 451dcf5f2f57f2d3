//! Session token wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Reasons a stored value could not be read as a session token.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum TokenParseError {
	/// Stored value is not valid JSON.
	#[error("Stored session token is not valid JSON.")]
	Malformed,
	/// Stored value is valid JSON but not a string (including `null`).
	#[error("Stored session token is not a JSON string.")]
	NotAString,
	/// Stored value decodes to an empty string.
	#[error("Stored session token is empty.")]
	Empty,
}

/// Opaque bearer credential identifying an authenticated session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);
impl SessionToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Decodes the JSON-encoded representation kept in session storage.
	pub fn parse_stored(raw: &str) -> Result<Self, TokenParseError> {
		let value: serde_json::Value =
			serde_json::from_str(raw).map_err(|_| TokenParseError::Malformed)?;
		let serde_json::Value::String(token) = value else {
			return Err(TokenParseError::NotAString);
		};

		if token.is_empty() {
			return Err(TokenParseError::Empty);
		}

		Ok(Self(token))
	}

	/// Encodes the token the way session storage expects to hold it.
	pub fn to_stored(&self) -> String {
		serde_json::Value::String(self.0.clone()).to_string()
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for SessionToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SessionToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SessionToken").field(&"<redacted>").finish()
	}
}
impl Display for SessionToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
