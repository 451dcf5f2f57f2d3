//! Pure bearer-header attachment applied to outgoing requests.

// self
use crate::{_prelude::*, auth::SessionToken};

/// Builds the `Bearer <token>` header value, flagged sensitive.
///
/// Returns `None` when the token contains bytes a header value cannot carry.
pub fn bearer_value(token: &SessionToken) -> Option<HeaderValue> {
	let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose())).ok()?;

	value.set_sensitive(true);

	Some(value)
}

/// Sets `Authorization: Bearer <token>` on `request` when a usable token is supplied.
///
/// An existing `Authorization` entry is replaced, never duplicated. Without a token (or with
/// one that cannot be encoded as a header) the request is returned unmodified.
pub fn attach_bearer(request: Request, token: Option<&SessionToken>) -> Request {
	match token.and_then(bearer_value) {
		Some(value) => with_authorization(request, value),
		None => request,
	}
}

/// Replaces the `Authorization` entry of `request` with `value`.
pub fn with_authorization(mut request: Request, value: HeaderValue) -> Request {
	request.headers_mut().insert(AUTHORIZATION, value);

	request
}
