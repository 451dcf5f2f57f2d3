//! Client-level error types shared across configuration, storage, and transport.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure raised by an explicit store write.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::session::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Request construction failed before anything was sent.
	#[error(transparent)]
	Request(ReqwestError),
	/// The transport rejected the request; the original error is preserved as the source.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than HTTP(S) or cannot carry paths.
	#[error("Base URL must be an http(s) URL that can carry paths: {url}.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Request path could not be joined onto the base URL.
	#[error("Request path `{path}` does not resolve to a valid URL.")]
	InvalidPath {
		/// Path supplied by the caller.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport rejection carrying the transport's own error object unchanged.
#[derive(Debug, ThisError)]
#[error(transparent)]
pub struct TransportError(BoxError);
impl TransportError {
	/// Wraps a transport-specific error.
	pub fn new(src: impl 'static + Send + Sync + StdError) -> Self {
		Self(Box::new(src))
	}

	/// Borrows the original error when it has the requested concrete type.
	pub fn downcast_ref<E>(&self) -> Option<&E>
	where
		E: 'static + StdError,
	{
		self.0.downcast_ref::<E>()
	}

	/// Returns the boxed original error.
	pub fn into_inner(self) -> BoxError {
		self.0
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, ThisError)]
	#[error("Connection reset by peer.")]
	struct ResetError;

	#[test]
	fn transport_error_keeps_original() {
		let err: Error = TransportError::new(ResetError).into();

		assert_eq!(err.to_string(), "Connection reset by peer.");

		let Error::Transport(inner) = err else { panic!("Expected a transport error.") };

		assert!(inner.downcast_ref::<ResetError>().is_some());
		assert!(inner.into_inner().downcast::<ResetError>().is_ok());
	}

	#[test]
	fn store_error_converts_with_source() {
		let store_error =
			crate::session::StoreError::Backend { message: "disk unavailable".into() };
		let err: Error = store_error.into();

		assert!(matches!(err, Error::Storage(_)));
		assert!(err.to_string().contains("disk unavailable"));
		assert!(StdError::source(&err).is_some());
	}
}
