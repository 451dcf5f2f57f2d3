//! Transport primitives for dispatching signed requests.
//!
//! [`HttpTransport`] is the client's only dependency on an HTTP stack. The default
//! [`ReqwestTransport`] executes requests with a shared [`ReqwestClient`]; tests and
//! embedders can supply their own implementation to observe or fake traffic.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, config::ClientConfig, error::ConfigError};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a, E> = Pin<Box<dyn Future<Output = Result<Response, E>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of sending a fully built [`Request`].
///
/// Implementations must report failures through [`HttpTransport::Error`] without rewriting
/// them; the client forwards that error object to its caller unchanged.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type Error: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves to the server's response.
	fn execute(&self, request: Request) -> TransportFuture<'_, Self::Error>;

	/// Reqwest client requests should be built with, when the transport already owns one.
	///
	/// Returning `None` makes the client build a separate request builder.
	fn request_client(&self) -> Option<&ReqwestClient> {
		None
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring `config`; `with_credentials` enables the cookie jar.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().cookie_store(config.with_credentials).build()?;

		Ok(Self(client))
	}
}
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl HttpTransport for ReqwestTransport {
	type Error = ReqwestError;

	fn execute(&self, request: Request) -> TransportFuture<'_, Self::Error> {
		Box::pin(self.0.execute(request))
	}

	fn request_client(&self) -> Option<&ReqwestClient> {
		Some(&self.0)
	}
}
