//! Bearer-authenticated HTTP client: every request is signed with the session token found in
//! an injected session store, resolved against a fixed base URL, and handed to a pluggable
//! transport whose failures reach the caller untouched.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod session;
pub mod signer;

pub use client::{AuthClient, RequestBuilder};
pub use config::ClientConfig;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::{AuthClient, ClientConfig, http::ReqwestTransport, session::MemorySessionStore};

	/// Builds a reqwest transport that accepts the self-signed certificates mock servers present.
	pub fn test_reqwest_transport(with_credentials: bool) -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.cookie_store(with_credentials)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Constructs an [`AuthClient`] against `base_url` signing from a fresh in-memory store,
	/// dispatching through [`test_reqwest_transport`].
	pub fn build_test_client(
		base_url: &str,
		with_credentials: bool,
	) -> (AuthClient, MemorySessionStore) {
		let store = MemorySessionStore::default();
		let config = ClientConfig::new(base_url)
			.expect("Failed to build client config for tests.")
			.with_credentials(with_credentials);
		let transport = test_reqwest_transport(with_credentials);
		let client = AuthClient::with_client(config, Arc::new(store.clone()), transport.0)
			.expect("Failed to build test client.");

		(client, store)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use reqwest::{
		Client as ReqwestClient, Error as ReqwestError, Method, Request, Response,
		header::{AUTHORIZATION, HeaderMap, HeaderValue},
	};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, dotenvy as _, httpmock as _};
