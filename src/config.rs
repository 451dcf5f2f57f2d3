//! Client configuration: base URL, token storage key, and credential behavior.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Production endpoint the client targets unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://edura-server.onrender.com";
/// Local development endpoint.
pub const LOCAL_BASE_URL: &str = "http://localhost:5000";
/// Session store key holding the JSON-encoded access token.
pub const DEFAULT_TOKEN_KEY: &str = "accessToken";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SESSION_BEARER_API_URL";
/// Environment variable overriding the token storage key.
pub const TOKEN_KEY_ENV: &str = "SESSION_BEARER_TOKEN_KEY";
/// Environment variable enabling credential cookies.
pub const WITH_CREDENTIALS_ENV: &str = "SESSION_BEARER_WITH_CREDENTIALS";

/// Settings consumed by [`AuthClient`](crate::AuthClient) at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClientConfig")]
pub struct ClientConfig {
	/// Base URL every relative request path is joined onto.
	pub base_url: Url,
	/// Session store key the bearer token is read from.
	pub token_key: String,
	/// Keeps a cookie jar across requests so server-set session cookies are sent back.
	pub with_credentials: bool,
}
impl ClientConfig {
	/// Creates a configuration for the provided base URL with default key and no cookies.
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			base_url: parse_base_url(base_url)?,
			token_key: DEFAULT_TOKEN_KEY.into(),
			with_credentials: false,
		})
	}

	/// Targets [`LOCAL_BASE_URL`].
	pub fn local() -> Self {
		Self::from_valid(LOCAL_BASE_URL)
	}

	/// Reads the configuration from the process environment.
	///
	/// Unset or blank variables fall back to the defaults. Loading a `.env` file beforehand is
	/// left to the binary.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Same as [`from_env`](Self::from_env) but with an injectable variable source.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &str| lookup(name).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
		let mut config = match read(BASE_URL_ENV) {
			Some(value) => Self::new(&value)?,
			None => Self::default(),
		};

		if let Some(key) = read(TOKEN_KEY_ENV) {
			config.token_key = key;
		}
		if let Some(flag) = read(WITH_CREDENTIALS_ENV) {
			config.with_credentials = parse_flag(&flag);
		}

		Ok(config)
	}

	/// Overrides the session store key.
	pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
		self.token_key = key.into();

		self
	}

	/// Enables or disables the credential cookie jar.
	pub fn with_credentials(mut self, enabled: bool) -> Self {
		self.with_credentials = enabled;

		self
	}

	fn from_valid(base_url: &'static str) -> Self {
		Self {
			base_url: Url::parse(base_url).unwrap_or_else(|e| {
				unreachable!("built-in base URL `{base_url}` must parse: {e}")
			}),
			token_key: DEFAULT_TOKEN_KEY.into(),
			with_credentials: false,
		}
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self::from_valid(DEFAULT_BASE_URL)
	}
}

#[derive(Deserialize)]
struct RawClientConfig {
	base_url: String,
	#[serde(default = "default_token_key")]
	token_key: String,
	#[serde(default)]
	with_credentials: bool,
}
impl TryFrom<RawClientConfig> for ClientConfig {
	type Error = ConfigError;

	fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
		Ok(Self {
			base_url: parse_base_url(&raw.base_url)?,
			token_key: raw.token_key,
			with_credentials: raw.with_credentials,
		})
	}
}

fn default_token_key() -> String {
	DEFAULT_TOKEN_KEY.into()
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(value)
		.map_err(|source| ConfigError::InvalidBaseUrl { value: value.into(), source })?;

	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
		return Err(ConfigError::UnsupportedBaseUrl { url: url.into() });
	}

	Ok(url)
}

fn parse_flag(value: &str) -> bool {
	matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
