//! Authenticated request client: resolves paths against the base URL, signs each request
//! with the current session token, and hands it to the transport.

// crates.io
use reqwest::{Body, RequestBuilder as ReqwestRequestBuilder, header::HeaderName};
// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	error::{ConfigError, TransportError},
	http::{HttpTransport, ReqwestTransport},
	obs::RequestSpan,
	session::SessionStore,
	signer::{RequestSigner, SessionBearerSigner},
};

/// HTTP client pinned to a base URL whose requests carry the session bearer token.
///
/// Every dispatch reads the session store again, so tokens written or cleared by the
/// authentication flow take effect on the next request. Cloning is cheap; clones share the
/// signer and transport.
pub struct AuthClient<T = ReqwestTransport>
where
	T: HttpTransport,
{
	base_url: Url,
	builder: ReqwestClient,
	signer: Arc<dyn RequestSigner>,
	transport: Arc<T>,
}
impl AuthClient {
	/// Creates a client for `config` backed by reqwest, signing with the token stored under
	/// `config.token_key` in `store`.
	pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
		let transport = ReqwestTransport::from_config(&config)?;

		Self::session_backed(config, store, transport)
	}

	/// Same as [`new`](Self::new) but dispatches through `client` as-is.
	///
	/// `config.with_credentials` is not applied; configure the cookie store on `client`.
	pub fn with_client(
		config: ClientConfig,
		store: Arc<dyn SessionStore>,
		client: ReqwestClient,
	) -> Result<Self> {
		Self::session_backed(config, store, ReqwestTransport::with_client(client))
	}

	/// Creates a client from [`ClientConfig::from_env`].
	pub fn from_env(store: Arc<dyn SessionStore>) -> Result<Self> {
		Self::new(ClientConfig::from_env()?, store)
	}

	fn session_backed(
		config: ClientConfig,
		store: Arc<dyn SessionStore>,
		transport: ReqwestTransport,
	) -> Result<Self> {
		let signer = SessionBearerSigner::with_key(store, config.token_key.clone());

		Self::with_transport(&config, Arc::new(signer), transport)
	}
}
impl<T> AuthClient<T>
where
	T: HttpTransport,
{
	/// Creates a client with caller-supplied signer and transport.
	///
	/// Only `config.base_url` is consulted; key and credential settings belong to the signer
	/// and transport respectively. Requests are built with the transport's own reqwest client
	/// when it exposes one, and with a dedicated builder client otherwise.
	pub fn with_transport(
		config: &ClientConfig,
		signer: Arc<dyn RequestSigner>,
		transport: impl Into<Arc<T>>,
	) -> Result<Self> {
		let transport = transport.into();
		let builder = match transport.request_client() {
			Some(client) => client.clone(),
			None => ReqwestClient::builder().build().map_err(ConfigError::from)?,
		};

		Ok(Self { base_url: config.base_url.clone(), builder, signer, transport })
	}

	/// Base URL relative paths are joined onto.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Transport used for dispatch.
	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Resolves `path` against the base URL.
	///
	/// Absolute URLs (`scheme://…`) are returned as-is and protocol-relative ones (`//host/…`)
	/// inherit the base scheme. Anything else is appended to the base with exactly one `/`
	/// between them; an empty path resolves to the base itself.
	pub fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
		let invalid = |source| ConfigError::InvalidPath { path: path.to_owned(), source };

		if has_scheme(path) {
			return Url::parse(path).map_err(invalid);
		}
		if path.starts_with("//") {
			return self.base_url.join(path).map_err(invalid);
		}
		if path.is_empty() {
			return Ok(self.base_url.clone());
		}

		let joined = format!(
			"{}/{}",
			self.base_url.as_str().trim_end_matches('/'),
			path.trim_start_matches('/')
		);

		Url::parse(&joined).map_err(invalid)
	}

	/// Starts a request with an arbitrary method.
	pub fn request(&self, method: Method, path: &str) -> RequestBuilder<T> {
		let inner = self
			.resolve(path)
			.map(|url| self.builder.request(method, url))
			.map_err(Error::from);

		RequestBuilder { client: self.clone(), inner }
	}

	/// Starts a `GET` request.
	pub fn get(&self, path: &str) -> RequestBuilder<T> {
		self.request(Method::GET, path)
	}

	/// Starts a `POST` request.
	pub fn post(&self, path: &str) -> RequestBuilder<T> {
		self.request(Method::POST, path)
	}

	/// Starts a `PUT` request.
	pub fn put(&self, path: &str) -> RequestBuilder<T> {
		self.request(Method::PUT, path)
	}

	/// Starts a `PATCH` request.
	pub fn patch(&self, path: &str) -> RequestBuilder<T> {
		self.request(Method::PATCH, path)
	}

	/// Starts a `DELETE` request.
	pub fn delete(&self, path: &str) -> RequestBuilder<T> {
		self.request(Method::DELETE, path)
	}

	/// Starts a `HEAD` request.
	pub fn head(&self, path: &str) -> RequestBuilder<T> {
		self.request(Method::HEAD, path)
	}

	/// Signs `request` and sends it through the transport.
	///
	/// Signer failures abort before dispatch. Transport failures come back as
	/// [`Error::Transport`] wrapping the transport's original error.
	pub async fn execute(&self, request: Request) -> Result<Response> {
		let span = RequestSpan::new(request.method(), "execute");

		span.instrument(async move {
			let request = self.signer.sign(request)?;
			let response = self.transport.execute(request).await.map_err(TransportError::new)?;

			Ok::<_, Error>(response)
		})
		.await
	}
}
impl<T> Clone for AuthClient<T>
where
	T: HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			base_url: self.base_url.clone(),
			builder: self.builder.clone(),
			signer: Arc::clone(&self.signer),
			transport: Arc::clone(&self.transport),
		}
	}
}
impl<T> Debug for AuthClient<T>
where
	T: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthClient")
			.field("base_url", &self.base_url.as_str())
			.finish_non_exhaustive()
	}
}

/// Request under construction; errors are deferred until [`build`](Self::build) or
/// [`send`](Self::send).
pub struct RequestBuilder<T = ReqwestTransport>
where
	T: HttpTransport,
{
	client: AuthClient<T>,
	inner: Result<ReqwestRequestBuilder>,
}
impl<T> RequestBuilder<T>
where
	T: HttpTransport,
{
	/// Adds a header; repeated names append.
	pub fn header(self, name: HeaderName, value: HeaderValue) -> Self {
		self.map(|b| b.header(name, value))
	}

	/// Merges `headers` into the request.
	pub fn headers(self, headers: HeaderMap) -> Self {
		self.map(|b| b.headers(headers))
	}

	/// Appends URL query parameters.
	pub fn query<Q>(self, query: &Q) -> Self
	where
		Q: ?Sized + Serialize,
	{
		self.map(|b| b.query(query))
	}

	/// Sets a JSON body and content type.
	pub fn json<J>(self, json: &J) -> Self
	where
		J: ?Sized + Serialize,
	{
		self.map(|b| b.json(json))
	}

	/// Sets a URL-encoded form body and content type.
	pub fn form<F>(self, form: &F) -> Self
	where
		F: ?Sized + Serialize,
	{
		self.map(|b| b.form(form))
	}

	/// Sets a raw body.
	pub fn body(self, body: impl Into<Body>) -> Self {
		self.map(|b| b.body(body))
	}

	/// Applies any other reqwest builder option.
	pub fn map<F>(mut self, f: F) -> Self
	where
		F: FnOnce(ReqwestRequestBuilder) -> ReqwestRequestBuilder,
	{
		self.inner = self.inner.map(f);

		self
	}

	/// Finalizes the unsigned request.
	pub fn build(self) -> Result<Request> {
		self.inner?.build().map_err(Error::Request)
	}

	/// Builds, signs, and sends the request.
	pub async fn send(self) -> Result<Response> {
		let client = self.client.clone();
		let request = self.build()?;

		client.execute(request).await
	}
}
impl<T> Debug for RequestBuilder<T>
where
	T: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestBuilder").field("client", &self.client).finish_non_exhaustive()
	}
}

fn has_scheme(path: &str) -> bool {
	let Some((scheme, _)) = path.split_once("://") else { return false };
	let mut chars = scheme.chars();

	chars.next().is_some_and(|c| c.is_ascii_alphabetic())
		&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
