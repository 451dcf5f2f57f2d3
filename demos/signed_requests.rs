//! Demonstrates signing requests with a session token: an external login flow writes the
//! token into the session store, and the client picks it up on the next request.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use session_bearer::{
	AuthClient, ClientConfig,
	auth::SessionToken,
	session::{MemorySessionStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	// Optional `.env` with `SESSION_BEARER_*` overrides; the mock server below wins regardless.
	let _ = dotenvy::dotenv();

	let server = MockServer::start_async().await;
	let courses_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/courses").header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":\"rust-101\",\"title\":\"Ownership in practice\"}]");
		})
		.await;
	let public_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/catalog").header_missing("authorization");
			then.status(200).body("[]");
		})
		.await;
	let store = MemorySessionStore::default();
	let config = ClientConfig::from_env()?.with_credentials(false);
	let config = ClientConfig { base_url: server.url("/api/").parse()?, ..config };
	let token_key = config.token_key.clone();
	let client = AuthClient::new(config, Arc::new(store.clone()))?;

	// Nothing stored yet: the request goes out unsigned.
	let catalog = client.get("catalog").send().await?;

	println!("catalog (anonymous): {}", catalog.status());

	// Login flow finished: persist the token the way the browser flow does.
	store.set(&token_key, SessionToken::new("demo-access").to_stored())?;

	let courses = client.get("/courses").send().await?.text().await?;

	println!("courses (signed): {courses}");

	public_mock.assert_async().await;
	courses_mock.assert_async().await;

	Ok(())
}
