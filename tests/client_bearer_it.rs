// std
use std::{net::TcpListener, sync::Arc};
// crates.io
use httpmock::prelude::*;
// self
use session_bearer::{
	AuthClient, ClientConfig,
	auth::SessionToken,
	config::DEFAULT_TOKEN_KEY,
	error::Error,
	reqwest::{self, StatusCode},
	session::{MemorySessionStore, SessionStore},
};

fn build_client(server: &MockServer, store: &MemorySessionStore) -> AuthClient {
	let config = ClientConfig::new(&server.base_url())
		.expect("Mock server base URL should be a valid client base URL.");

	AuthClient::new(config, Arc::new(store.clone())).expect("Client should build for mock server.")
}

#[tokio::test]
async fn stored_token_is_sent_as_bearer() {
	let server = MockServer::start_async().await;
	let store = MemorySessionStore::with_entries([(DEFAULT_TOKEN_KEY, "\"abc123\"")]);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/courses").header("authorization", "Bearer abc123");
			then.status(200).body("[]");
		})
		.await;
	let response = build_client(&server, &store)
		.get("/courses")
		.send()
		.await
		.expect("Signed request should reach the mock server.");

	assert_eq!(response.status(), StatusCode::OK);

	mock.assert_async().await;
}

#[tokio::test]
async fn missing_token_sends_no_authorization() {
	let server = MockServer::start_async().await;
	let store = MemorySessionStore::default();
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/courses").header_missing("authorization");
			then.status(200);
		})
		.await;

	build_client(&server, &store)
		.get("courses")
		.send()
		.await
		.expect("Unsigned request should reach the mock server.");

	mock.assert_async().await;
}

#[tokio::test]
async fn malformed_token_is_ignored() {
	let server = MockServer::start_async().await;
	let store = MemorySessionStore::with_entries([(DEFAULT_TOKEN_KEY, "abc123")]);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/enroll").header_missing("authorization");
			then.status(201);
		})
		.await;
	let response = build_client(&server, &store)
		.post("/enroll")
		.json(&serde_json::json!({ "courseId": "rust-101" }))
		.send()
		.await
		.expect("Malformed token must not fail the request.");

	assert_eq!(response.status(), StatusCode::CREATED);

	mock.assert_async().await;
}

#[tokio::test]
async fn caller_authorization_is_replaced_only_when_token_exists() {
	let server = MockServer::start_async().await;
	let store = MemorySessionStore::default();
	let client = build_client(&server, &store);
	let manual = server
		.mock_async(|when, then| {
			when.method(GET).path("/profile").header("authorization", "Basic Zm9vOmJhcg==");
			then.status(200);
		})
		.await;
	let signed = server
		.mock_async(|when, then| {
			when.method(GET).path("/profile").header("authorization", "Bearer fresh");
			then.status(200);
		})
		.await;
	let send = || {
		client
			.get("/profile")
			.header(
				reqwest::header::AUTHORIZATION,
				reqwest::header::HeaderValue::from_static("Basic Zm9vOmJhcg=="),
			)
			.send()
	};

	send().await.expect("Request with caller credentials should succeed.");
	store
		.set(DEFAULT_TOKEN_KEY, SessionToken::new("fresh").to_stored())
		.expect("Memory store set should succeed.");
	send().await.expect("Request with session credentials should succeed.");

	manual.assert_calls_async(1).await;
	signed.assert_calls_async(1).await;
}

#[tokio::test]
async fn upstream_error_statuses_are_returned_as_responses() {
	let server = MockServer::start_async().await;
	let store = MemorySessionStore::with_entries([(DEFAULT_TOKEN_KEY, "\"expired\"")]);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/me");
			then.status(401).body("{\"message\":\"jwt expired\"}");
		})
		.await;
	let response = build_client(&server, &store)
		.get("/me")
		.send()
		.await
		.expect("HTTP error statuses are not transport failures.");

	assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

	mock.assert_async().await;
}

#[tokio::test]
async fn connection_failure_reaches_caller_unaltered() {
	let port = {
		let listener =
			TcpListener::bind("127.0.0.1:0").expect("Failed to reserve a local port for the test.");

		listener.local_addr().expect("Reserved listener should expose its address.").port()
	};
	let config = ClientConfig::new(&format!("http://127.0.0.1:{port}"))
		.expect("Loopback base URL should be valid.");
	let store = MemorySessionStore::with_entries([(DEFAULT_TOKEN_KEY, "\"abc123\"")]);
	let client =
		AuthClient::new(config, Arc::new(store)).expect("Client should build for loopback URL.");
	let err = client.get("/courses").send().await.expect_err("Closed port must be unreachable.");
	let inner = match err {
		Error::Transport(inner) => inner,
		other => panic!("Expected a transport error, got {other:?}."),
	};
	let original = inner
		.downcast_ref::<reqwest::Error>()
		.expect("Transport error should still be the original reqwest error.");

	assert!(original.is_connect());
}

#[tokio::test]
async fn credentials_mode_replays_server_cookies() {
	let server = MockServer::start_async().await;
	let config = ClientConfig::new(&server.base_url())
		.expect("Mock server base URL should be valid.")
		.with_credentials(true);
	let client = AuthClient::new(config, Arc::new(MemorySessionStore::default()))
		.expect("Client with cookie jar should build.");
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/login");
			then.status(200).header("set-cookie", "sid=42; Path=/");
		})
		.await;
	let dashboard = server
		.mock_async(|when, then| {
			when.method(GET).path("/dashboard").header("cookie", "sid=42");
			then.status(200);
		})
		.await;

	client.post("/login").send().await.expect("Login request should succeed.");
	client.get("/dashboard").send().await.expect("Dashboard request should succeed.");

	login.assert_async().await;
	dashboard.assert_async().await;
}
