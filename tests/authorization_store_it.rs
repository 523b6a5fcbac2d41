mod common;

// crates.io
use httpmock::prelude::*;
use time::Duration;
// self
use common::*;
use oauth1_broker::{
	error::Error,
	store::{MemoryStore, SecretStore},
};

#[tokio::test]
async fn begin_then_complete_runs_the_full_handshake() {
	let server = MockServer::start_async().await;
	let client = reqwest_client(mock_descriptor(&server));
	let store = MemoryStore::default();
	let request_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token");
			then.status(200).body("oauth_token=T1&oauth_token_secret=S1");
		})
		.await;
	let access_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token");
			then.status(200).body("oauth_token=AT&oauth_token_secret=AS");
		})
		.await;
	let redirect = client.begin_authorization(&store).await.expect("Leg 1 should succeed.");

	assert_eq!(redirect.oauth_token, "T1");
	assert_eq!(
		redirect.redirect_url.as_str(),
		"https://provider.example.com/authorize?oauth_token=T1"
	);
	assert_eq!(store.len(), 1);

	let access = client
		.complete_authorization(&store, "T1", "V1")
		.await
		.expect("Leg 2 should succeed with the stored secret.");

	request_mock.assert_async().await;
	access_mock.assert_async().await;

	assert_eq!(access.access_token, "AT");
	assert_eq!(access.access_token_secret.expose(), "AS");
	assert!(store.is_empty());
}

#[tokio::test]
async fn stored_secret_is_consumed_once() {
	let (client, http, _) =
		fake_client(Reply::Respond { status: 200, body: "oauth_token=T1&oauth_token_secret=S1" });
	let store = MemoryStore::default();

	client.begin_authorization(&store).await.expect("Leg 1 should succeed.");
	client.complete_authorization(&store, "T1", "V1").await.expect("Leg 2 should succeed.");

	let err = client
		.complete_authorization(&store, "T1", "V1")
		.await
		.expect_err("A replayed callback should find no stored secret.");

	assert!(matches!(err, Error::InvalidArgument { .. }));
	assert_eq!(http.calls(), 2);
}

#[tokio::test]
async fn empty_callback_parameters_leave_the_store_untouched() {
	let (client, http, _) =
		fake_client(Reply::Respond { status: 200, body: "oauth_token=T1&oauth_token_secret=S1" });
	let store = MemoryStore::default();

	client.begin_authorization(&store).await.expect("Leg 1 should succeed.");

	let err = client
		.complete_authorization(&store, "T1", "")
		.await
		.expect_err("An empty verifier should be rejected.");

	assert!(matches!(err, Error::InvalidArgument { .. }));
	assert_eq!(store.len(), 1);
	assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn expired_secrets_are_not_returned() {
	let (client, http, _) =
		fake_client(Reply::Respond { status: 200, body: "oauth_token=T1&oauth_token_secret=S1" });
	let store = MemoryStore::with_ttl(Duration::ZERO);

	client.begin_authorization(&store).await.expect("Leg 1 should succeed.");

	let err = client
		.complete_authorization(&store, "T1", "V1")
		.await
		.expect_err("An expired secret should not be usable.");

	assert!(matches!(err, Error::InvalidArgument { .. }));
	assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn stores_are_usable_as_trait_objects() {
	let store: Box<dyn SecretStore> = Box::new(MemoryStore::default());

	store.put("T1", "S1".into()).await.expect("Memory store writes should succeed.");

	let secret = store.take("T1").await.expect("Memory store reads should succeed.");

	assert_eq!(secret.as_ref().map(|secret| secret.expose()), Some("S1"));
	assert!(store.take("T1").await.expect("Memory store reads should succeed.").is_none());
}
