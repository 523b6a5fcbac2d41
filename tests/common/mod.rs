//! Shared fixtures for the integration suites: a reqwest client that trusts the mock server's
//! certificate and a scripted in-memory transport that records every outgoing request.

#![allow(dead_code)]

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use httpmock::MockServer;
use parking_lot::Mutex;
// self
use oauth1_broker::{
	config::ClientConfig,
	error::Error,
	flows::{Client, ReqwestOAuthClient},
	http::{ProviderHttpClient, ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		ReqwestTransportErrorMapper, TransportErrorMapper, map_http_client_error,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
			http::{
				StatusCode,
				header::{AUTHORIZATION, CONTENT_TYPE, HeaderName},
			},
		},
	},
	obs::FlowKind,
	provider::ProviderDescriptor,
	reqwest,
	url::Url,
};

pub const CONSUMER_KEY: &str = "consumer-key";
pub const CONSUMER_SECRET: &str = "consumer-secret";
pub const CALLBACK_URL: &str = "https://app.example.com/api/upwork/callback";

pub fn config() -> ClientConfig {
	ClientConfig::new(CONSUMER_KEY, CONSUMER_SECRET, CALLBACK_URL)
		.expect("Test client configuration should be valid.")
}

/// Mock server URL for `path`, pinned to `https` so descriptor validation accepts it.
pub fn https_url(server: &MockServer, path: &str) -> Url {
	let mut url = Url::parse(&server.url(path)).expect("Mock server URL should parse.");

	url.set_scheme("https").expect("Mock server URL should accept the https scheme.");

	url
}

pub fn mock_descriptor(server: &MockServer) -> ProviderDescriptor {
	ProviderDescriptor::builder("mock-oauth1")
		.request_token_endpoint(https_url(server, "/oauth/request_token"))
		.access_token_endpoint(https_url(server, "/oauth/access_token"))
		.authorization_endpoint(
			Url::parse("https://provider.example.com/authorize")
				.expect("Authorization URL fixture should parse."),
		)
		.build()
		.expect("Mock provider descriptor should build.")
}

pub fn reqwest_client(descriptor: ProviderDescriptor) -> ReqwestOAuthClient {
	let http = reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.redirect(reqwest::redirect::Policy::none())
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	Client::with_http_client(
		descriptor,
		config(),
		ReqwestHttpClient::with_client(http),
		ReqwestTransportErrorMapper,
	)
}

pub fn fake_descriptor() -> ProviderDescriptor {
	let url = |raw: &str| Url::parse(raw).expect("Fake endpoint URL should parse.");

	ProviderDescriptor::builder("fake-oauth1")
		.request_token_endpoint(url("https://provider.test/oauth/request_token"))
		.access_token_endpoint(url("https://provider.test/oauth/access_token"))
		.authorization_endpoint(url("https://provider.test/authorize"))
		.build()
		.expect("Fake provider descriptor should build.")
}

pub type FakeClient = Client<FakeHttpClient, FakeMapper>;

/// Builds a client over a scripted transport, returning the transport and mapper so tests
/// can inspect what was sent and what the mapper observed.
pub fn fake_client(reply: Reply) -> (FakeClient, FakeHttpClient, FakeMapper) {
	let http = FakeHttpClient::new(reply);
	let mapper = FakeMapper::default();
	let client = Client::with_http_client(
		fake_descriptor(),
		config(),
		http.clone(),
		mapper.clone(),
	);

	(client, http, mapper)
}

#[derive(Debug)]
pub struct FakeTransportError(pub String);
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl StdError for FakeTransportError {}

/// Scripted answer for every request the fake transport receives.
#[derive(Clone, Debug)]
pub enum Reply {
	Respond { status: u16, body: &'static str },
	Fail { status: Option<u16>, message: &'static str },
	Hang,
}

/// What the fake transport saw on the wire.
#[derive(Clone, Debug)]
pub struct Recorded {
	pub method: String,
	pub uri: String,
	pub authorization: Option<String>,
	pub content_type: Option<String>,
	pub body: String,
}
impl Recorded {
	fn capture(request: &HttpRequest) -> Self {
		let header = |name: HeaderName| {
			request.headers().get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
		};

		Self {
			method: request.method().to_string(),
			uri: request.uri().to_string(),
			authorization: header(AUTHORIZATION),
			content_type: header(CONTENT_TYPE),
			body: String::from_utf8_lossy(request.body()).into_owned(),
		}
	}

	pub fn authorization(&self) -> &str {
		self.authorization.as_deref().expect("Request should carry an Authorization header.")
	}
}

#[derive(Clone, Debug)]
pub struct FakeHttpClient {
	reply: Reply,
	requests: Arc<Mutex<Vec<Recorded>>>,
}
impl FakeHttpClient {
	pub fn new(reply: Reply) -> Self {
		Self { reply, requests: Default::default() }
	}

	pub fn requests(&self) -> Vec<Recorded> {
		self.requests.lock().clone()
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}
}
impl ProviderHttpClient for FakeHttpClient {
	type Handle = FakeHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		FakeHandle { reply: self.reply.clone(), requests: Arc::clone(&self.requests), slot }
	}
}

pub struct FakeHandle {
	reply: Reply,
	requests: Arc<Mutex<Vec<Recorded>>>,
	slot: ResponseMetadataSlot,
}
impl<'c> AsyncHttpClient<'c> for FakeHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		self.requests.lock().push(Recorded::capture(&request));

		let reply = self.reply.clone();
		let slot = self.slot.clone();

		Box::pin(async move {
			slot.take();

			match reply {
				Reply::Respond { status, body } => {
					slot.store(ResponseMetadata { status: Some(status), retry_after: None });

					let mut response = HttpResponse::new(body.as_bytes().to_vec());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Scripted status should be valid.");

					Ok(response)
				},
				Reply::Fail { status, message } => {
					slot.store(ResponseMetadata { status, retry_after: None });

					Err(HttpClientError::Reqwest(Box::new(FakeTransportError(message.to_owned()))))
				},
				Reply::Hang => std::future::pending().await,
			}
		})
	}
}

/// Mapper that remembers every (flow, metadata) pair it was handed.
#[derive(Clone, Debug, Default)]
pub struct FakeMapper {
	seen: Arc<Mutex<Vec<(FlowKind, Option<ResponseMetadata>)>>>,
}
impl FakeMapper {
	pub fn seen(&self) -> Vec<(FlowKind, Option<ResponseMetadata>)> {
		self.seen.lock().clone()
	}
}
impl TransportErrorMapper<FakeTransportError> for FakeMapper {
	fn map_transport_error(
		&self,
		flow: FlowKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<FakeTransportError>,
	) -> Error {
		self.seen.lock().push((flow, metadata.cloned()));

		map_http_client_error(error)
	}
}

/// Extracts `name="value"` from an `Authorization: OAuth ...` header.
pub fn header_param<'a>(header: &'a str, name: &str) -> Option<&'a str> {
	let params = header.strip_prefix("OAuth ")?;

	params.split(", ").find_map(|pair| {
		let (key, value) = pair.split_once('=')?;

		(key == name).then(|| value.trim_matches('"'))
	})
}
