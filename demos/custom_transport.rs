//! Demonstrates plugging a custom HTTP transport and error mapper into the client.
//!
//! 1. Implement [`ProviderHttpClient`] so each handle records [`ResponseMetadata`] in the
//!    provided [`ResponseMetadataSlot`].
//! 2. Provide a [`TransportErrorMapper`] that turns the transport's own error type into a
//!    broker [`Error`], using the captured metadata when it helps.
//! 3. Pass both to [`Client::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
};
// crates.io
use color_eyre::Result;
// self
use oauth1_broker::{
	config::ClientConfig,
	error::{Error, TransportError},
	flows::Client,
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	obs::FlowKind,
	provider::ProviderDescriptor,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let descriptor = ProviderDescriptor::builder("scripted-provider")
		.request_token_endpoint(Url::parse("https://provider.example.com/oauth/request_token")?)
		.access_token_endpoint(Url::parse("https://provider.example.com/oauth/access_token")?)
		.authorization_endpoint(Url::parse("https://provider.example.com/authorize")?)
		.build()?;
	let config = ClientConfig::new(
		"demo-consumer",
		"demo-secret",
		"https://app.example.com/oauth/callback",
	)?;
	let client: Client<ScriptedHttpClient, ScriptedErrorMapper> = Client::with_http_client(
		descriptor.clone(),
		config.clone(),
		ScriptedHttpClient::Answer("oauth_token=demo-token&oauth_token_secret=demo-token-secret"),
		ScriptedErrorMapper,
	);
	let request_token = client.get_request_token().await?;

	println!("Send the user to {}.", request_token.redirect_url);

	let failing: Client<ScriptedHttpClient, ScriptedErrorMapper> = Client::with_http_client(
		descriptor,
		config,
		ScriptedHttpClient::Unreachable { host: "provider.example.com" },
		ScriptedErrorMapper,
	);

	match failing.get_access_token("demo-token", "demo-token-secret", "demo-verifier").await {
		Ok(_) => println!("Scripted transport unexpectedly succeeded."),
		Err(e) => println!("Transport error mapped by the client: {e} ({:?}).", e.class()),
	}

	Ok(())
}

#[derive(Debug)]
struct ScriptedTransportError {
	host: &'static str,
}
impl Display for ScriptedTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "DNS lookup failed for {}", self.host)
	}
}
impl StdError for ScriptedTransportError {}

#[derive(Clone, Copy, Debug)]
enum ScriptedHttpClient {
	Answer(&'static str),
	Unreachable { host: &'static str },
}
impl ProviderHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHandle;
	type TransportError = ScriptedTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		ScriptedHandle { script: *self, slot }
	}
}

struct ScriptedHandle {
	script: ScriptedHttpClient,
	slot: ResponseMetadataSlot,
}
impl<'c> AsyncHttpClient<'c> for ScriptedHandle {
	type Error = HttpClientError<ScriptedTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let script = self.script;
		let slot = self.slot.clone();
		let signed = request.headers().contains_key("authorization");

		Box::pin(async move {
			slot.take();

			match script {
				ScriptedHttpClient::Answer(body) if signed => {
					slot.store(ResponseMetadata { status: Some(200), retry_after: None });

					Ok(HttpResponse::new(body.as_bytes().to_vec()))
				},
				ScriptedHttpClient::Answer(_) =>
					Err(HttpClientError::Other("request carried no Authorization header".into())),
				// The oauth2 crate names this variant after reqwest, but the boxed payload can be
				// any transport error.
				ScriptedHttpClient::Unreachable { host } =>
					Err(HttpClientError::Reqwest(Box::new(ScriptedTransportError { host }))),
			}
		})
	}
}

#[derive(Clone, Copy, Debug)]
struct ScriptedErrorMapper;
impl TransportErrorMapper<ScriptedTransportError> for ScriptedErrorMapper {
	fn map_transport_error(
		&self,
		flow: FlowKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<ScriptedTransportError>,
	) -> Error {
		let status = metadata.and_then(|meta| meta.status);
		let message = match error {
			HttpClientError::Reqwest(inner) =>
				format!("{flow} leg could not reach the provider: {inner}"),
			HttpClientError::Other(text) => format!("{flow} leg failed: {text}"),
			_ => format!("{flow} leg failed"),
		};
		let message = match status {
			Some(status) => format!("{message} (HTTP {status})"),
			None => message,
		};

		TransportError::Other { message }.into()
	}
}
