//! Handshake and call orchestration powered by the signer and request builder.

pub mod access_token;
pub mod authorization;
pub mod call;
pub mod common;
pub mod request_token;

pub use call::*;

// self
use crate::{
	_prelude::*,
	config::ClientConfig,
	http::ProviderHttpClient,
	oauth::{self, ProviderResponse, TransportErrorMapper},
	obs::FlowKind,
	provider::ProviderDescriptor,
	request::SignedRequest,
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestOAuthClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// OAuth 1.0a client bound to one provider and one consumer identity.
///
/// The client holds no mutable state: every operation draws its own nonce, timestamp, and
/// signature, and credentials flow in and out through arguments and return values. Clones
/// share the transport.
pub struct Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider descriptor that defines endpoints and signing options.
	pub descriptor: ProviderDescriptor,
	/// Consumer identity and callback URL.
	pub config: ClientConfig,
	cancellation: Option<CancellationToken>,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			config,
			cancellation: None,
		}
	}

	/// Returns a client whose operations abort with [`Error::Cancelled`] once `token` fires.
	pub fn with_cancellation(&self, token: CancellationToken) -> Self {
		let mut client = self.clone();

		client.cancellation = Some(token);

		client
	}

	pub(crate) async fn send(
		&self,
		flow: FlowKind,
		request: SignedRequest,
	) -> Result<ProviderResponse> {
		oauth::dispatch(
			self.http_client.as_ref(),
			self.transport_mapper.as_ref(),
			flow,
			request,
			self.cancellation.as_ref(),
		)
		.await
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client with its own reqwest transport (redirects disabled).
	pub fn new(descriptor: ProviderDescriptor, config: ClientConfig) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(
			descriptor,
			config,
			ReqwestHttpClient::new()?,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}

	/// Creates a client for Upwork's OAuth 1.0a endpoints.
	pub fn upwork(config: ClientConfig) -> Result<Self, ConfigError> {
		Self::new(ProviderDescriptor::upwork()?, config)
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			descriptor: self.descriptor.clone(),
			config: self.config.clone(),
			cancellation: self.cancellation.clone(),
		}
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("descriptor", &self.descriptor)
			.field("consumer_key", &self.config.consumer.key())
			.field("callback_url", &self.config.callback_url.as_str())
			.field("cancellable", &self.cancellation.is_some())
			.finish()
	}
}
