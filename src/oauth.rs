//! Dispatch of signed requests through a [`ProviderHttpClient`] and transport error mapping.

pub use oauth2;

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	obs::FlowKind,
	request::SignedRequest,
};

/// Maps HTTP transport failures into broker [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a broker error.
	fn map_transport_error(
		&self,
		flow: FlowKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		flow: FlowKind,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		let _ = (flow, meta);

		map_http_client_error(err)
	}
}

/// Generic translation shared by mappers that have no transport-specific knowledge.
pub fn map_http_client_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unrecognized transport failure".into() }.into(),
	}
}

/// Raw provider answer handed back to flows for classification.
#[derive(Clone, Debug)]
pub struct ProviderResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body.
	pub body: Vec<u8>,
	/// Metadata recorded by the transport handle.
	pub metadata: Option<ResponseMetadata>,
}
impl ProviderResponse {
	/// Whether the status is 2xx.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Retry-After hint recorded by the transport.
	pub fn retry_after(&self) -> Option<Duration> {
		self.metadata.as_ref().and_then(|meta| meta.retry_after)
	}
}

/// Sends `request` once. When `cancel` fires first the transport future is dropped and
/// [`Error::Cancelled`] is returned; an already cancelled token sends nothing.
pub async fn dispatch<C, M>(
	http_client: &C,
	mapper: &M,
	flow: FlowKind,
	request: SignedRequest,
	cancel: Option<&CancellationToken>,
) -> Result<ProviderResponse>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	if cancel.is_some_and(CancellationToken::is_cancelled) {
		return Err(Error::Cancelled);
	}

	let request = request.into_http_request()?;
	let slot = ResponseMetadataSlot::default();
	let handle = http_client.with_metadata(slot.clone());
	let in_flight = handle.call(request);
	let outcome = match cancel {
		Some(token) => token.run_until_cancelled(in_flight).await.ok_or(Error::Cancelled)?,
		None => in_flight.await,
	};
	let metadata = slot.take();
	let response = outcome
		.map_err(|err| mapper.map_transport_error(flow, metadata.as_ref(), err))?;

	Ok(ProviderResponse {
		status: response.status().as_u16(),
		body: response.into_body(),
		metadata,
	})
}
