//! Transport primitives for signed OAuth 1.0a requests.
//!
//! [`ProviderHttpClient`] is the broker's only dependency on an HTTP stack. Each dispatch asks
//! the client for a short-lived [`AsyncHttpClient`] handle bound to a fresh
//! [`ResponseMetadataSlot`]; the handle records the status and `Retry-After` hint as soon as
//! they are known so failures can be classified even when the body never arrives.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")] use reqwest::header::{HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// HTTP transport able to execute signed provider requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can back many
/// clones of [`Client`](crate::flows::Client), and the handles they return must own
/// whatever state they need so the request futures stay `Send`.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle tied to a [`ResponseMetadataSlot`].
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle that records outcomes in `slot`.
	///
	/// Handles must clear the slot with [`ResponseMetadataSlot::take`] before sending and call
	/// [`ResponseMetadataSlot::store`] once a status line is available.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Metadata captured from the most recent HTTP response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code, if a response arrived.
	pub status: Option<u16>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}

/// Thread-safe slot sharing [`ResponseMetadata`] between a transport handle and the broker.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Default transport backed by [`ReqwestClient`].
///
/// Provider token endpoints answer directly, so the client built by
/// [`ReqwestHttpClient::new`] never follows redirects; a redirect would replay a signature
/// computed for a different URL.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a rustls-backed client with redirects disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Borrows the wrapped reqwest client.
	pub fn inner(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		ReqwestHandle { client: self.0.clone(), slot }
	}
}

/// Per-request handle returned by [`ReqwestHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.client.clone();
		let slot = self.slot.clone();

		Box::pin(async move {
			slot.take();

			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			slot.store(ResponseMetadata {
				status: Some(status.as_u16()),
				retry_after: parse_retry_after(&headers),
			});

			let mut converted =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*converted.status_mut() = status;
			*converted.headers_mut() = headers;

			Ok(converted)
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(i64::from(secs)));
	}

	let delta = OffsetDateTime::parse(raw, &Rfc2822).ok()? - OffsetDateTime::now_utc();

	delta.is_positive().then_some(delta)
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use reqwest::header::HeaderValue;
	// self
	use super::*;

	fn headers(value: &str) -> HeaderMap {
		let mut map = HeaderMap::new();

		map.insert(
			RETRY_AFTER,
			HeaderValue::from_str(value).expect("Header fixture should be valid."),
		);

		map
	}

	#[test]
	fn retry_after_accepts_seconds_and_http_dates() {
		assert_eq!(parse_retry_after(&headers("120")), Some(Duration::seconds(120)));
		assert_eq!(parse_retry_after(&headers("Mon, 01 Jan 2001 00:00:00 +0000")), None);
		assert_eq!(parse_retry_after(&headers("soon")), None);
		assert_eq!(parse_retry_after(&HeaderMap::new()), None);
	}

	#[test]
	fn metadata_slot_take_clears_the_value() {
		let slot = ResponseMetadataSlot::default();

		slot.store(ResponseMetadata { status: Some(503), retry_after: None });

		assert_eq!(slot.take().and_then(|meta| meta.status), Some(503));
		assert!(slot.take().is_none());
	}
}
