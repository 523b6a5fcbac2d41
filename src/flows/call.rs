//! Signed resource calls made with an access credential pair.
//!
//! Responses are parsed leniently: a body that is valid JSON comes back as
//! [`ApiResponse::Json`], anything else as [`ApiResponse::Raw`] untouched, because some
//! provider endpoints answer successful calls with plain text. Only non-2xx statuses fail.

// crates.io
use oauth2::http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::{Client, common},
	http::ProviderHttpClient,
	oauth::{ProviderResponse, TransportErrorMapper},
	obs::FlowKind,
	request::{RequestBuilder, RequestPurpose},
};

pub use crate::request::CallBody;

/// HTTP methods accepted by [`Client::call`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiMethod {
	#[default]
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `DELETE`.
	Delete,
}
impl ApiMethod {
	/// Returns the wire method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiMethod::Get => "GET",
			ApiMethod::Post => "POST",
			ApiMethod::Put => "PUT",
			ApiMethod::Delete => "DELETE",
		}
	}
}
impl From<ApiMethod> for Method {
	fn from(method: ApiMethod) -> Self {
		match method {
			ApiMethod::Get => Method::GET,
			ApiMethod::Post => Method::POST,
			ApiMethod::Put => Method::PUT,
			ApiMethod::Delete => Method::DELETE,
		}
	}
}
impl FromStr for ApiMethod {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_uppercase().as_str() {
			"GET" => Ok(Self::Get),
			"POST" => Ok(Self::Post),
			"PUT" => Ok(Self::Put),
			"DELETE" => Ok(Self::Delete),
			other => Err(Error::invalid_argument(format!("unsupported HTTP method `{other}`"))),
		}
	}
}
impl Display for ApiMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Successful call payload: structured when the body parses as JSON, raw otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
	/// Body parsed as JSON.
	Json(Value),
	/// Body returned verbatim.
	Raw(String),
}
impl ApiResponse {
	fn from_body(body: &[u8]) -> Self {
		match serde_json::from_slice(body) {
			Ok(value) => Self::Json(value),
			Err(_) => Self::Raw(String::from_utf8_lossy(body).into_owned()),
		}
	}

	/// Borrows the JSON value, if the body parsed.
	pub fn as_json(&self) -> Option<&Value> {
		match self {
			Self::Json(value) => Some(value),
			Self::Raw(_) => None,
		}
	}

	/// Borrows the raw body, if the body did not parse as JSON.
	pub fn as_raw(&self) -> Option<&str> {
		match self {
			Self::Json(_) => None,
			Self::Raw(raw) => Some(raw),
		}
	}
}

impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Issues a signed call bound to the access pair and parses the body leniently.
	///
	/// Both credential fields must be non-empty. Non-2xx responses fail with
	/// [`Error::ApiCallFailed`]. Nothing is retried.
	pub async fn call(
		&self,
		access_token: &str,
		access_token_secret: &str,
		url: &str,
		method: ApiMethod,
		body: Option<CallBody>,
	) -> Result<ApiResponse> {
		common::observe(FlowKind::ApiCall, "call", &self.descriptor.name, async move {
			let response =
				self.execute_call(access_token, access_token_secret, url, method, body).await?;

			Ok(ApiResponse::from_body(&response.body))
		})
		.await
	}

	/// Same as [`Client::call`] with the credentials taken from an [`AccessToken`].
	pub async fn call_with(
		&self,
		access: &AccessToken,
		url: &str,
		method: ApiMethod,
		body: Option<CallBody>,
	) -> Result<ApiResponse> {
		self.call(&access.access_token, access.access_token_secret.expose(), url, method, body)
			.await
	}

	/// Issues a signed call and deserializes the body into `T`; shape mismatches surface as
	/// [`Error::MalformedResponse`] naming the failing path.
	pub async fn call_as<T>(
		&self,
		access_token: &str,
		access_token_secret: &str,
		url: &str,
		method: ApiMethod,
		body: Option<CallBody>,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		common::observe(FlowKind::ApiCall, "call_as", &self.descriptor.name, async move {
			let response =
				self.execute_call(access_token, access_token_secret, url, method, body).await?;
			let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

			serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
				Error::malformed(format!(
					"response body does not match the expected shape at `{}`: {}",
					err.path(),
					err.inner()
				))
			})
		})
		.await
	}

	async fn execute_call(
		&self,
		access_token: &str,
		access_token_secret: &str,
		url: &str,
		method: ApiMethod,
		body: Option<CallBody>,
	) -> Result<ProviderResponse> {
		common::require("access_token", access_token)?;
		common::require("access_token_secret", access_token_secret)?;

		let target = Url::parse(url)
			.map_err(|e| Error::invalid_argument(format!("URL `{url}` is malformed: {e}")))?;
		let mut builder = RequestBuilder::new(
			&self.config.consumer,
			RequestPurpose::AuthenticatedCall { token: access_token },
			method.into(),
			target,
		)
		.for_descriptor(&self.descriptor)
		.token_secret(access_token_secret);

		if let Some(body) = body {
			builder = builder.body(body);
		}

		let response = self.send(FlowKind::ApiCall, builder.build()?).await?;

		if !response.is_success() {
			return Err(Error::ApiCallFailed {
				status: response.status,
				body: response.body_text(),
			});
		}

		Ok(response)
	}
}
