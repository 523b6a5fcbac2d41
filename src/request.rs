//! OAuth 1.0a request assembly.
//!
//! [`RequestBuilder`] gathers the protocol parameters for one leg of the handshake (or for an
//! authenticated call), folds in the URL query and any form body, asks the [`Signer`] for
//! `oauth_signature`, and yields a [`SignedRequest`] that renders either an
//! `Authorization: OAuth ...` header or query parameters. Each build draws a fresh nonce and
//! reads the clock, so concurrent builds never share state.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use rand::{Rng, distr::Alphanumeric};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	config::ConsumerCredentials,
	error::ConfigError,
	provider::{ParameterTransport, ProviderDescriptor},
	sign::{self, SignatureMethod, Signer},
};

const NONCE_LEN: usize = 32;
const OAUTH_VERSION: &str = "1.0";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Which handshake step a request belongs to; decides the token-bound parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestPurpose<'a> {
	/// Leg 1: carries `oauth_callback`, no token.
	RequestToken {
		/// Callback URL sent as `oauth_callback`.
		callback: &'a Url,
	},
	/// Leg 2: carries the temporary `oauth_token` and `oauth_verifier`.
	AccessToken {
		/// Temporary token.
		token: &'a str,
		/// Verifier returned by the provider redirect.
		verifier: &'a str,
	},
	/// Signed resource request bound to an access token.
	AuthenticatedCall {
		/// Access token.
		token: &'a str,
	},
}

/// Body attached to an authenticated call.
#[derive(Clone, Debug, PartialEq)]
pub enum CallBody {
	/// Serialized as `application/json`; not part of the signature.
	Json(Value),
	/// Serialized as `application/x-www-form-urlencoded`; every pair is signed.
	Form(Vec<(String, String)>),
}

/// Collects inputs for one signed request.
#[derive(Clone, Debug)]
pub struct RequestBuilder<'a> {
	consumer: &'a ConsumerCredentials,
	purpose: RequestPurpose<'a>,
	token_secret: Option<&'a str>,
	method: Method,
	url: Url,
	signature_method: SignatureMethod,
	transport: ParameterTransport,
	realm: Option<String>,
	body: Option<CallBody>,
	nonce: Option<String>,
	timestamp: Option<i64>,
}
impl<'a> RequestBuilder<'a> {
	/// Starts a request for `purpose` against `url`.
	pub fn new(
		consumer: &'a ConsumerCredentials,
		purpose: RequestPurpose<'a>,
		method: Method,
		url: Url,
	) -> Self {
		Self {
			consumer,
			purpose,
			token_secret: None,
			method,
			url,
			signature_method: SignatureMethod::default(),
			transport: ParameterTransport::default(),
			realm: None,
			body: None,
			nonce: None,
			timestamp: None,
		}
	}

	/// Copies signature method, parameter transport, and realm from a descriptor.
	pub fn for_descriptor(mut self, descriptor: &ProviderDescriptor) -> Self {
		self.signature_method = descriptor.signature_method;
		self.transport = descriptor.parameter_transport;
		self.realm = descriptor.realm.clone();

		self
	}

	/// Sets the token secret half of the signing key.
	pub fn token_secret(mut self, secret: &'a str) -> Self {
		self.token_secret = Some(secret);

		self
	}

	/// Overrides the signature method.
	pub fn signature_method(mut self, method: SignatureMethod) -> Self {
		self.signature_method = method;

		self
	}

	/// Overrides where protocol parameters are placed.
	pub fn parameter_transport(mut self, transport: ParameterTransport) -> Self {
		self.transport = transport;

		self
	}

	/// Attaches a call body.
	pub fn body(mut self, body: CallBody) -> Self {
		self.body = Some(body);

		self
	}

	/// Pins the nonce instead of drawing a random one.
	pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
		self.nonce = Some(nonce.into());

		self
	}

	/// Pins the timestamp (Unix seconds) instead of reading the clock.
	pub fn timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = Some(timestamp);

		self
	}

	/// Returns the protocol parameters (without `oauth_signature`).
	fn protocol_params(&mut self) -> BTreeMap<String, String> {
		let nonce = self.nonce.take().unwrap_or_else(generate_nonce);
		let timestamp =
			self.timestamp.unwrap_or_else(|| OffsetDateTime::now_utc().unix_timestamp());
		let mut params = BTreeMap::from([
			("oauth_consumer_key".to_owned(), self.consumer.key().to_owned()),
			("oauth_nonce".to_owned(), nonce),
			("oauth_signature_method".to_owned(), self.signature_method.as_str().to_owned()),
			("oauth_timestamp".to_owned(), timestamp.to_string()),
			("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
		]);

		match self.purpose {
			RequestPurpose::RequestToken { callback } => {
				params.insert("oauth_callback".into(), callback.to_string());
			},
			RequestPurpose::AccessToken { token, verifier } => {
				params.insert("oauth_token".into(), token.to_owned());
				params.insert("oauth_verifier".into(), verifier.to_owned());
			},
			RequestPurpose::AuthenticatedCall { token } => {
				params.insert("oauth_token".into(), token.to_owned());
			},
		}

		params
	}

	/// Computes the signature and returns the ready-to-send request.
	pub fn build(mut self) -> Result<SignedRequest> {
		let mut oauth_params = self.protocol_params();
		let query_pairs = self.url.query_pairs().into_owned().collect::<Vec<_>>();
		let form_pairs = match &self.body {
			Some(CallBody::Form(pairs)) => pairs.as_slice(),
			_ => &[],
		};
		let signed = oauth_params
			.iter()
			.chain(query_pairs.iter().map(|(k, v)| (k, v)))
			.chain(form_pairs.iter().map(|(k, v)| (k, v)))
			.map(|(k, v)| (k.as_str(), v.as_str()));
		let signature = Signer::new(self.signature_method).sign_url(
			self.method.as_str(),
			&self.url,
			signed,
			self.consumer.secret().expose(),
			self.token_secret,
		)?;

		oauth_params.insert("oauth_signature".into(), signature);

		Ok(SignedRequest {
			method: self.method,
			url: self.url,
			oauth_params,
			transport: self.transport,
			realm: self.realm,
			body: self.body,
		})
	}
}

/// A signed, ephemeral request ready for dispatch. Never persisted.
#[derive(Clone, Debug)]
pub struct SignedRequest {
	/// HTTP method.
	pub method: Method,
	/// Target URL including its original query.
	pub url: Url,
	/// Protocol parameters including `oauth_signature`.
	pub oauth_params: BTreeMap<String, String>,
	/// Placement of protocol parameters.
	pub transport: ParameterTransport,
	/// Optional Authorization header realm.
	pub realm: Option<String>,
	/// Optional body.
	pub body: Option<CallBody>,
}
impl SignedRequest {
	/// Returns `oauth_signature`.
	pub fn signature(&self) -> &str {
		self.param("oauth_signature").unwrap_or_default()
	}

	/// Returns `oauth_nonce`.
	pub fn nonce(&self) -> &str {
		self.param("oauth_nonce").unwrap_or_default()
	}

	/// Looks up a protocol parameter.
	pub fn param(&self, key: &str) -> Option<&str> {
		self.oauth_params.get(key).map(String::as_str)
	}

	/// Renders the `Authorization` header value.
	pub fn authorization_header(&self) -> String {
		let mut header = String::from("OAuth ");
		let mut first = true;

		if let Some(realm) = &self.realm {
			header.push_str(&format!("realm=\"{realm}\""));

			first = false;
		}

		for (key, value) in &self.oauth_params {
			if !first {
				header.push_str(", ");
			}

			header.push_str(&format!(
				"{}=\"{}\"",
				sign::percent_encode(key),
				sign::percent_encode(value)
			));

			first = false;
		}

		header
	}

	/// Returns the URL to dispatch to: the original URL, plus protocol parameters when the
	/// query-string transport is selected.
	pub fn request_url(&self) -> Url {
		let mut url = self.url.clone();

		if self.transport == ParameterTransport::QueryString {
			let mut pairs = url.query_pairs_mut();

			for (key, value) in &self.oauth_params {
				pairs.append_pair(key, value);
			}

			drop(pairs);
		}

		url
	}

	/// Converts into a transport-level request.
	pub fn into_http_request(self) -> Result<HttpRequest> {
		let mut builder = oauth2::http::Request::builder()
			.method(self.method.clone())
			.uri(self.request_url().as_str())
			.header(ACCEPT, "application/json, application/x-www-form-urlencoded, */*");

		if self.transport == ParameterTransport::AuthorizationHeader {
			builder = builder.header(AUTHORIZATION, self.authorization_header());
		}

		let body = match &self.body {
			Some(CallBody::Form(pairs)) => {
				builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE);

				url::form_urlencoded::Serializer::new(String::new())
					.extend_pairs(pairs)
					.finish()
					.into_bytes()
			},
			Some(CallBody::Json(value)) => {
				builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE);

				serde_json::to_vec(value)
					.map_err(|e| Error::invalid_argument(format!("JSON body is invalid: {e}")))?
			},
			None => {
				if self.method == Method::POST || self.method == Method::PUT {
					builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE);
				}

				Vec::new()
			},
		};

		Ok(builder.body(body).map_err(ConfigError::from)?)
	}
}

fn generate_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}
