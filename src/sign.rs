//! OAuth 1.0a signature computation (RFC 5849 §3.4).
//!
//! Everything here is a pure function of its inputs: callers hand over the HTTP method,
//! the base URL, every parameter that participates in the signature, and the secrets.
//! Parameters are percent-encoded with the RFC 3986 unreserved set, sorted by encoded key
//! then encoded value, and joined into the signature base string that gets signed with
//! `HMAC-SHA1` (or passed through for `PLAINTEXT`).

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;
// self
use crate::_prelude::*;

/// Everything outside `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

type HmacSha1 = Hmac<Sha1>;

/// Signature methods supported by the broker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMethod {
	#[default]
	/// `HMAC-SHA1` over the signature base string.
	#[serde(rename = "HMAC-SHA1")]
	HmacSha1,
	/// `PLAINTEXT`, where the signature is the signing key itself. Only safe over TLS.
	#[serde(rename = "PLAINTEXT")]
	Plaintext,
}
impl SignatureMethod {
	/// Returns the `oauth_signature_method` wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
			SignatureMethod::Plaintext => "PLAINTEXT",
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Percent-encodes a value using the RFC 3986 unreserved character set.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Builds the normalized parameter string: encoded pairs sorted by key, then value, joined
/// with `&`.
pub fn normalize_parameters<'a, I>(params: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut encoded = params
		.into_iter()
		.map(|(key, value)| (percent_encode(key), percent_encode(value)))
		.collect::<Vec<_>>();

	encoded.sort();

	let mut buf = String::new();

	for (idx, (key, value)) in encoded.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(key);
		buf.push('=');
		buf.push_str(value);
	}

	buf
}

/// Returns the base string URI: scheme, authority, and path with query and fragment removed.
///
/// Default ports are dropped and the scheme/host are lowercased by [`Url`] parsing already.
pub fn base_string_uri(url: &Url) -> String {
	let mut base = url.clone();

	base.set_query(None);
	base.set_fragment(None);

	base.to_string()
}

/// Assembles the signature base string:
/// `METHOD&encode(base_uri)&encode(normalized_parameters)`.
pub fn signature_base_string<'a, I>(method: &str, url: &Url, params: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		percent_encode(&base_string_uri(url)),
		percent_encode(&normalize_parameters(params))
	)
}

/// Builds the signing key `encode(consumer_secret)&encode(token_secret)`.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
	format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret.unwrap_or("")))
}

/// Computes `oauth_signature` for a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signer {
	/// Method used to turn the base string into a signature.
	pub method: SignatureMethod,
}
impl Signer {
	/// Creates a signer for the provided method.
	pub fn new(method: SignatureMethod) -> Self {
		Self { method }
	}

	/// Signs an already parsed URL. `params` must contain every OAuth protocol parameter
	/// (except `oauth_signature`), the URL query pairs, and any form body pairs.
	pub fn sign_url<'a, I>(
		&self,
		method: &str,
		url: &Url,
		params: I,
		consumer_secret: &str,
		token_secret: Option<&str>,
	) -> Result<String>
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let key = signing_key(consumer_secret, token_secret);

		match self.method {
			SignatureMethod::HmacSha1 => {
				let base = signature_base_string(method, url, params);

				hmac_sha1(&key, &base)
			},
			SignatureMethod::Plaintext => Ok(key),
		}
	}

	/// Parses `url` then signs it; fails with [`Error::InvalidArgument`] when the URL is
	/// unparseable.
	pub fn sign<'a, I>(
		&self,
		method: &str,
		url: &str,
		params: I,
		consumer_secret: &str,
		token_secret: Option<&str>,
	) -> Result<String>
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let url = Url::parse(url)
			.map_err(|e| Error::invalid_argument(format!("URL `{url}` is malformed: {e}")))?;

		self.sign_url(method, &url, params, consumer_secret, token_secret)
	}
}

fn hmac_sha1(key: &str, data: &str) -> Result<String> {
	let mut mac = <HmacSha1 as Mac>::new_from_slice(key.as_bytes())
		.map_err(|e| Error::invalid_argument(format!("signing key rejected: {e}")))?;

	mac.update(data.as_bytes());

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
