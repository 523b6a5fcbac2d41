//! Shared helpers for flow implementations (argument checks, token form parsing, status
//! classification, observation).

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	oauth::ProviderResponse,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Credential pair parsed from an `application/x-www-form-urlencoded` token response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenForm {
	/// `oauth_token` value.
	pub token: String,
	/// `oauth_token_secret` value.
	pub secret: TokenSecret,
	/// `oauth_callback_confirmed=true` was present.
	pub callback_confirmed: bool,
}
impl TokenForm {
	/// Parses a token endpoint body. Missing or empty fields yield
	/// [`Error::MalformedResponse`].
	pub fn parse(body: &[u8]) -> Result<Self> {
		let fields: HashMap<String, String> =
			url::form_urlencoded::parse(body).into_owned().collect();
		let field = |name: &str| {
			fields
				.get(name)
				.filter(|value| !value.is_empty())
				.cloned()
				.ok_or_else(|| Error::malformed(format!("token response is missing `{name}`")))
		};
		let token = field("oauth_token")?;
		let secret = TokenSecret::new(field("oauth_token_secret")?);
		let callback_confirmed = fields
			.get("oauth_callback_confirmed")
			.is_some_and(|value| value.eq_ignore_ascii_case("true"));

		Ok(Self { token, secret, callback_confirmed })
	}
}

/// Rejects empty required arguments with [`Error::InvalidArgument`].
pub(crate) fn require(name: &str, value: &str) -> Result<()> {
	if value.is_empty() {
		Err(Error::invalid_argument(format!("`{name}` must not be empty")))
	} else {
		Ok(())
	}
}

/// Passes 2xx token endpoint responses through and classifies everything else.
///
/// A 401 on the request-token leg means the consumer credentials were refused; on the
/// access-token leg it usually means a stale temporary token, so it stays a
/// [`Error::ProviderError`].
pub(crate) fn ensure_token_success(
	flow: FlowKind,
	response: ProviderResponse,
) -> Result<ProviderResponse> {
	if response.is_success() {
		return Ok(response);
	}

	let body = response.body_text();

	match (flow, response.status) {
		(FlowKind::RequestToken, 401) => Err(Error::ProviderRejected { body }),
		(_, status) =>
			Err(Error::ProviderError { status, body, retry_after: response.retry_after() }),
	}
}

/// Runs `fut` inside a flow span and records attempt/outcome metrics and events.
pub(crate) async fn observe<T, F>(
	flow: FlowKind,
	stage: &'static str,
	provider: &str,
	fut: F,
) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = FlowSpan::new(flow, stage, provider);

	obs::record_flow_outcome(flow, FlowOutcome::Attempt);

	let result = span.instrument(fut).await;

	obs::record_result(flow, &result);

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, body: &str) -> ProviderResponse {
		ProviderResponse { status, body: body.as_bytes().to_vec(), metadata: None }
	}

	#[test]
	fn token_form_parses_expected_fields() {
		let form = TokenForm::parse(
			b"oauth_token=T1&oauth_token_secret=S%2B1&oauth_callback_confirmed=true",
		)
		.expect("Complete token form should parse.");

		assert_eq!(form.token, "T1");
		assert_eq!(form.secret.expose(), "S+1");
		assert!(form.callback_confirmed);
	}

	#[test]
	fn token_form_rejects_missing_or_empty_fields() {
		let err = TokenForm::parse(b"oauth_token=T1").expect_err("Missing secret should fail.");

		assert!(matches!(
			err,
			Error::MalformedResponse { ref reason } if reason.contains("oauth_token_secret")
		));

		let err = TokenForm::parse(b"oauth_token=&oauth_token_secret=S1")
			.expect_err("Empty token should fail.");

		assert!(matches!(err, Error::MalformedResponse { .. }));
		assert!(TokenForm::parse(b"<html>oops</html>").is_err());
	}

	#[test]
	fn status_classification_depends_on_the_leg() {
		assert!(matches!(
			ensure_token_success(FlowKind::RequestToken, response(401, "bad key")),
			Err(Error::ProviderRejected { ref body }) if body == "bad key"
		));
		assert!(matches!(
			ensure_token_success(FlowKind::AccessToken, response(401, "expired")),
			Err(Error::ProviderError { status: 401, .. })
		));
		assert!(matches!(
			ensure_token_success(FlowKind::RequestToken, response(500, "boom")),
			Err(Error::ProviderError { status: 500, ref body, .. }) if body == "boom"
		));
		assert!(ensure_token_success(FlowKind::AccessToken, response(200, "")).is_ok());
	}

	#[test]
	fn require_rejects_empty_values() {
		assert!(require("oauth_verifier", "V1").is_ok());
		assert!(matches!(require("oauth_verifier", ""), Err(Error::InvalidArgument { .. })));
	}
}
