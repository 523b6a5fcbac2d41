//! Credential pairs produced by the two handshake legs.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Temporary credential pair returned by the request-token leg.
///
/// The pair is short-lived: hand `oauth_token_secret` to whatever carries it to the
/// callback handler, send the user to `redirect_url`, and discard the pair once the
/// access-token exchange has been attempted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestToken {
	/// Temporary `oauth_token`.
	pub oauth_token: String,
	/// Temporary `oauth_token_secret`.
	pub oauth_token_secret: TokenSecret,
	/// Provider authorization page embedding `oauth_token`.
	#[serde(rename = "redirectURL")]
	pub redirect_url: Url,
	/// Whether the provider echoed `oauth_callback_confirmed=true`.
	pub callback_confirmed: bool,
}
impl RequestToken {
	/// Drops the secret, keeping only what is safe to hand to the browser.
	pub fn into_redirect(self) -> AuthorizationRedirect {
		AuthorizationRedirect { oauth_token: self.oauth_token, redirect_url: self.redirect_url }
	}
}
impl Debug for RequestToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestToken")
			.field("oauth_token", &self.oauth_token)
			.field("oauth_token_secret", &self.oauth_token_secret)
			.field("redirect_url", &self.redirect_url.as_str())
			.field("callback_confirmed", &self.callback_confirmed)
			.finish()
	}
}

/// Secret-free half of a [`RequestToken`], returned when the secret went into a
/// [`SecretStore`](crate::store::SecretStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRedirect {
	/// Temporary `oauth_token`, also the key under which the secret was stored.
	pub oauth_token: String,
	/// Provider authorization page embedding `oauth_token`.
	#[serde(rename = "redirectURL")]
	pub redirect_url: Url,
}

/// Long-lived access credential pair. Owned by the caller once returned; the broker never
/// caches or mutates it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
	/// Access `oauth_token`.
	pub access_token: String,
	/// Access `oauth_token_secret`.
	pub access_token_secret: TokenSecret,
}
impl AccessToken {
	/// Creates a pair from raw strings.
	pub fn new(access_token: impl Into<String>, access_token_secret: impl Into<String>) -> Self {
		Self {
			access_token: access_token.into(),
			access_token_secret: TokenSecret::new(access_token_secret),
		}
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &self.access_token)
			.field("access_token_secret", &self.access_token_secret)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn access_token_serializes_with_camel_case_keys() {
		let payload = serde_json::to_value(AccessToken::new("AT", "AS"))
			.expect("AccessToken should serialize to JSON.");

		assert_eq!(payload, serde_json::json!({ "accessToken": "AT", "accessTokenSecret": "AS" }));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let request = RequestToken {
			oauth_token: "T1".into(),
			oauth_token_secret: TokenSecret::new("S1"),
			redirect_url: Url::parse("https://provider/auth?oauth_token=T1")
				.expect("Redirect fixture should parse."),
			callback_confirmed: true,
		};
		let rendered = format!("{request:?} {:?}", AccessToken::new("AT", "AS"));

		assert!(rendered.contains("T1"));
		assert!(rendered.contains("AT"));
		assert!(!rendered.contains("S1"));
		assert!(!rendered.contains("\"AS\""));

		let redirect = request.into_redirect();

		assert_eq!(redirect.redirect_url.as_str(), "https://provider/auth?oauth_token=T1");
	}
}
