//! Store-backed handshake helpers for services that keep the temporary secret server-side.
//!
//! [`Client::begin_authorization`] runs leg 1 and parks the temporary secret in a caller
//! supplied [`SecretStore`] keyed by `oauth_token`, handing back only what the browser may
//! see. [`Client::complete_authorization`] takes the secret back out (one-shot) and runs
//! leg 2 with the `oauth_token`/`oauth_verifier` pair from the provider redirect.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AuthorizationRedirect},
	flows::{Client, common},
	http::ProviderHttpClient,
	oauth::TransportErrorMapper,
	store::SecretStore,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Obtains a request token, stores its secret, and returns the redirect target.
	pub async fn begin_authorization(
		&self,
		store: &dyn SecretStore,
	) -> Result<AuthorizationRedirect> {
		let request_token = self.get_request_token().await?;

		store.put(&request_token.oauth_token, request_token.oauth_token_secret.clone()).await?;

		Ok(request_token.into_redirect())
	}

	/// Completes the handshake for a provider redirect.
	///
	/// Empty arguments fail without touching the store. Otherwise the stored secret is
	/// removed before the exchange, so it is consumed whatever the outcome; an unknown or
	/// expired `oauth_token` fails with [`Error::InvalidArgument`].
	pub async fn complete_authorization(
		&self,
		store: &dyn SecretStore,
		oauth_token: &str,
		oauth_verifier: &str,
	) -> Result<AccessToken> {
		common::require("oauth_token", oauth_token)?;
		common::require("oauth_verifier", oauth_verifier)?;

		let secret = store.take(oauth_token).await?.ok_or_else(|| {
			Error::invalid_argument("no temporary secret is stored for `oauth_token`")
		})?;

		self.get_access_token(oauth_token, secret.expose(), oauth_verifier).await
	}
}
