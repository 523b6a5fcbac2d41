//! Leg 2: verifier exchange for the access credential pair.

// crates.io
use oauth2::http::Method;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RequestToken},
	flows::{
		Client,
		common::{self, TokenForm},
	},
	http::ProviderHttpClient,
	oauth::TransportErrorMapper,
	obs::FlowKind,
	request::{RequestBuilder, RequestPurpose},
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges the temporary pair and verifier for the access pair.
	///
	/// All three arguments must be non-empty; otherwise [`Error::InvalidArgument`] is returned
	/// before any network I/O. Whatever the outcome, the temporary secret must not be reused.
	pub async fn get_access_token(
		&self,
		oauth_token: &str,
		oauth_token_secret: &str,
		oauth_verifier: &str,
	) -> Result<AccessToken> {
		const FLOW: FlowKind = FlowKind::AccessToken;

		common::observe(FLOW, "get_access_token", &self.descriptor.name, async move {
			common::require("oauth_token", oauth_token)?;
			common::require("oauth_token_secret", oauth_token_secret)?;
			common::require("oauth_verifier", oauth_verifier)?;

			let signed = RequestBuilder::new(
				&self.config.consumer,
				RequestPurpose::AccessToken { token: oauth_token, verifier: oauth_verifier },
				Method::POST,
				self.descriptor.endpoints.access_token.clone(),
			)
			.for_descriptor(&self.descriptor)
			.token_secret(oauth_token_secret)
			.build()?;
			let response = common::ensure_token_success(FLOW, self.send(FLOW, signed).await?)?;
			let form = TokenForm::parse(&response.body)?;

			Ok(AccessToken { access_token: form.token, access_token_secret: form.secret })
		})
		.await
	}

	/// Same as [`Client::get_access_token`], consuming the temporary pair so it cannot be
	/// replayed.
	pub async fn exchange_request_token(
		&self,
		request_token: RequestToken,
		oauth_verifier: &str,
	) -> Result<AccessToken> {
		self.get_access_token(
			&request_token.oauth_token,
			request_token.oauth_token_secret.expose(),
			oauth_verifier,
		)
		.await
	}
}
