//! Leg 1: temporary credential acquisition.

// crates.io
use oauth2::http::Method;
// self
use crate::{
	_prelude::*,
	auth::RequestToken,
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
	/// POSTs to the request-token endpoint with the configured callback and returns the
	/// temporary pair plus the authorization page URL for the user.
	///
	/// Each call signs with a fresh nonce; the returned secret belongs to this call only.
	pub async fn get_request_token(&self) -> Result<RequestToken> {
		const FLOW: FlowKind = FlowKind::RequestToken;

		common::observe(FLOW, "get_request_token", &self.descriptor.name, async move {
			let signed = RequestBuilder::new(
				&self.config.consumer,
				RequestPurpose::RequestToken { callback: &self.config.callback_url },
				Method::POST,
				self.descriptor.endpoints.request_token.clone(),
			)
			.for_descriptor(&self.descriptor)
			.build()?;
			let response = common::ensure_token_success(FLOW, self.send(FLOW, signed).await?)?;
			let form = TokenForm::parse(&response.body)?;
			let redirect_url = self.descriptor.authorization_url(&form.token);

			Ok(RequestToken {
				oauth_token: form.token,
				oauth_token_secret: form.secret,
				redirect_url,
				callback_confirmed: form.callback_confirmed,
			})
		})
		.await
	}
}
