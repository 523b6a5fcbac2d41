//! Upwork's OAuth 1.0a endpoints.

// self
use crate::{
	_prelude::*,
	provider::{ProviderDescriptor, ProviderDescriptorError},
};

/// Upwork temporary credential endpoint.
pub const REQUEST_TOKEN_URL: &str = "https://www.upwork.com/api/auth/v1/oauth/token/request";
/// Upwork token credential endpoint.
pub const ACCESS_TOKEN_URL: &str = "https://www.upwork.com/api/auth/v1/oauth/token/access";
/// Upwork user authorization page.
pub const AUTHORIZATION_URL: &str = "https://www.upwork.com/services/api/auth";

impl ProviderDescriptor {
	/// Descriptor for Upwork (`HMAC-SHA1`, Authorization header).
	pub fn upwork() -> Result<Self, ProviderDescriptorError> {
		let parse = |endpoint: &'static str, raw: &str| {
			Url::parse(raw).map_err(|_| ProviderDescriptorError::InvalidEndpoint {
				endpoint,
				url: raw.to_owned(),
			})
		};

		ProviderDescriptor::builder("upwork")
			.request_token_endpoint(parse("request_token", REQUEST_TOKEN_URL)?)
			.access_token_endpoint(parse("access_token", ACCESS_TOKEN_URL)?)
			.authorization_endpoint(parse("authorization", AUTHORIZATION_URL)?)
			.build()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn upwork_descriptor_builds_and_embeds_token_in_authorization_url() {
		let descriptor = ProviderDescriptor::upwork().expect("Upwork descriptor should build.");

		assert_eq!(descriptor.endpoints.request_token.as_str(), REQUEST_TOKEN_URL);
		assert_eq!(
			descriptor.authorization_url("T1").as_str(),
			"https://www.upwork.com/services/api/auth?oauth_token=T1"
		);
	}
}
