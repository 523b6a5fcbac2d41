//! Provider descriptor data structures shared by all flows.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, sign::SignatureMethod};

/// Where OAuth protocol parameters are placed on outgoing requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterTransport {
	#[default]
	/// `Authorization: OAuth ...` header (RFC 5849 §3.5.1).
	AuthorizationHeader,
	/// Appended to the request URI query (RFC 5849 §3.5.3).
	QueryString,
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Temporary credential (request-token) endpoint.
	pub request_token: Url,
	/// Token credential (access-token) endpoint.
	pub access_token: Url,
	/// User-facing authorization page; `oauth_token` is appended as a query pair.
	pub authorization: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Human-readable provider name used in logs.
	pub name: String,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Signature method used for every request.
	pub signature_method: SignatureMethod,
	/// Placement of protocol parameters.
	pub parameter_transport: ParameterTransport,
	/// Optional `realm` attribute for the Authorization header.
	pub realm: Option<String>,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided name.
	pub fn builder(name: impl Into<String>) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(name)
	}

	/// Builds the authorization page URL for a temporary token.
	pub fn authorization_url(&self, oauth_token: &str) -> Url {
		let mut url = self.endpoints.authorization.clone();

		url.query_pairs_mut().append_pair("oauth_token", oauth_token);

		url
	}
}
