// self
use crate::{
	_prelude::*,
	provider::{ParameterTransport, ProviderDescriptor, ProviderEndpoints},
	sign::SignatureMethod,
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Request-token endpoint is mandatory.
	#[error("Missing request-token endpoint.")]
	MissingRequestTokenEndpoint,
	/// Access-token endpoint is mandatory.
	#[error("Missing access-token endpoint.")]
	MissingAccessTokenEndpoint,
	/// Authorization page is mandatory.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Endpoint string could not be parsed as a URL.
	#[error("The {endpoint} endpoint is not a valid URL: {url}.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Raw endpoint value.
		url: String,
	},
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Token endpoints carry their parameters in the signature, not in a query string.
	#[error("The {endpoint} endpoint must not carry a query string: {url}.")]
	EndpointHasQuery {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Realm values are quoted into the header and cannot contain quotes.
	#[error("Realm must not contain double quotes.")]
	InvalidRealm,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Name for the descriptor being constructed.
	pub name: String,
	/// Request-token endpoint.
	pub request_token_endpoint: Option<Url>,
	/// Access-token endpoint.
	pub access_token_endpoint: Option<Url>,
	/// Authorization page.
	pub authorization_endpoint: Option<Url>,
	/// Signature method for every request.
	pub signature_method: SignatureMethod,
	/// Placement of protocol parameters.
	pub parameter_transport: ParameterTransport,
	/// Optional Authorization header realm.
	pub realm: Option<String>,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			request_token_endpoint: None,
			access_token_endpoint: None,
			authorization_endpoint: None,
			signature_method: SignatureMethod::default(),
			parameter_transport: ParameterTransport::default(),
			realm: None,
		}
	}

	/// Sets the request-token endpoint.
	pub fn request_token_endpoint(mut self, url: Url) -> Self {
		self.request_token_endpoint = Some(url);

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token_endpoint(mut self, url: Url) -> Self {
		self.access_token_endpoint = Some(url);

		self
	}

	/// Sets the authorization page.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Overrides the signature method (defaults to `HMAC-SHA1`).
	pub fn signature_method(mut self, method: SignatureMethod) -> Self {
		self.signature_method = method;

		self
	}

	/// Overrides the parameter transport (defaults to the Authorization header).
	pub fn parameter_transport(mut self, transport: ParameterTransport) -> Self {
		self.parameter_transport = transport;

		self
	}

	/// Sets the Authorization header realm.
	pub fn realm(mut self, realm: impl Into<String>) -> Self {
		self.realm = Some(realm.into());

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let request_token = self
			.request_token_endpoint
			.ok_or(ProviderDescriptorError::MissingRequestTokenEndpoint)?;
		let access_token =
			self.access_token_endpoint.ok_or(ProviderDescriptorError::MissingAccessTokenEndpoint)?;
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let descriptor = ProviderDescriptor {
			name: self.name,
			endpoints: ProviderEndpoints { request_token, access_token, authorization },
			signature_method: self.signature_method,
			parameter_transport: self.parameter_transport,
			realm: self.realm,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("request_token", &self.endpoints.request_token)?;
		validate_endpoint("access_token", &self.endpoints.access_token)?;
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_query_free("request_token", &self.endpoints.request_token)?;
		validate_query_free("access_token", &self.endpoints.access_token)?;

		if self.realm.as_deref().is_some_and(|realm| realm.contains('"')) {
			return Err(ProviderDescriptorError::InvalidRealm);
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() != "https" {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}

fn validate_query_free(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.query().is_some() {
		Err(ProviderDescriptorError::EndpointHasQuery { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
