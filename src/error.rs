//! Broker-level error types shared across signing, flows, providers, and stores.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Temporary secret storage failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A required argument was missing, empty, or unparseable.
	#[error("Invalid argument: {reason}.")]
	InvalidArgument {
		/// Which argument failed and why.
		reason: String,
	},
	/// Provider answered the request-token call with HTTP 401 (bad consumer credentials).
	#[error("Provider rejected the consumer credentials.")]
	ProviderRejected {
		/// Raw response body returned by the provider.
		body: String,
	},
	/// Provider answered a token endpoint with a non-2xx status.
	#[error("Token endpoint returned HTTP {status}: {body}.")]
	ProviderError {
		/// HTTP status code.
		status: u16,
		/// Raw response body returned by the provider.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Provider answered with a 2xx status but the body lacked the expected fields.
	#[error("Provider response is malformed: {reason}.")]
	MalformedResponse {
		/// Description of the missing or invalid content.
		reason: String,
	},
	/// An authenticated API call returned a non-2xx status.
	#[error("API call failed with HTTP {status}: {body}.")]
	ApiCallFailed {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Caller aborted the in-flight request.
	#[error("Request was cancelled.")]
	Cancelled,
}
impl Error {
	pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
		Self::InvalidArgument { reason: reason.into() }
	}

	pub(crate) fn malformed(reason: impl Into<String>) -> Self {
		Self::MalformedResponse { reason: reason.into() }
	}

	/// Classifies the failure so callers can choose a remediation.
	pub fn class(&self) -> ErrorClass {
		match self {
			Self::Config(_) | Self::ProviderRejected { .. } => ErrorClass::Configuration,
			Self::Transport(_)
			| Self::Storage(_)
			| Self::ProviderError { .. }
			| Self::ApiCallFailed { .. } => ErrorClass::Transient,
			Self::InvalidArgument { .. } | Self::MalformedResponse { .. } =>
				ErrorClass::InvalidInput,
			Self::Cancelled => ErrorClass::Cancelled,
		}
	}
}

/// Coarse failure classes surfaced by [`Error::class`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
	/// Consumer credentials, endpoints, or local setup are wrong; fix configuration.
	Configuration,
	/// Provider or network trouble; retrying the flow may succeed.
	Transient,
	/// Parameters were missing or stale; restart the flow from the beginning.
	InvalidInput,
	/// The caller aborted the operation.
	Cancelled,
}

/// Configuration and validation failures raised at construction time.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Callback URL cannot be parsed.
	#[error("Callback URL is invalid.")]
	InvalidCallback {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},

	/// Consumer key is absent or empty.
	#[error("Consumer key is missing.")]
	MissingConsumerKey,
	/// Consumer secret is absent or empty.
	#[error("Consumer secret is missing.")]
	MissingConsumerSecret,
	/// Callback URL is absent or empty.
	#[error("Callback URL is missing.")]
	MissingCallback,
	/// Environment variable required by [`crate::config::ClientConfig::from_env`] is not set.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name that was looked up.
		name: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Transport failed without a structured error.
	#[error("Transport failed: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
