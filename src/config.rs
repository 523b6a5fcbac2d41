//! Consumer identity and callback configuration, validated once at construction.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Immutable consumer identity issued by the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerCredentials {
	key: String,
	secret: TokenSecret,
}
impl ConsumerCredentials {
	/// Validates and wraps the consumer key/secret pair.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConfigError> {
		let key = key.into();
		let secret = secret.into();

		if key.trim().is_empty() {
			return Err(ConfigError::MissingConsumerKey);
		}
		if secret.is_empty() {
			return Err(ConfigError::MissingConsumerSecret);
		}

		Ok(Self { key, secret: TokenSecret::new(secret) })
	}

	/// Returns the `oauth_consumer_key` value.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the consumer secret. Callers must avoid logging this string.
	pub fn secret(&self) -> &TokenSecret {
		&self.secret
	}
}
impl Debug for ConsumerCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConsumerCredentials")
			.field("key", &self.key)
			.field("secret", &self.secret)
			.finish()
	}
}

/// Client configuration: consumer identity plus the callback URL sent on the request-token leg.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Consumer identity used to sign every request.
	pub consumer: ConsumerCredentials,
	/// `oauth_callback` value the provider redirects to after authorization.
	pub callback_url: Url,
}
impl ClientConfig {
	/// Environment suffix for the consumer key.
	pub const CONSUMER_KEY_VAR: &'static str = "CONSUMER_KEY";
	/// Environment suffix for the consumer secret.
	pub const CONSUMER_SECRET_VAR: &'static str = "CONSUMER_SECRET";
	/// Environment suffix for the callback URL.
	pub const CALLBACK_URL_VAR: &'static str = "CALLBACK_URL";

	/// Validates all three inputs; any absence is a [`ConfigError`].
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		callback_url: &str,
	) -> Result<Self, ConfigError> {
		let consumer = ConsumerCredentials::new(consumer_key, consumer_secret)?;

		if callback_url.trim().is_empty() {
			return Err(ConfigError::MissingCallback);
		}

		let callback_url = Url::parse(callback_url)
			.map_err(|source| ConfigError::InvalidCallback { source })?;

		Ok(Self { consumer, callback_url })
	}

	/// Reads `{PREFIX}_CONSUMER_KEY`, `{PREFIX}_CONSUMER_SECRET`, and `{PREFIX}_CALLBACK_URL`
	/// from the process environment.
	pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
		Self::from_lookup(prefix, |name| std::env::var(name).ok())
	}

	/// Same as [`ClientConfig::from_env`] with an injectable variable lookup.
	pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |suffix: &str| {
			let name = format!("{prefix}_{suffix}");

			lookup(&name).ok_or(ConfigError::MissingEnv { name })
		};
		let key = read(Self::CONSUMER_KEY_VAR)?;
		let secret = read(Self::CONSUMER_SECRET_VAR)?;
		let callback = read(Self::CALLBACK_URL_VAR)?;

		Self::new(key, secret, &callback)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn construction_fails_fast_on_missing_fields() {
		assert!(matches!(
			ClientConfig::new("", "CS", "https://app.test/cb"),
			Err(ConfigError::MissingConsumerKey)
		));
		assert!(matches!(
			ClientConfig::new("CK", "", "https://app.test/cb"),
			Err(ConfigError::MissingConsumerSecret)
		));
		assert!(matches!(ClientConfig::new("CK", "CS", ""), Err(ConfigError::MissingCallback)));
		assert!(matches!(
			ClientConfig::new("CK", "CS", "not a url"),
			Err(ConfigError::InvalidCallback { .. })
		));

		let config = ClientConfig::new("CK", "CS", "https://app.test/cb")
			.expect("Complete configuration should validate.");

		assert_eq!(config.consumer.key(), "CK");
		assert_eq!(config.consumer.secret().expose(), "CS");
		assert_eq!(config.callback_url.as_str(), "https://app.test/cb");
	}

	#[test]
	fn lookup_reads_prefixed_variables() {
		let vars = HashMap::from([
			("UPWORK_CONSUMER_KEY".to_owned(), "CK".to_owned()),
			("UPWORK_CONSUMER_SECRET".to_owned(), "CS".to_owned()),
			(
				"UPWORK_CALLBACK_URL".to_owned(),
				"http://localhost:3000/auth/upwork/callback".to_owned(),
			),
		]);
		let config = ClientConfig::from_lookup("UPWORK", |name| vars.get(name).cloned())
			.expect("Lookup-backed configuration should validate.");

		assert_eq!(config.consumer.key(), "CK");
		assert_eq!(config.callback_url.path(), "/auth/upwork/callback");

		let err = ClientConfig::from_lookup("MISSING", |name| vars.get(name).cloned())
			.expect_err("Unset variables should be reported.");

		assert!(matches!(err, ConfigError::MissingEnv { name } if name == "MISSING_CONSUMER_KEY"));
	}

	#[test]
	fn consumer_debug_redacts_secret() {
		let consumer =
			ConsumerCredentials::new("CK", "CS").expect("Consumer fixture should validate.");

		assert!(!format!("{consumer:?}").contains("\"CS\""));
	}
}
