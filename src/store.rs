//! Hand-off storage for the temporary token secret between the two handshake legs.
//!
//! The broker never decides where the secret lives: callers inject a [`SecretStore`] (a
//! short-lived server-side session, a signed cookie jar, ...) and the store-backed helpers on
//! [`Client`](crate::flows::Client) `put` the secret after leg 1 and `take` it before leg 2.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Boxed future returned by [`SecretStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage contract for temporary token secrets, keyed by the temporary `oauth_token`.
pub trait SecretStore
where
	Self: Send + Sync,
{
	/// Saves (or replaces) the secret for `oauth_token`.
	fn put<'a>(&'a self, oauth_token: &'a str, secret: TokenSecret) -> StoreFuture<'a, ()>;

	/// Removes and returns the secret for `oauth_token`. A second `take` yields `None`.
	fn take<'a>(&'a self, oauth_token: &'a str) -> StoreFuture<'a, Option<TokenSecret>>;
}

/// Error type produced by [`SecretStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as _;
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_broker_error_with_source() {
		let store_error = StoreError::Backend { message: "session backend unreachable".into() };
		let broker_error: Error = store_error.clone().into();

		assert!(matches!(broker_error, Error::Storage(_)));
		assert!(broker_error.to_string().contains("session backend unreachable"));

		let source = broker_error
			.source()
			.expect("Broker error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
