//! Thread-safe in-memory [`SecretStore`] with expiry, for single-process deployments and tests.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	store::{SecretStore, StoreFuture},
};

#[derive(Clone, Debug)]
struct Entry {
	secret: TokenSecret,
	expires_at: OffsetDateTime,
}

type StoreMap = Arc<RwLock<HashMap<String, Entry>>>;

/// In-process secret store; entries expire after a fixed TTL (10 minutes by default).
#[derive(Clone, Debug)]
pub struct MemoryStore {
	map: StoreMap,
	ttl: Duration,
}
impl MemoryStore {
	/// Lifetime of a stored secret unless overridden.
	pub const DEFAULT_TTL: Duration = Duration::minutes(10);

	/// Creates a store whose entries expire after `ttl`.
	pub fn with_ttl(ttl: Duration) -> Self {
		Self { map: Default::default(), ttl }
	}

	/// Number of entries currently held, including expired ones not yet swept.
	pub fn len(&self) -> usize {
		self.map.read().len()
	}

	/// Whether the store holds no entries.
	pub fn is_empty(&self) -> bool {
		self.map.read().is_empty()
	}

	fn put_now(&self, oauth_token: &str, secret: TokenSecret, now: OffsetDateTime) {
		let mut guard = self.map.write();

		guard.retain(|_, entry| entry.expires_at > now);
		guard.insert(oauth_token.to_owned(), Entry { secret, expires_at: now + self.ttl });
	}

	fn take_now(&self, oauth_token: &str, now: OffsetDateTime) -> Option<TokenSecret> {
		self.map
			.write()
			.remove(oauth_token)
			.filter(|entry| entry.expires_at > now)
			.map(|entry| entry.secret)
	}
}
impl Default for MemoryStore {
	fn default() -> Self {
		Self::with_ttl(Self::DEFAULT_TTL)
	}
}
impl SecretStore for MemoryStore {
	fn put<'a>(&'a self, oauth_token: &'a str, secret: TokenSecret) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			self.put_now(oauth_token, secret, OffsetDateTime::now_utc());

			Ok(())
		})
	}

	fn take<'a>(&'a self, oauth_token: &'a str) -> StoreFuture<'a, Option<TokenSecret>> {
		Box::pin(async move { Ok(self.take_now(oauth_token, OffsetDateTime::now_utc())) })
	}
}
