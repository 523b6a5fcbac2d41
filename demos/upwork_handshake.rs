//! Runs the Upwork three-legged handshake from a terminal.
//!
//! 1. Export `UPWORK_CONSUMER_KEY`, `UPWORK_CONSUMER_SECRET`, and `UPWORK_CALLBACK_URL`.
//! 2. Open the printed authorization URL and approve access.
//! 3. Paste the `oauth_verifier` from the callback redirect when prompted.

// std
use std::io::{self, BufRead, Write};
// crates.io
use color_eyre::Result;
// self
use oauth1_broker::{
	config::ClientConfig,
	flows::{ApiMethod, Client},
	store::MemoryStore,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = Client::upwork(ClientConfig::from_env("UPWORK")?)?;
	let store = MemoryStore::default();
	let redirect = client.begin_authorization(&store).await?;

	println!("Authorize the application at {}.", redirect.redirect_url);
	print!("oauth_verifier: ");
	io::stdout().flush()?;

	let mut verifier = String::new();

	io::stdin().lock().read_line(&mut verifier)?;

	let access =
		client.complete_authorization(&store, &redirect.oauth_token, verifier.trim()).await?;

	println!("Access credentials issued: {access:?}.");

	let profile = client
		.call_with(&access, "https://www.upwork.com/api/auth/v1/info.json", ApiMethod::Get, None)
		.await?;

	println!("Authenticated user info: {profile:?}.");

	Ok(())
}
