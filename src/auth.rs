//! Credential models: the temporary request-token pair, the long-lived access pair, and the
//! redacting secret wrapper both rely on.

pub mod credential;
pub mod secret;

pub use credential::*;
pub use secret::*;
