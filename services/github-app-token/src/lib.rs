//! GitHub App Installation Token Library
//!
//! Exchanges a GitHub App's private key for a short-lived installation
//! access token:
//!
//! 1. Sign an RS256 JWT with the app's private key ([`auth`])
//! 2. List the app's installations and pick the one for the account ([`exchange`])
//! 3. Redeem that installation for an access token ([`client`])
//!
//! The `github-app-token` binary prints shell commands that configure git
//! (and optionally go) to use the token.
//!
//! ## Example
//!
//! ```bash
//! eval "$(github-app-token \
//!   --app-id $GITHUB_APP_ID \
//!   --app-private-key /path/to/key.pem \
//!   --name lornu-ai \
//!   --go-private)"
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod exchange;
pub mod output;
pub mod types;

pub use auth::{AppSigner, Assertion, KeySource};
pub use client::ApiClient;
pub use config::ExchangeConfig;
pub use error::{ApiError, ExchangeError, KeyLoadError, SigningError, Stage};
pub use exchange::{find_installation, resolve, TokenExchange};
pub use types::{AccessToken, Account, Installation, ResolvedCredential};
