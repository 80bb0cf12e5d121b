//! Installation token exchange
//!
//! GitHub Apps use two types of authentication:
//! 1. App JWT - short-lived JWT signed with the app's private key, used to
//!    list installations and mint tokens
//! 2. Installation access token - scoped to one installation's repositories
//!
//! The exchange runs strictly in order: sign a JWT, find the installation
//! for the account, then redeem it for an access token. The first failure
//! ends the exchange.

use tracing::{debug, info};

use crate::auth::AppSigner;
use crate::client::ApiClient;
use crate::config::ExchangeConfig;
use crate::error::ExchangeError;
use crate::types::{Installation, ResolvedCredential};

/// Runs the JWT → installation → access token exchange
pub struct TokenExchange<'a> {
    signer: &'a AppSigner,
    client: &'a ApiClient,
}

impl<'a> TokenExchange<'a> {
    pub fn new(signer: &'a AppSigner, client: &'a ApiClient) -> Self {
        Self { signer, client }
    }

    /// Resolve an access token for the installation on `account_login`
    pub async fn resolve_access_token(
        &self,
        app_id: &str,
        account_login: &str,
    ) -> Result<ResolvedCredential, ExchangeError> {
        debug!("Generating JWT for GitHub App {}", app_id);
        let assertion = self.signer.issue(app_id)?;

        let installations = self
            .client
            .list_installations(assertion.as_str())
            .await
            .map_err(ExchangeError::InstallationLookup)?;
        debug!("App has {} installation(s)", installations.len());

        let installation = find_installation(&installations, account_login).ok_or_else(|| {
            ExchangeError::InstallationNotFound {
                login: account_login.to_string(),
            }
        })?;

        info!(
            "🔑 Exchanging JWT for installation token (installation: {}, account: {})",
            installation.id, account_login
        );
        let access_token = self
            .client
            .create_access_token(installation, assertion.as_str())
            .await
            .map_err(ExchangeError::TokenRedemption)?;

        info!(
            "✅ Token generated successfully (expires: {})",
            access_token.expires_at
        );

        Ok(ResolvedCredential {
            account_login: account_login.to_string(),
            installation_id: installation.id,
            access_token,
        })
    }
}

/// First installation whose account login matches exactly
///
/// GitHub logins are case-insensitive but the match here is not; pass the
/// login as GitHub reports it.
pub fn find_installation<'i>(
    installations: &'i [Installation],
    account_login: &str,
) -> Option<&'i Installation> {
    installations
        .iter()
        .find(|installation| installation.account.login == account_login)
}

/// Load the key, then resolve the access token described by `config`
///
/// A bad key fails here, before any request is made.
pub async fn resolve(config: &ExchangeConfig) -> Result<ResolvedCredential, ExchangeError> {
    let signer = AppSigner::load(&config.private_key)?;
    let client = ApiClient::new(config.api_url.clone());

    TokenExchange::new(&signer, &client)
        .resolve_access_token(&config.app_id, &config.account_login)
        .await
}
