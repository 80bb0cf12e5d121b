//! Exchange configuration

use crate::client::GITHUB_API;

/// Everything needed to resolve an installation access token
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// GitHub App ID, used as the JWT issuer
    pub app_id: String,
    /// Key file path, PEM text, or base64-encoded PEM
    pub private_key: String,
    /// User or organization login the app is installed on
    pub account_login: String,
    /// Base URL of the REST API
    pub api_url: String,
}

impl ExchangeConfig {
    /// Create a config targeting api.github.com
    pub fn new(
        app_id: impl Into<String>,
        private_key: impl Into<String>,
        account_login: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            private_key: private_key.into(),
            account_login: account_login.into(),
            api_url: GITHUB_API.to_string(),
        }
    }

    /// Point the exchange at another API (GitHub Enterprise Server)
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}
