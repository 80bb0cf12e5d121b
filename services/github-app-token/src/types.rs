//! GitHub API wire types
//!
//! Only the fields the exchange needs are modelled; everything else in the
//! responses is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Account (user or organization) an app is installed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
}

/// An installation of the GitHub App, from `GET /app/installations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    #[serde(default)]
    pub id: u64,
    pub account: Account,
    /// Endpoint that mints access tokens for this installation
    pub access_tokens_url: String,
    #[serde(default)]
    pub app_id: Option<u64>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub repository_selection: Option<String>,
}

/// Installation access token, from `POST <access_tokens_url>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Permission name → access level (e.g. `contents` → `read`)
    #[serde(default)]
    pub permissions: BTreeMap<String, String>,
    #[serde(default)]
    pub repository_selection: Option<String>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
            permissions: BTreeMap::new(),
            repository_selection: None,
        }
    }
}

/// Result of a successful exchange, handed back to the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    /// Account login the installation belongs to
    pub account_login: String,
    pub installation_id: u64,
    pub access_token: AccessToken,
}
