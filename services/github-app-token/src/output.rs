//! Shell output for a resolved credential
//!
//! Renders the commands that make git (and optionally go) authenticate as
//! the installation, or a JSON summary of the token.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::ResolvedCredential;

/// Host used in git URLs when none is given
pub const DEFAULT_GIT_HOST: &str = "github.com";

/// `git config` line that rewrites `https://<host>/<account>` to use the token
pub fn git_config_command(credential: &ResolvedCredential, git_host: &str) -> String {
    let account = &credential.account_login;
    format!(
        "git config --global url.\"https://x-access-token:{}@{}/{}\".insteadOf \"https://{}/{}\"",
        credential.access_token.token, git_host, account, git_host, account
    )
}

/// `go env` line that marks the account's modules as private
pub fn go_private_command(credential: &ResolvedCredential, git_host: &str) -> String {
    format!(
        "go env -w GOPRIVATE={}/{}/*,$(go env GOPRIVATE)",
        git_host, credential.account_login
    )
}

/// Shell commands to eval, one per line
pub fn shell_commands(credential: &ResolvedCredential, git_host: &str, go_private: bool) -> String {
    let mut lines = vec![git_config_command(credential, git_host)];
    if go_private {
        lines.push(go_private_command(credential, git_host));
    }
    lines.join("\n")
}

#[derive(Debug, Serialize)]
struct TokenOutput<'a> {
    token: &'a str,
    account: &'a str,
    installation_id: u64,
    expires_at: DateTime<Utc>,
    repository_selection: Option<&'a str>,
    permissions: &'a BTreeMap<String, String>,
}

/// Pretty-printed JSON summary of the credential
pub fn json_output(credential: &ResolvedCredential) -> serde_json::Result<String> {
    let token = &credential.access_token;
    let output = TokenOutput {
        token: &token.token,
        account: &credential.account_login,
        installation_id: credential.installation_id,
        expires_at: token.expires_at,
        repository_selection: token.repository_selection.as_deref(),
        permissions: &token.permissions,
    };
    serde_json::to_string_pretty(&output)
}
