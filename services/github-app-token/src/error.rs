//! Error types for the token exchange
//!
//! Each stage of the exchange has its own error so the CLI can tell a
//! missing installation apart from a broken network or a bad key.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading the GitHub App private key
#[derive(Debug, Error)]
pub enum KeyLoadError {
    /// The key source was empty
    #[error("private key source is empty")]
    Empty,

    /// The key file exists but could not be read
    #[error("can't read key file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key looked like base64-encoded PEM but did not decode
    #[error("can't decode base64 private key")]
    Base64(#[from] base64::DecodeError),

    /// The key material is not an RSA private key in PEM format
    #[error("could not parse private key as RSA PEM")]
    Parse(#[source] jsonwebtoken::errors::Error),
}

/// Errors signing an app assertion
#[derive(Debug, Error)]
#[error("failed to sign app JWT")]
pub struct SigningError(#[from] pub jsonwebtoken::errors::Error);

/// Errors talking to the GitHub REST API
///
/// Status failures carry no status code; it is only logged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (or the body could not be read)
    #[error("{method} {url} failed")]
    Transport {
        method: reqwest::Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a status code of 300 or above
    #[error("{method} {url} was rejected by the API")]
    Status { method: reqwest::Method, url: String },

    /// The response body did not match the expected shape
    #[error("failed to decode response from {method} {url}")]
    Decode {
        method: reqwest::Method,
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Stage of the exchange that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    KeyLoad,
    Signing,
    InstallationLookup,
    NameNotFound,
    TokenRedemption,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::KeyLoad => write!(f, "failed to load the app private key"),
            Stage::Signing => write!(f, "failed to generate the app JWT"),
            Stage::InstallationLookup => write!(f, "failed to list app installations"),
            Stage::NameNotFound => write!(f, "can't find an app installation for that name"),
            Stage::TokenRedemption => write!(f, "failed to generate access token"),
        }
    }
}

/// Errors from the full key → installation → token exchange
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error(transparent)]
    KeyLoad(#[from] KeyLoadError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    InstallationLookup(ApiError),

    /// No installation of the app belongs to the requested account
    #[error("no app installation found for account '{login}'")]
    InstallationNotFound { login: String },

    #[error(transparent)]
    TokenRedemption(ApiError),
}

impl ExchangeError {
    /// The stage this error stopped the exchange at
    pub fn stage(&self) -> Stage {
        match self {
            ExchangeError::KeyLoad(_) => Stage::KeyLoad,
            ExchangeError::Signing(_) => Stage::Signing,
            ExchangeError::InstallationLookup(_) => Stage::InstallationLookup,
            ExchangeError::InstallationNotFound { .. } => Stage::NameNotFound,
            ExchangeError::TokenRedemption(_) => Stage::TokenRedemption,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ExchangeError::InstallationNotFound { .. })
    }
}
