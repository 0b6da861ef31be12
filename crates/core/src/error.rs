#![allow(missing_docs)]

//! Error taxonomy shared by discovery, the session, and the lookups.

use std::fmt;

use thiserror::Error;

/// Launch-argument field (or the process itself) that discovery could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    /// The client process is not running.
    Process,
    /// `--app-port`
    Port,
    /// `--remoting-auth-token`
    Token,
    /// `--rso_platform_id`
    Region,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CredentialField::Process => "client process",
            CredentialField::Port => "app port",
            CredentialField::Token => "auth token",
            CredentialField::Region => "platform id",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the core. None of them are retried internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("credential not found: {field}")]
    CredentialNotFound { field: CredentialField },

    #[error("failed to query the process table: {0}")]
    ProcessQuery(#[source] std::io::Error),

    #[error("session has not been initialised")]
    ConfigNotInitialized,

    #[error("invalid port: {0}")]
    InvalidPort(u16),

    #[error("authorization token is empty")]
    EmptyToken,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("http request failed with status: {code} {status}")]
    HttpStatus { code: u16, status: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("resource {id} not found")]
    NotFound { id: u32 },
}

impl Error {
    pub(crate) fn missing(field: CredentialField) -> Self {
        Error::CredentialNotFound { field }
    }
}

/// Convenience alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;
