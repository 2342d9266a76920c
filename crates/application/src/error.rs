//! Application error types
//!
//! Flow-level failures. Each leaves the observable session exactly as it
//! was before the call: no phantom tokens, no half-cleared state.

use portico_domain::{RevocationError, TokenError};
use thiserror::Error;

/// Errors aborting a login attempt.
///
/// Every variant returns the flow to idle without touching the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// A login flow is already awaiting the interactive user-agent. The
    /// outstanding attempt is unaffected.
    #[error("a login flow is already in progress")]
    AlreadyActive,

    /// The provider rejected the authorization request.
    #[error("authorization rejected by provider: {code}")]
    Provider {
        /// Provider error code (e.g. `access_denied`).
        code: String,
        /// Provider error description, when present.
        description: Option<String>,
    },

    /// The `state` returned with the authorization response did not match
    /// the one sent, indicating a cross-request injection attempt.
    #[error("authorization response state '{received}' does not match request state '{expected}'")]
    StateMismatch {
        /// The state value generated for this attempt.
        expected: String,
        /// The state value the response carried.
        received: String,
    },

    /// An endpoint URL from the discovery document could not be parsed.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// The code exchange at the token endpoint failed.
    #[error(transparent)]
    Exchange(#[from] TokenError),
}

/// Errors aborting a refresh.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    /// The current session holds no refresh token.
    #[error("session has no refresh token")]
    NoRefreshToken,

    /// The token endpoint rejected or failed the refresh grant. Check
    /// [`TokenError::requires_reauth`] to distinguish a dead grant from a
    /// transient failure.
    #[error(transparent)]
    Exchange(#[from] TokenError),
}

/// Errors aborting a logout.
///
/// The session is retained on every variant; tokens are never discarded
/// while still potentially valid at the provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogoutError {
    /// Token revocation failed; the end-session step was not reached.
    #[error("logout blocked: {0}")]
    Revocation(#[from] RevocationError),

    /// The end-session endpoint URL could not be parsed.
    #[error("invalid end-session URL: {0}")]
    InvalidEndpoint(String),
}
