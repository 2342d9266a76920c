//! Domain error types
//!
//! Protocol-level failures produced by the provider-facing transport and
//! surfaced unchanged to the flow layer. Flow-level errors (state mismatch,
//! reentrancy) live in the application crate.

use thiserror::Error;

/// Errors fetching or validating the provider's discovery document.
///
/// Discovery is fatal to login until resolved: the interactive login action
/// must stay disabled while no valid document is available. No retry is
/// performed internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The well-known endpoint could not be reached.
    #[error("discovery endpoint unreachable: {0}")]
    Unreachable(String),

    /// The well-known endpoint answered with a non-success status.
    #[error("discovery endpoint returned HTTP {status}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
    },

    /// The document body could not be parsed.
    #[error("malformed discovery document: {0}")]
    Malformed(String),

    /// A required endpoint URL is missing from the document.
    #[error("discovery document missing required endpoint: {0}")]
    MissingEndpoint(&'static str),

    /// The advertised issuer does not match the issuer the document was
    /// fetched from.
    #[error("issuer mismatch: expected '{expected}', got '{advertised}'")]
    IssuerMismatch {
        /// The issuer URL discovery was requested for.
        expected: String,
        /// The issuer the document advertises.
        advertised: String,
    },
}

/// Errors from the token endpoint (code exchange and refresh).
///
/// The provider's error code is retained so callers can tell a dead grant
/// (`invalid_grant`, terminal) from a transient failure they may retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token endpoint could not be reached.
    #[error("token endpoint unreachable: {0}")]
    Network(String),

    /// The token endpoint rejected the grant.
    #[error("token endpoint returned HTTP {status}{}", .code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
        /// Provider error code from the response body (e.g. `invalid_grant`),
        /// when one was present.
        code: Option<String>,
        /// Provider `error_description`, when present.
        description: Option<String>,
    },

    /// The response was a success but its body was unusable (e.g. missing
    /// the access token).
    #[error("malformed token response: {0}")]
    Malformed(String),
}

impl TokenError {
    /// Returns true if this failure means the grant is dead and the user
    /// must log in again.
    ///
    /// Callers are responsible for clearing the session and forcing a fresh
    /// login when this returns true; the core never clears state on its own
    /// in response to a refresh failure.
    #[must_use]
    pub fn requires_reauth(&self) -> bool {
        matches!(self, Self::Rejected { code: Some(code), .. } if code == "invalid_grant")
    }

    /// Returns true if the caller may retry the same call.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        !self.requires_reauth()
    }
}

/// Errors from the token revocation endpoint.
///
/// A failed revocation blocks logout: the session is retained rather than
/// silently discarding a token that may still be valid at the provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevocationError {
    /// The revocation endpoint could not be reached.
    #[error("revocation endpoint unreachable: {0}")]
    Network(String),

    /// The provider reported the revocation failed.
    #[error("revocation endpoint returned HTTP {status}")]
    Rejected {
        /// The HTTP status code returned.
        status: u16,
    },
}
