//! Interactive user-agent port
//!
//! The browser-shaped collaborator that presents provider pages to the
//! user. This core depends on it but never implements it: the embedding
//! application supplies one (an in-app browser view, a system browser with
//! a redirect listener, a test double).

use async_trait::async_trait;

/// Terminal outcome of the interactive authorization round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeOutcome {
    /// The provider redirected back with an authorization code.
    Success {
        /// The authorization code from the redirect.
        code: String,
        /// The `state` parameter echoed back by the provider. Must match
        /// the request's state; the flow rejects it otherwise.
        state: String,
    },
    /// The user dismissed the user-agent before completing authorization.
    Cancel,
    /// The provider rejected the authorization request.
    Error {
        /// Provider error code (e.g. `access_denied`).
        code: String,
        /// Provider error description, when present.
        description: Option<String>,
    },
}

/// Terminal outcome of the interactive end-session round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSessionOutcome {
    /// The provider's logout page completed and redirected back.
    Success,
    /// The user dismissed the user-agent before logout completed.
    Cancel,
}

/// The interactive user-agent collaborator.
///
/// Both operations suspend until the user or the provider produces a
/// terminal outcome. Dismissal by the user is the only cancellable point
/// in the whole session manager.
#[async_trait]
pub trait UserAgent: Send + Sync {
    /// Presents the authorization URL and waits for the redirect back to
    /// `redirect_uri`.
    async fn authorize(&self, authorize_url: &str, redirect_uri: &str) -> AuthorizeOutcome;

    /// Presents the provider's end-session URL and waits for the redirect
    /// back to `redirect_uri`.
    async fn end_session(&self, end_session_url: &str, redirect_uri: &str) -> EndSessionOutcome;
}
