//! Logout use case

use std::sync::Arc;

use portico_domain::{ClientConfig, RevocationPolicy};
use tracing::{debug, info, warn};

use crate::auth::end_session_url;
use crate::error::LogoutError;
use crate::ports::{EndSessionOutcome, ProviderClient, UserAgent};
use crate::session::SessionState;

/// How a logout attempt ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Tokens were revoked (where applicable), the provider session ended,
    /// and the local session is cleared.
    LoggedOut,
    /// There was no access token to begin with; nothing was done.
    AlreadyLoggedOut,
    /// The user dismissed the provider's logout page; the session is
    /// retained.
    Cancelled,
}

/// Coordinates provider-side and local logout.
///
/// Each step is a precondition for the next: revocation (when the
/// provider advertises it and the policy allows), then the end-session
/// redirect, then the local clear. A failed revocation blocks the rest so
/// tokens are never silently discarded while still potentially valid at
/// the provider. The end-session redirect carries explicit parameters
/// because some providers honor only that signal, ignoring generic
/// revocation.
pub struct Logout<P, U> {
    provider: P,
    user_agent: U,
    session: Arc<SessionState>,
    config: ClientConfig,
}

impl<P: ProviderClient, U: UserAgent> Logout<P, U> {
    /// Creates a new `Logout` use case.
    pub const fn new(
        provider: P,
        user_agent: U,
        session: Arc<SessionState>,
        config: ClientConfig,
    ) -> Self {
        Self {
            provider,
            user_agent,
            session,
            config,
        }
    }

    /// Runs one logout attempt to a terminal outcome.
    ///
    /// # Errors
    /// - [`LogoutError::Revocation`] if the provider reported the
    ///   revocation failed; the session is retained and the end-session
    ///   step is not reached
    pub async fn execute(&self) -> Result<LogoutOutcome, LogoutError> {
        let session = self.session.current().await;
        let Some(tokens) = session.tokens else {
            debug!("logout requested with no active session");
            return Ok(LogoutOutcome::AlreadyLoggedOut);
        };

        if self.config.revocation == RevocationPolicy::WhenAdvertised
            && session.discovery.supports_revocation()
        {
            self.provider
                .revoke(&session.discovery, &self.config, &tokens.access_token)
                .await
                .inspect_err(|e| warn!(error = %e, "revocation failed, logout blocked"))?;
            debug!("access token revoked");
        }

        let Some(endpoint) = &session.discovery.end_session_endpoint else {
            // No provider-side logout page; the local session is all there
            // is to clear.
            self.session.clear().await;
            info!("logged out (provider has no end-session endpoint)");
            return Ok(LogoutOutcome::LoggedOut);
        };

        let url = end_session_url(endpoint, &self.config, tokens.id_token.as_deref())
            .map_err(|e| LogoutError::InvalidEndpoint(e.to_string()))?;

        match self
            .user_agent
            .end_session(url.as_str(), self.config.post_logout_redirect())
            .await
        {
            EndSessionOutcome::Success => {
                self.session.clear().await;
                info!("logged out");
                Ok(LogoutOutcome::LoggedOut)
            }
            EndSessionOutcome::Cancel => {
                info!("logout cancelled by user, session retained");
                Ok(LogoutOutcome::Cancelled)
            }
        }
    }
}
