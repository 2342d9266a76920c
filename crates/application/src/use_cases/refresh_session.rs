//! Token refresh use case

use std::sync::Arc;

use portico_domain::{ClientConfig, TokenSet};
use tracing::{info, warn};

use crate::error::RefreshError;
use crate::ports::{Clock, ProviderClient};
use crate::session::SessionState;

/// Exchanges the session's refresh token for a fresh token set.
///
/// One POST to the token endpoint per call, no internal retry. On success
/// the session's token set is replaced wholesale; on failure it is left
/// untouched. When the provider answers `invalid_grant` the refresh token
/// is dead and the caller must force a fresh login; clearing the session
/// at that point is the caller's policy, not this use case's.
pub struct RefreshSession<P, C> {
    provider: P,
    clock: C,
    session: Arc<SessionState>,
    config: ClientConfig,
}

impl<P: ProviderClient, C: Clock> RefreshSession<P, C> {
    /// Creates a new `RefreshSession` use case.
    pub const fn new(provider: P, clock: C, session: Arc<SessionState>, config: ClientConfig) -> Self {
        Self {
            provider,
            clock,
            session,
            config,
        }
    }

    /// Runs one refresh.
    ///
    /// # Errors
    /// - [`RefreshError::NoRefreshToken`] if the session holds none
    /// - [`RefreshError::Exchange`] if the token endpoint call failed;
    ///   check [`portico_domain::TokenError::requires_reauth`] on it
    pub async fn execute(&self) -> Result<TokenSet, RefreshError> {
        let session = self.session.current().await;
        let refresh_token = session
            .tokens
            .as_ref()
            .and_then(|t| t.refresh_token.clone())
            .ok_or(RefreshError::NoRefreshToken)?;

        match self
            .provider
            .refresh(&session.discovery, &self.config, &refresh_token)
            .await
        {
            Ok(grant) => {
                let tokens = TokenSet::from_grant(grant, self.clock.now());
                self.session.replace(tokens.clone()).await;
                info!("session tokens refreshed");
                Ok(tokens)
            }
            Err(err) => {
                if err.requires_reauth() {
                    warn!("refresh token no longer valid, fresh login required");
                }
                Err(err.into())
            }
        }
    }
}
