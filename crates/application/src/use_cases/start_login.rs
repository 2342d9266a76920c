//! Interactive login use case

use std::sync::Arc;

use portico_domain::{ClientConfig, TokenSet};
use tracing::{debug, info, warn};

use crate::auth::{AuthorizationRequest, FlowState, FlowTracker};
use crate::error::LoginError;
use crate::ports::{AuthorizeOutcome, Clock, ProviderClient, UserAgent};
use crate::session::SessionState;

/// How a login attempt ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The exchange succeeded and the session now holds this token set.
    Completed(TokenSet),
    /// The user dismissed the user-agent; nothing changed.
    Cancelled,
}

/// Drives one interactive Authorization-Code-with-PKCE login.
///
/// Non-reentrant: a second `execute` while one is awaiting the user-agent
/// fails with [`LoginError::AlreadyActive`] and leaves the outstanding
/// attempt untouched.
pub struct StartLogin<P, U, C> {
    provider: P,
    user_agent: U,
    clock: C,
    session: Arc<SessionState>,
    config: ClientConfig,
    flow: FlowTracker,
}

impl<P: ProviderClient, U: UserAgent, C: Clock> StartLogin<P, U, C> {
    /// Creates a new `StartLogin` use case.
    pub fn new(
        provider: P,
        user_agent: U,
        clock: C,
        session: Arc<SessionState>,
        config: ClientConfig,
    ) -> Self {
        Self {
            provider,
            user_agent,
            clock,
            session,
            config,
            flow: FlowTracker::new(),
        }
    }

    /// The current flow state, for UI display.
    #[must_use]
    pub fn flow_state(&self) -> FlowState {
        self.flow.current()
    }

    /// Runs one login attempt to a terminal outcome.
    ///
    /// Builds a fresh authorization request (new state value, new PKCE
    /// pair), suspends on the interactive user-agent, verifies the echoed
    /// state, exchanges the code, and installs the resulting token set.
    /// On any failure the observable session is exactly as before the
    /// call.
    ///
    /// # Errors
    /// - [`LoginError::AlreadyActive`] if a login is already outstanding
    /// - [`LoginError::Provider`] if the provider rejected the request
    /// - [`LoginError::StateMismatch`] if the echoed state differs
    /// - [`LoginError::Exchange`] if the code exchange failed
    pub async fn execute(&self) -> Result<LoginOutcome, LoginError> {
        let Some(guard) = self.flow.try_begin() else {
            return Err(LoginError::AlreadyActive);
        };

        let discovery = self.session.current().await.discovery;
        let request = AuthorizationRequest::new(&self.config);
        let authorize_url = request
            .authorize_url(&discovery)
            .map_err(|e| LoginError::InvalidEndpoint(e.to_string()))?;

        debug!(state = %request.state, "opening authorization request");
        let outcome = self
            .user_agent
            .authorize(authorize_url.as_str(), &self.config.redirect_uri)
            .await;

        match outcome {
            AuthorizeOutcome::Cancel => {
                guard.transition(FlowState::Cancelled);
                info!("login cancelled by user");
                Ok(LoginOutcome::Cancelled)
            }
            AuthorizeOutcome::Error { code, description } => {
                guard.transition(FlowState::Rejected { error: code.clone() });
                warn!(code = %code, "provider rejected authorization request");
                Err(LoginError::Provider { code, description })
            }
            AuthorizeOutcome::Success { code, state } => {
                if state != request.state {
                    guard.transition(FlowState::Rejected {
                        error: "state mismatch".to_string(),
                    });
                    warn!("authorization response state does not match the request");
                    return Err(LoginError::StateMismatch {
                        expected: request.state,
                        received: state,
                    });
                }

                guard.transition(FlowState::Authorized);
                let grant = self
                    .provider
                    .exchange_code(&discovery, &self.config, &code, &request.pkce.verifier)
                    .await
                    .inspect_err(|e| {
                        guard.transition(FlowState::Rejected {
                            error: e.to_string(),
                        });
                    })?;

                let tokens = TokenSet::from_grant(grant, self.clock.now());
                self.session.replace(tokens.clone()).await;
                info!("login completed");
                Ok(LoginOutcome::Completed(tokens))
            }
        }
    }
}
