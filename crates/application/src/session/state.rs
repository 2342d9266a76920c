//! In-memory session state with change notification
//!
//! A single-writer aggregate: only the login success path, the refresh
//! success path, and the logout coordinator may call [`SessionState::replace`]
//! and [`SessionState::clear`], plus the embedding application when a
//! terminal refresh failure forces a fresh login. Replacement is atomic
//! with respect to observers; a reader never sees a partially updated
//! token set.

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};

use portico_domain::{DiscoveryDocument, Session, TokenSet};

use super::events::SessionEvent;

/// Capacity of the change-event channel. A lagging subscriber drops the
/// oldest events, never blocks a writer.
const EVENT_CAPACITY: usize = 16;

/// The session's single source of truth.
#[derive(Debug)]
pub struct SessionState {
    inner: RwLock<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionState {
    /// Creates the pre-login state for a resolved provider.
    #[must_use]
    pub fn new(discovery: DiscoveryDocument) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: RwLock::new(Session::new(discovery)),
            events,
        }
    }

    /// Installs a token set, replacing any previous one wholesale.
    ///
    /// Reserved for the login and refresh success paths; other components
    /// observe the session, they do not write it.
    pub async fn replace(&self, tokens: TokenSet) {
        let event = SessionEvent::Replaced {
            token_preview: SessionEvent::token_preview(&tokens.access_token),
            expires_at: tokens.expires_at,
        };
        {
            let mut session = self.inner.write().await;
            session.tokens = Some(tokens);
        }
        let _ = self.events.send(event);
    }

    /// Drops the token set, returning to the pre-login state. The
    /// discovery document is retained.
    ///
    /// Reserved for the logout coordinator, and for the embedding
    /// application's re-login policy after a terminal refresh failure.
    pub async fn clear(&self) {
        {
            let mut session = self.inner.write().await;
            if session.tokens.is_none() {
                return;
            }
            session.tokens = None;
        }
        let _ = self.events.send(SessionEvent::Cleared);
    }

    /// A snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.inner.read().await.clone()
    }

    /// Subscribes to replace/clear notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// The bearer access token for downstream API calls, if logged in.
    pub async fn bearer_token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .bearer_token()
            .map(ToString::to_string)
    }

    /// The token status as of `now`, for UI display.
    ///
    /// `refresh_buffer_seconds` is how far before the deadline a token
    /// counts as expiring.
    pub async fn status(&self, now: DateTime<Utc>, refresh_buffer_seconds: i64) -> TokenStatus {
        let session = self.inner.read().await;
        session
            .tokens
            .as_ref()
            .map_or(TokenStatus::NotAuthenticated, |tokens| {
                if tokens.is_expired_or_expiring(now, 0) {
                    TokenStatus::Expired {
                        can_refresh: tokens.can_refresh(),
                    }
                } else if tokens.is_expired_or_expiring(now, refresh_buffer_seconds) {
                    TokenStatus::Expiring {
                        seconds_remaining: tokens.seconds_until_expiry(now).unwrap_or(0),
                        can_refresh: tokens.can_refresh(),
                    }
                } else {
                    TokenStatus::Valid {
                        seconds_remaining: tokens.seconds_until_expiry(now),
                    }
                }
            })
    }
}

/// Status of the session's access token for UI display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No token set is present.
    NotAuthenticated,
    /// Token is valid and not expiring soon.
    Valid {
        /// Seconds until expiry, or `None` if no expiry is declared.
        seconds_remaining: Option<i64>,
    },
    /// Token is valid but inside the refresh buffer.
    Expiring {
        /// Seconds until expiry.
        seconds_remaining: i64,
        /// Whether a refresh token is available.
        can_refresh: bool,
    },
    /// Token has expired.
    Expired {
        /// Whether a refresh token is available.
        can_refresh: bool,
    },
}

impl TokenStatus {
    /// Returns true if the token is usable (not expired).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. } | Self::Expiring { .. })
    }

    /// A user-facing status message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not signed in".to_string(),
            Self::Valid {
                seconds_remaining: Some(secs),
            } => {
                if *secs > 3600 {
                    format!("Signed in, valid for {} hours", secs / 3600)
                } else if *secs > 60 {
                    format!("Signed in, valid for {} minutes", secs / 60)
                } else {
                    format!("Signed in, valid for {secs} seconds")
                }
            }
            Self::Valid {
                seconds_remaining: None,
            } => "Signed in".to_string(),
            Self::Expiring {
                seconds_remaining,
                can_refresh,
            } => {
                if *can_refresh {
                    format!("Session expiring in {seconds_remaining} seconds, refresh available")
                } else {
                    format!("Session expiring in {seconds_remaining} seconds")
                }
            }
            Self::Expired { can_refresh } => {
                if *can_refresh {
                    "Session expired, refresh available".to_string()
                } else {
                    "Session expired".to_string()
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use portico_domain::TokenGrant;
    use pretty_assertions::assert_eq;

    fn discovery() -> DiscoveryDocument {
        DiscoveryDocument {
            issuer: "https://auth.example.com".to_string(),
            authorization_endpoint: "https://auth.example.com/authorize".to_string(),
            token_endpoint: "https://auth.example.com/token".to_string(),
            revocation_endpoint: None,
            end_session_endpoint: None,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn tokens(access: &str, refresh: Option<&str>, expires_in: Option<u64>) -> TokenSet {
        TokenSet::from_grant(
            TokenGrant {
                access_token: access.to_string(),
                id_token: Some("id".to_string()),
                refresh_token: refresh.map(ToString::to_string),
                token_type: "Bearer".to_string(),
                expires_in,
            },
            at(0),
        )
    }

    #[tokio::test]
    async fn replace_installs_the_whole_set() {
        let state = SessionState::new(discovery());
        state.replace(tokens("A1", Some("R1"), Some(300))).await;

        let session = state.current().await;
        let installed = session.tokens.unwrap();
        assert_eq!(installed.access_token, "A1");
        assert_eq!(installed.refresh_token.as_deref(), Some("R1"));
        assert_eq!(state.bearer_token().await.as_deref(), Some("A1"));
    }

    #[tokio::test]
    async fn replace_never_mixes_token_sets() {
        let state = SessionState::new(discovery());
        state.replace(tokens("A1", Some("R1"), None)).await;
        // Second grant has no refresh token; the old one must not survive.
        state.replace(tokens("A2", None, None)).await;

        let session = state.current().await;
        let installed = session.tokens.unwrap();
        assert_eq!(installed.access_token, "A2");
        assert_eq!(installed.refresh_token, None);
    }

    #[tokio::test]
    async fn clear_retains_discovery() {
        let state = SessionState::new(discovery());
        state.replace(tokens("A1", None, None)).await;
        state.clear().await;

        let session = state.current().await;
        assert!(session.tokens.is_none());
        assert_eq!(session.discovery, discovery());
    }

    #[tokio::test]
    async fn replace_and_clear_each_notify_subscribers() {
        let state = SessionState::new(discovery());
        let mut events = state.subscribe();

        state.replace(tokens("A1B2C3D4E5F6G7", None, Some(60))).await;
        state.clear().await;

        match events.recv().await.unwrap() {
            SessionEvent::Replaced { token_preview, .. } => {
                assert_eq!(token_preview, "A1B2C3D4...");
            }
            other => panic!("expected Replaced, got {other:?}"),
        }
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Cleared);
    }

    #[tokio::test]
    async fn clear_on_empty_session_emits_nothing() {
        let state = SessionState::new(discovery());
        let mut events = state.subscribe();
        state.clear().await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn status_tracks_expiry_against_the_given_clock() {
        let state = SessionState::new(discovery());
        assert_eq!(
            state.status(at(0), 60).await,
            TokenStatus::NotAuthenticated
        );

        state.replace(tokens("A1", Some("R1"), Some(300))).await;

        assert!(state.status(at(100), 60).await.is_valid());
        assert_eq!(
            state.status(at(270), 60).await,
            TokenStatus::Expiring {
                seconds_remaining: 30,
                can_refresh: true
            }
        );
        assert_eq!(
            state.status(at(400), 60).await,
            TokenStatus::Expired { can_refresh: true }
        );
    }

    #[test]
    fn status_display_messages() {
        assert_eq!(
            TokenStatus::NotAuthenticated.display_message(),
            "Not signed in"
        );
        assert!(
            TokenStatus::Valid {
                seconds_remaining: Some(7200)
            }
            .display_message()
            .contains("hours")
        );
        assert!(
            TokenStatus::Expired { can_refresh: true }
                .display_message()
                .contains("refresh available")
        );
    }
}
