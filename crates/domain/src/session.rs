//! Session aggregate

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryDocument;
use crate::token::TokenSet;

/// The aggregate the rest of the application observes: the provider's
/// discovery document plus the current token set, if any.
///
/// Consumers only ever receive snapshots of this value; mutation goes
/// through the session-state operations, which replace the token set
/// atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The provider metadata this session was established against.
    pub discovery: DiscoveryDocument,

    /// The current credentials, absent before login and after logout.
    pub tokens: Option<TokenSet>,
}

impl Session {
    /// Creates the pre-login session for a resolved provider.
    #[must_use]
    pub const fn new(discovery: DiscoveryDocument) -> Self {
        Self {
            discovery,
            tokens: None,
        }
    }

    /// Returns true if a token set is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    /// The bearer access token for downstream API calls, if logged in.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenGrant;
    use chrono::DateTime;

    fn discovery() -> DiscoveryDocument {
        DiscoveryDocument {
            issuer: "https://auth.example.com".to_string(),
            authorization_endpoint: "https://auth.example.com/authorize".to_string(),
            token_endpoint: "https://auth.example.com/token".to_string(),
            revocation_endpoint: None,
            end_session_endpoint: None,
        }
    }

    #[test]
    fn fresh_session_is_unauthenticated() {
        let session = Session::new(discovery());
        assert!(!session.is_authenticated());
        assert!(session.bearer_token().is_none());
    }

    #[test]
    fn bearer_token_reads_the_access_token() {
        let grant = TokenGrant {
            access_token: "A1".to_string(),
            id_token: None,
            refresh_token: None,
            token_type: "Bearer".to_string(),
            expires_in: None,
        };
        let session = Session {
            discovery: discovery(),
            tokens: Some(TokenSet::from_grant(grant, DateTime::UNIX_EPOCH)),
        };

        assert!(session.is_authenticated());
        assert_eq!(session.bearer_token(), Some("A1"));
    }
}
