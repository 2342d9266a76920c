//! Token set and token endpoint wire types
//!
//! A [`TokenSet`] is always replaced wholesale: every field comes from the
//! same token endpoint response, so a reader can never observe an access
//! token paired with a refresh token from an earlier grant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Raw success body from the token endpoint.
///
/// This is the wire shape shared by the code exchange and the refresh
/// grant. Deserialization fails if `access_token` is absent, which is how
/// a structurally broken success response is detected.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// The bearer access token.
    pub access_token: String,

    /// The ID token, when the provider issued one (requires the `openid`
    /// scope). Treated as an opaque string; used only as the end-session
    /// hint.
    #[serde(default)]
    pub id_token: Option<String>,

    /// The refresh token, absent if the provider does not issue one for
    /// this grant.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Token type, normally `Bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,

    /// Access token lifetime in seconds, when declared.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// The credentials held by an authenticated session.
///
/// Created by a successful code exchange or refresh and destroyed on
/// logout. Refresh replaces all fields together, even when the provider
/// re-issues the refresh token as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// The bearer access token presented on downstream API calls.
    pub access_token: String,

    /// The ID token, used only as the opaque `id_token_hint` during
    /// end-session.
    pub id_token: Option<String>,

    /// The refresh token, when issued.
    pub refresh_token: Option<String>,

    /// Token type for the `Authorization` header, normally `Bearer`.
    pub token_type: String,

    /// When the access token expires, derived from the token endpoint
    /// response. `None` when the provider declared no lifetime.
    pub expires_at: Option<DateTime<Utc>>,

    /// When this set was obtained.
    pub obtained_at: DateTime<Utc>,
}

impl TokenSet {
    /// Builds a token set from a token endpoint response.
    ///
    /// `now` is the moment the response was received; the expiry instant is
    /// derived from it and the declared `expires_in`.
    #[must_use]
    pub fn from_grant(grant: TokenGrant, now: DateTime<Utc>) -> Self {
        let expires_at = grant
            .expires_in
            .map(|secs| now + chrono::Duration::seconds(secs.cast_signed()));

        Self {
            access_token: grant.access_token,
            id_token: grant.id_token,
            refresh_token: grant.refresh_token,
            token_type: grant.token_type,
            expires_at,
            obtained_at: now,
        }
    }

    /// Checks whether the access token is expired, or will expire within
    /// the given buffer, as of `now`.
    #[must_use]
    pub fn is_expired_or_expiring(&self, now: DateTime<Utc>, buffer_seconds: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            now + chrono::Duration::seconds(buffer_seconds) >= expires_at
        })
    }

    /// Returns true if the set carries a refresh token.
    #[must_use]
    pub const fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Seconds until expiry as of `now`, or `None` if no expiry is known.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|exp| (exp - now).num_seconds())
    }

    /// Returns the `Authorization` header value for downstream API calls.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn grant() -> TokenGrant {
        TokenGrant {
            access_token: "A1".to_string(),
            id_token: Some("I1".to_string()),
            refresh_token: Some("R1".to_string()),
            token_type: "Bearer".to_string(),
            expires_in: Some(300),
        }
    }

    #[test]
    fn from_grant_derives_expiry() {
        let now = at(1_000);
        let tokens = TokenSet::from_grant(grant(), now);

        assert_eq!(tokens.expires_at, Some(at(1_300)));
        assert_eq!(tokens.obtained_at, now);
        assert_eq!(tokens.seconds_until_expiry(at(1_100)), Some(200));
    }

    #[test]
    fn expiry_check_honors_buffer() {
        let tokens = TokenSet::from_grant(grant(), at(1_000));

        assert!(!tokens.is_expired_or_expiring(at(1_100), 0));
        // 60s buffer: expiring once within a minute of the deadline.
        assert!(tokens.is_expired_or_expiring(at(1_250), 60));
        assert!(tokens.is_expired_or_expiring(at(1_301), 0));
    }

    #[test]
    fn no_declared_lifetime_never_expires() {
        let tokens = TokenSet::from_grant(
            TokenGrant {
                expires_in: None,
                ..grant()
            },
            at(1_000),
        );

        assert_eq!(tokens.expires_at, None);
        assert!(!tokens.is_expired_or_expiring(at(i64::from(i32::MAX)), 0));
        assert_eq!(tokens.seconds_until_expiry(at(2_000)), None);
    }

    #[test]
    fn authorization_header_uses_token_type() {
        let tokens = TokenSet::from_grant(grant(), at(0));
        assert_eq!(tokens.authorization_header(), "Bearer A1");
    }

    #[test]
    fn grant_parses_with_minimal_body() {
        let grant: TokenGrant = serde_json::from_str(r#"{"access_token": "A1"}"#).unwrap();
        assert_eq!(grant.token_type, "Bearer");
        assert!(grant.refresh_token.is_none());
        assert!(grant.id_token.is_none());

        let tokens = TokenSet::from_grant(grant, at(0));
        assert!(!tokens.can_refresh());
    }

    #[test]
    fn grant_without_access_token_fails_to_parse() {
        let result = serde_json::from_str::<TokenGrant>(r#"{"token_type": "Bearer"}"#);
        assert!(result.is_err());
    }
}
