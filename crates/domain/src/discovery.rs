//! Provider discovery document
//!
//! The discovery document is fetched once per provider realm from the
//! `.well-known/openid-configuration` path and held for the process
//! lifetime. It is never mutated after validation.

use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;

/// OIDC provider metadata from `.well-known/openid-configuration`.
///
/// Only the endpoints this session manager consumes are modeled; the rest
/// of the document is ignored on deserialization. `revocation_endpoint`
/// and `end_session_endpoint` are optional provider features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    /// The issuer identifier the provider advertises.
    pub issuer: String,

    /// URL of the authorization endpoint.
    pub authorization_endpoint: String,

    /// URL of the token endpoint.
    pub token_endpoint: String,

    /// URL of the RFC 7009 token revocation endpoint, if advertised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_endpoint: Option<String>,

    /// URL of the end-session (single logout) endpoint, if advertised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_session_endpoint: Option<String>,
}

impl DiscoveryDocument {
    /// Validates the document against the issuer URL it was fetched for.
    ///
    /// A document must name both the authorization and token endpoints and
    /// advertise the expected issuer. Revocation and end-session endpoints
    /// may be absent; the logout flow degrades accordingly.
    ///
    /// # Errors
    /// Returns [`DiscoveryError::MissingEndpoint`] if a required endpoint
    /// is empty, or [`DiscoveryError::IssuerMismatch`] if the advertised
    /// issuer differs from the requested one.
    pub fn validate(&self, requested_issuer: &str) -> Result<(), DiscoveryError> {
        if self.authorization_endpoint.is_empty() {
            return Err(DiscoveryError::MissingEndpoint("authorization_endpoint"));
        }
        if self.token_endpoint.is_empty() {
            return Err(DiscoveryError::MissingEndpoint("token_endpoint"));
        }
        if self.issuer.trim_end_matches('/') != requested_issuer.trim_end_matches('/') {
            return Err(DiscoveryError::IssuerMismatch {
                expected: requested_issuer.to_string(),
                advertised: self.issuer.clone(),
            });
        }
        Ok(())
    }

    /// Returns true if the provider advertises a revocation endpoint.
    #[must_use]
    pub const fn supports_revocation(&self) -> bool {
        self.revocation_endpoint.is_some()
    }

    /// Returns true if the provider advertises an end-session endpoint.
    #[must_use]
    pub const fn supports_end_session(&self) -> bool {
        self.end_session_endpoint.is_some()
    }
}

/// Builds the well-known metadata URL for an issuer.
#[must_use]
pub fn well_known_url(issuer_url: &str) -> String {
    format!(
        "{}/.well-known/openid-configuration",
        issuer_url.trim_end_matches('/')
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DiscoveryDocument {
        DiscoveryDocument {
            issuer: "https://auth.example.com/realms/main".to_string(),
            authorization_endpoint: "https://auth.example.com/realms/main/authorize".to_string(),
            token_endpoint: "https://auth.example.com/realms/main/token".to_string(),
            revocation_endpoint: Some("https://auth.example.com/realms/main/revoke".to_string()),
            end_session_endpoint: Some("https://auth.example.com/realms/main/logout".to_string()),
        }
    }

    #[test]
    fn well_known_url_normalizes_trailing_slash() {
        assert_eq!(
            well_known_url("https://auth.example.com/realms/main/"),
            "https://auth.example.com/realms/main/.well-known/openid-configuration"
        );
        assert_eq!(
            well_known_url("https://auth.example.com/realms/main"),
            "https://auth.example.com/realms/main/.well-known/openid-configuration"
        );
    }

    #[test]
    fn validate_accepts_complete_document() {
        let doc = sample();
        assert!(doc.validate("https://auth.example.com/realms/main").is_ok());
        // Trailing slash differences are not a mismatch.
        assert!(doc.validate("https://auth.example.com/realms/main/").is_ok());
    }

    #[test]
    fn validate_rejects_missing_token_endpoint() {
        let doc = DiscoveryDocument {
            token_endpoint: String::new(),
            ..sample()
        };
        assert_eq!(
            doc.validate("https://auth.example.com/realms/main"),
            Err(DiscoveryError::MissingEndpoint("token_endpoint"))
        );
    }

    #[test]
    fn validate_rejects_issuer_mismatch() {
        let doc = sample();
        let err = doc.validate("https://other.example.com").unwrap_err();
        assert!(matches!(err, DiscoveryError::IssuerMismatch { .. }));
    }

    #[test]
    fn optional_endpoints_may_be_absent() {
        let json = r#"{
            "issuer": "https://auth.example.com/realms/main",
            "authorization_endpoint": "https://auth.example.com/realms/main/authorize",
            "token_endpoint": "https://auth.example.com/realms/main/token"
        }"#;
        let doc: DiscoveryDocument = serde_json::from_str(json).unwrap();
        assert!(!doc.supports_revocation());
        assert!(!doc.supports_end_session());
        assert!(doc.validate("https://auth.example.com/realms/main").is_ok());
    }
}
