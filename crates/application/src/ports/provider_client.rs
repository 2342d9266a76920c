//! Provider HTTP transport port
//!
//! Covers every network round trip the session manager makes against the
//! identity provider: the discovery GET and the token-endpoint and
//! revocation POSTs. The interactive authorization redirect is a separate
//! port ([`super::UserAgent`]).

use async_trait::async_trait;

use portico_domain::{
    ClientConfig, DiscoveryDocument, DiscoveryError, RevocationError, TokenError, TokenGrant,
};

/// Transport toward the provider's non-interactive endpoints.
///
/// Implementations perform exactly one round trip per call and never retry
/// internally; retry and backoff are the caller's decision.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Fetches the discovery document from the well-known path under
    /// `issuer_url`.
    ///
    /// # Errors
    /// Returns a [`DiscoveryError`] if the endpoint is unreachable, answers
    /// with a non-success status, or returns an unparseable body. Document
    /// content validation (required endpoints, issuer match) is the
    /// caller's step.
    async fn fetch_discovery(&self, issuer_url: &str) -> Result<DiscoveryDocument, DiscoveryError>;

    /// Exchanges an authorization code (with its PKCE verifier) for a
    /// token grant.
    ///
    /// # Errors
    /// Returns a [`TokenError`] on a non-success status or a success body
    /// missing the access token, carrying the provider's error code when
    /// one was present.
    async fn exchange_code(
        &self,
        discovery: &DiscoveryDocument,
        config: &ClientConfig,
        code: &str,
        verifier: &str,
    ) -> Result<TokenGrant, TokenError>;

    /// Exchanges a refresh token for a fresh token grant.
    ///
    /// # Errors
    /// Returns a [`TokenError`]; `invalid_grant` marks the refresh token
    /// as dead (see [`TokenError::requires_reauth`]).
    async fn refresh(
        &self,
        discovery: &DiscoveryDocument,
        config: &ClientConfig,
        refresh_token: &str,
    ) -> Result<TokenGrant, TokenError>;

    /// Revokes a token at the provider's revocation endpoint.
    ///
    /// Callers must only invoke this when the discovery document
    /// advertises a revocation endpoint.
    ///
    /// # Errors
    /// Returns a [`RevocationError`] if the provider reports failure.
    async fn revoke(
        &self,
        discovery: &DiscoveryDocument,
        config: &ClientConfig,
        token: &str,
    ) -> Result<(), RevocationError>;
}
