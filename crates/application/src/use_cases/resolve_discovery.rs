//! Discovery resolution use case

use portico_domain::{ClientConfig, DiscoveryDocument, DiscoveryError};

use crate::ports::ProviderClient;

/// Resolves the provider's discovery document, once per realm at startup.
///
/// Performs exactly one network round trip and validates the returned
/// document. No retry is performed here: the caller decides whether to
/// retry, and must keep the interactive login action disabled until a
/// document is available.
pub struct ResolveDiscovery<P> {
    provider: P,
}

impl<P: ProviderClient> ResolveDiscovery<P> {
    /// Creates a new `ResolveDiscovery` use case.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetches and validates the discovery document for the configured
    /// issuer.
    ///
    /// # Errors
    /// Returns a [`DiscoveryError`] if the well-known endpoint is
    /// unreachable, the body is unparseable, a required endpoint is
    /// missing, or the advertised issuer does not match.
    pub async fn execute(&self, config: &ClientConfig) -> Result<DiscoveryDocument, DiscoveryError> {
        let document = self.provider.fetch_discovery(&config.issuer_url).await?;
        document.validate(&config.issuer_url)?;

        tracing::info!(
            issuer = %config.issuer_url,
            revocation = document.supports_revocation(),
            end_session = document.supports_end_session(),
            "resolved provider discovery document"
        );
        Ok(document)
    }
}
