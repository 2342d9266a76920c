//! Reqwest-backed provider transport.
//!
//! Implements the [`ProviderClient`] port with one HTTP round trip per
//! call: a GET for discovery and form-encoded POSTs for the token and
//! revocation endpoints. No retry happens here; the transport's own
//! timeout behavior is the only deadline.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use portico_application::ProviderClient;
use portico_domain::{
    ClientConfig, DiscoveryDocument, DiscoveryError, RevocationError, TokenError, TokenGrant,
    well_known_url,
};

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Error body from the token or revocation endpoint.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Provider transport backed by `reqwest`.
///
/// Redirects are never followed; every consumed endpoint must answer
/// directly.
#[derive(Debug, Clone)]
pub struct ReqwestProviderClient {
    client: reqwest::Client,
}

impl ReqwestProviderClient {
    /// Creates a new provider client with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Portico/0.1.0")
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Creates a provider client around a custom `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// One form-encoded POST to the token endpoint.
    async fn token_request(
        &self,
        token_url: &str,
        params: &[(&str, &str)],
    ) -> Result<TokenGrant, TokenError> {
        let body = serde_urlencoded::to_string(params)
            .map_err(|e| TokenError::Network(format!("failed to encode form: {e}")))?;

        let response = self
            .client
            .post(token_url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| TokenError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(error_response) = serde_json::from_str::<TokenErrorResponse>(&error_text) {
                return Err(TokenError::Rejected {
                    status: status.as_u16(),
                    code: Some(error_response.error),
                    description: error_response.error_description,
                });
            }
            return Err(TokenError::Rejected {
                status: status.as_u16(),
                code: None,
                description: (!error_text.is_empty()).then_some(error_text),
            });
        }

        response
            .json::<TokenGrant>()
            .await
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }
}

impl Default for ReqwestProviderClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderClient for ReqwestProviderClient {
    async fn fetch_discovery(&self, issuer_url: &str) -> Result<DiscoveryDocument, DiscoveryError> {
        let url = well_known_url(issuer_url);
        debug!(url = %url, "fetching discovery document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DiscoveryError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<DiscoveryDocument>()
            .await
            .map_err(|e| DiscoveryError::Malformed(e.to_string()))
    }

    async fn exchange_code(
        &self,
        discovery: &DiscoveryDocument,
        config: &ClientConfig,
        code: &str,
        verifier: &str,
    ) -> Result<TokenGrant, TokenError> {
        debug!(endpoint = %discovery.token_endpoint, "exchanging authorization code");
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("code_verifier", verifier),
        ];
        self.token_request(&discovery.token_endpoint, &params).await
    }

    async fn refresh(
        &self,
        discovery: &DiscoveryDocument,
        config: &ClientConfig,
        refresh_token: &str,
    ) -> Result<TokenGrant, TokenError> {
        debug!(endpoint = %discovery.token_endpoint, "refreshing tokens");
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.client_id.as_str()),
        ];
        self.token_request(&discovery.token_endpoint, &params).await
    }

    async fn revoke(
        &self,
        discovery: &DiscoveryDocument,
        config: &ClientConfig,
        token: &str,
    ) -> Result<(), RevocationError> {
        // The port contract has callers check for the endpoint first; an
        // absent endpoint here means there is nothing to revoke against.
        let Some(endpoint) = &discovery.revocation_endpoint else {
            return Ok(());
        };
        debug!(endpoint = %endpoint, "revoking access token");

        let params = [
            ("token", token),
            ("token_type_hint", "access_token"),
            ("client_id", config.client_id.as_str()),
        ];
        let body = serde_urlencoded::to_string(params)
            .map_err(|e| RevocationError::Network(format!("failed to encode form: {e}")))?;

        let response = self
            .client
            .post(endpoint)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| RevocationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RevocationError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
