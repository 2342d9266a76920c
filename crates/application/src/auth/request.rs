//! Authorization request construction
//!
//! An [`AuthorizationRequest`] is created per login attempt with a fresh
//! state value and PKCE pair, and discarded once the matching response is
//! consumed or the attempt is abandoned.

use url::Url;

use portico_domain::{ClientConfig, DiscoveryDocument, Prompt};

use super::pkce::{PkceChallenge, generate_state};

/// One login attempt's authorization request parameters.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    /// Client identifier.
    pub client_id: String,
    /// Redirect URI the response is delivered to.
    pub redirect_uri: String,
    /// Requested scopes, space-joined on the wire.
    pub scopes: Vec<String>,
    /// Prompt mode.
    pub prompt: Prompt,
    /// Unguessable per-attempt state value; the response must echo it.
    pub state: String,
    /// Fresh PKCE pair for this attempt.
    pub pkce: PkceChallenge,
}

impl AuthorizationRequest {
    /// Creates a request with a fresh state value and PKCE pair.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scopes: config.scopes.clone(),
            prompt: config.prompt,
            state: generate_state(),
            pkce: PkceChallenge::generate(),
        }
    }

    /// Builds the authorization URL for the interactive user-agent.
    ///
    /// The response type is always `code`. The PKCE challenge is included;
    /// the verifier is not.
    ///
    /// # Errors
    /// Returns an error if the discovery document's authorization endpoint
    /// is not a valid URL.
    pub fn authorize_url(&self, discovery: &DiscoveryDocument) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&discovery.authorization_endpoint)?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", &self.state)
            .append_pair("prompt", self.prompt.as_str())
            .append_pair("code_challenge", &self.pkce.challenge)
            .append_pair("code_challenge_method", self.pkce.method);
        Ok(url)
    }
}

/// Builds the end-session URL for the provider's single-logout page.
///
/// Carries the explicit `client_id`, `post_logout_redirect_uri`, and
/// `id_token_hint` parameters; some providers ignore generic revocation
/// and honor only this redirect, so the parameters are always sent.
///
/// # Errors
/// Returns an error if `end_session_endpoint` is not a valid URL.
pub fn end_session_url(
    end_session_endpoint: &str,
    config: &ClientConfig,
    id_token_hint: Option<&str>,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(end_session_endpoint)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("client_id", &config.client_id)
            .append_pair("post_logout_redirect_uri", config.post_logout_redirect());
        if let Some(hint) = id_token_hint {
            pairs.append_pair("id_token_hint", hint);
        }
    }
    Ok(url)
}
