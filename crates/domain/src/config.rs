//! Client configuration types

use serde::{Deserialize, Serialize};

/// Configuration of this relying party against one provider realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The provider issuer URL, used for discovery and issuer validation.
    pub issuer_url: String,

    /// Client identifier registered with the provider.
    pub client_id: String,

    /// Redirect URI the authorization response is delivered to.
    pub redirect_uri: String,

    /// Redirect URI for the end-session round trip. Falls back to
    /// `redirect_uri` when not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_logout_redirect_uri: Option<String>,

    /// Scopes requested on login, in request order.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,

    /// Prompt mode sent with the authorization request.
    #[serde(default)]
    pub prompt: Prompt,

    /// Whether logout calls the provider's revocation endpoint.
    #[serde(default)]
    pub revocation: RevocationPolicy,
}

impl ClientConfig {
    /// Creates a config with the default scopes, prompt, and revocation
    /// policy.
    #[must_use]
    pub fn new(
        issuer_url: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            post_logout_redirect_uri: None,
            scopes: default_scopes(),
            prompt: Prompt::default(),
            revocation: RevocationPolicy::default(),
        }
    }

    /// The space-separated scope string for the authorization request.
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }

    /// The redirect URI used for the end-session round trip.
    #[must_use]
    pub fn post_logout_redirect(&self) -> &str {
        self.post_logout_redirect_uri
            .as_deref()
            .unwrap_or(&self.redirect_uri)
    }
}

fn default_scopes() -> Vec<String> {
    vec!["openid".to_string(), "profile".to_string()]
}

/// Prompt mode for the authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    /// Force re-authentication even when the provider has a live session.
    #[default]
    Login,
    /// Require no interaction; fail if the provider cannot satisfy that.
    None,
    /// Force the consent screen.
    Consent,
    /// Force account selection.
    SelectAccount,
}

impl Prompt {
    /// The wire value for the `prompt` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::None => "none",
            Self::Consent => "consent",
            Self::SelectAccount => "select_account",
        }
    }
}

/// Whether logout attempts provider-side token revocation.
///
/// Some providers do not honor the generic revocation call; for those, the
/// end-session redirect is the authoritative logout signal and revocation
/// can be switched off here instead of being special-cased per provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RevocationPolicy {
    /// Revoke the access token whenever the provider advertises a
    /// revocation endpoint.
    #[default]
    WhenAdvertised,
    /// Never call the revocation endpoint; rely on end-session alone.
    Never,
}
