//! PKCE (Proof Key for Code Exchange) generation
//!
//! Implements the S256 challenge transform per RFC 7636. The verifier is
//! submitted in plaintext only during code exchange, never in the
//! authorization redirect.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Wire value of the `code_challenge_method` parameter.
const CHALLENGE_METHOD: &str = "S256";

/// A PKCE code verifier with its derived challenge.
///
/// Generated fresh per login attempt and retained for the lifetime of that
/// attempt only; a verifier is never reused across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceChallenge {
    /// The code verifier, kept client-side until code exchange.
    pub verifier: String,
    /// `BASE64URL(SHA256(verifier))`, sent with the authorization request.
    pub challenge: String,
    /// The challenge method, always `S256`.
    pub method: &'static str,
}

impl PkceChallenge {
    /// Generates a fresh verifier/challenge pair.
    ///
    /// 32 random bytes encode to a 43-character base64url verifier, the
    /// RFC 7636 minimum length, within the unreserved-character alphabet.
    /// `rand::rng()` is a CSPRNG, as PKCE requires.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);
        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        let challenge = derive_challenge(&verifier);

        Self {
            verifier,
            challenge,
            method: CHALLENGE_METHOD,
        }
    }
}

/// Computes the S256 challenge for a verifier.
#[must_use]
pub(crate) fn derive_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Generates an unguessable `state` parameter for one authorization
/// attempt.
#[must_use]
pub fn generate_state() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn s256_matches_rfc_7636_test_vector() {
        // RFC 7636 Appendix B
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        let challenge = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";
        assert_eq!(derive_challenge(verifier), challenge);
    }

    #[test]
    fn verifier_meets_minimum_length_and_alphabet() {
        let pkce = PkceChallenge::generate();

        assert!(pkce.verifier.len() >= 43);
        assert!(
            pkce.verifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(pkce.method, "S256");
    }

    #[test]
    fn challenge_is_derived_from_the_verifier() {
        let pkce = PkceChallenge::generate();
        assert_eq!(pkce.challenge, derive_challenge(&pkce.verifier));
        assert_ne!(pkce.challenge, pkce.verifier);
    }

    #[test]
    fn verifiers_are_not_reused() {
        let a = PkceChallenge::generate();
        let b = PkceChallenge::generate();
        assert_ne!(a.verifier, b.verifier);
    }

    #[test]
    fn state_values_are_unguessable_and_unique() {
        let a = generate_state();
        let b = generate_state();
        assert_ne!(a, b);
        // 16 bytes of entropy encode to 22 base64url characters.
        assert_eq!(a.len(), 22);
    }
}
