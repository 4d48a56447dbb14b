//! HMAC token verification.
//!
//! A client token is valid when it equals the lowercase hex HMAC-SHA256 tag
//! of [`CHALLENGE_MESSAGE`] under the shared secret. The message is a single
//! hardcoded constant, so every legitimate caller presents the same tag: the
//! check is a shared static credential, not a per-message integrity check.
//! Rotating the secret rotates every caller's tag at once.

use std::fmt;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// The fixed string both client and server compute the tag over.
pub const CHALLENGE_MESSAGE: &str = "test-string";

/// Errors produced while verifying a client token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token absent, empty, or whitespace-only.
    #[error("missing token")]
    Missing,
    /// Token does not equal the expected tag.
    #[error("invalid token")]
    Mismatch,
    /// HMAC could not be initialized from the configured secret.
    #[error("failed to initialize HMAC")]
    Hmac,
}

/// Verifies client tokens against the shared secret.
///
/// The secret is wrapped in [`SecretString`] so it never shows up in Debug
/// output or logs.
#[derive(Clone)]
pub struct TokenVerifier {
    secret: SecretString,
}

impl TokenVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        let secret: String = secret.into();
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Compute the expected tag: lowercase hex HMAC-SHA256 of
    /// [`CHALLENGE_MESSAGE`] under the shared secret.
    pub fn expected_tag(&self) -> Result<String, TokenError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| TokenError::Hmac)?;
        mac.update(CHALLENGE_MESSAGE.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Verify a client token.
    ///
    /// Comparison is exact string equality against the lowercase hex tag.
    /// On success returns the canonical tag, which callers use as the store
    /// lookup key.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        let expected = self.expected_tag()?;
        if expected != token {
            return Err(TokenError::Mismatch);
        }

        Ok(expected)
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenVerifier([REDACTED secret, {} chars])",
            self.secret.expose_secret().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // HMAC-SHA256(key = "test-secret", message = "test-string"), hex.
    const TAG_FOR_TEST_SECRET: &str =
        "c90e44d774cc928ec76478cf3406b8cc88ee5723b6256f8736085630202d86da";

    fn verifier() -> TokenVerifier {
        TokenVerifier::new("test-secret")
    }

    #[test]
    fn expected_tag_matches_known_vector() {
        let tag = verifier().expected_tag().unwrap();
        assert_eq!(tag, TAG_FOR_TEST_SECRET);
    }

    #[test]
    fn expected_tag_is_lowercase_hex() {
        let tag = verifier().expected_tag().unwrap();
        assert_eq!(tag.len(), 64);
        assert!(tag.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn verify_accepts_matching_tag_and_returns_it() {
        let tag = verifier().verify(TAG_FOR_TEST_SECRET).unwrap();
        assert_eq!(tag, TAG_FOR_TEST_SECRET);
    }

    #[test]
    fn verify_rejects_empty_and_whitespace_tokens() {
        assert_eq!(verifier().verify(""), Err(TokenError::Missing));
        assert_eq!(verifier().verify("   "), Err(TokenError::Missing));
    }

    #[test]
    fn verify_rejects_uppercase_rendition_of_valid_tag() {
        // Comparison is against the lowercase encoding only.
        let upper = TAG_FOR_TEST_SECRET.to_uppercase();
        assert_eq!(verifier().verify(&upper), Err(TokenError::Mismatch));
    }

    #[test]
    fn verify_rejects_tag_computed_under_different_secret() {
        let other = TokenVerifier::new("another-secret");
        let other_tag = other.expected_tag().unwrap();
        assert_eq!(verifier().verify(&other_tag), Err(TokenError::Mismatch));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", verifier());
        assert!(!rendered.contains("test-secret"));
        assert!(rendered.contains("REDACTED"));
    }

    proptest! {
        #[test]
        fn verify_rejects_everything_but_the_expected_tag(token in "\\PC{1,80}") {
            let verifier = verifier();
            match verifier.verify(&token) {
                Ok(tag) => prop_assert_eq!(tag.as_str(), TAG_FOR_TEST_SECRET),
                Err(TokenError::Missing) => prop_assert!(token.trim().is_empty()),
                Err(TokenError::Mismatch) => prop_assert_ne!(token.as_str(), TAG_FOR_TEST_SECRET),
                Err(TokenError::Hmac) => prop_assert!(false, "HMAC init cannot fail"),
            }
        }
    }
}
