//! Admin login check.
//!
//! There is one admin account, configured through the environment. Both the
//! submitted email and password are compared as HMAC-SHA256 tags keyed with
//! the session secret, so the comparison runs in constant time regardless of
//! input length.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::config::AdminCredentials;

type HmacSha256 = Hmac<Sha256>;

/// Check a submitted login against the configured credentials.
///
/// The email is compared case-insensitively after trimming.
#[must_use]
pub fn verify_credentials(
    credentials: &AdminCredentials,
    key: &SecretString,
    email: &str,
    password: &str,
) -> bool {
    let email_ok = tags_match(key, &credentials.email, &email.trim().to_lowercase());
    let password_ok = tags_match(key, credentials.password.expose_secret(), password);
    // Evaluate both before combining
    email_ok & password_ok
}

fn tags_match(key: &SecretString, expected: &str, provided: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key.expose_secret().as_bytes()) else {
        return false;
    };
    mac.update(expected.as_bytes());
    let expected_tag = mac.finalize().into_bytes();

    let Ok(mut mac) = HmacSha256::new_from_slice(key.expose_secret().as_bytes()) else {
        return false;
    };
    mac.update(provided.as_bytes());
    mac.verify_slice(&expected_tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> AdminCredentials {
        AdminCredentials {
            email: "admin@tirosompe.id".to_string(),
            password: SecretString::from("K7#qv9!Lm2@xR4$z"),
        }
    }

    fn key() -> SecretString {
        SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6e")
    }

    #[test]
    fn test_accepts_matching_login() {
        assert!(verify_credentials(
            &credentials(),
            &key(),
            "admin@tirosompe.id",
            "K7#qv9!Lm2@xR4$z"
        ));
    }

    #[test]
    fn test_email_is_case_insensitive() {
        assert!(verify_credentials(
            &credentials(),
            &key(),
            "  Admin@TiroSompe.id ",
            "K7#qv9!Lm2@xR4$z"
        ));
    }

    #[test]
    fn test_rejects_wrong_password() {
        assert!(!verify_credentials(
            &credentials(),
            &key(),
            "admin@tirosompe.id",
            "K7#qv9!Lm2@xR4$"
        ));
    }

    #[test]
    fn test_rejects_wrong_email() {
        assert!(!verify_credentials(
            &credentials(),
            &key(),
            "other@tirosompe.id",
            "K7#qv9!Lm2@xR4$z"
        ));
    }

    #[test]
    fn test_rejects_empty_login() {
        assert!(!verify_credentials(&credentials(), &key(), "", ""));
    }
}
