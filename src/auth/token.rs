// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token issue and verification.
//!
//! Tokens are HS256 JWTs signed with a process-wide secret. Verification
//! is a pure function of (token, clock, secret): both `issue` and `verify`
//! take the current time as a parameter, so expiry handling is
//! deterministic and testable without touching the system clock.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::Claims;
use super::error::AuthError;
use crate::config::{ConfigError, MIN_TOKEN_SECRET_LEN};

/// Issues and verifies the service's bearer tokens.
///
/// Holds the only copy of the signing key material. Constructed once at
/// startup from the loaded configuration and shared read-only afterwards.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenCodec {
    /// Build a codec from the configured secret and token lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TokenSecretTooShort`] for secrets under
    /// [`MIN_TOKEN_SECRET_LEN`] bytes. Callers must treat this as fatal;
    /// there is no runtime fallback key.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Result<Self, ConfigError> {
        if secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(ConfigError::TokenSecretTooShort {
                actual: secret.len(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller-supplied clock in `verify`,
        // not against the system clock inside the decoder.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        })
    }

    /// Issue a signed token for `subject`, valid from `now` until
    /// `now + ttl`.
    ///
    /// Signing is deterministic: the same subject, clock and secret always
    /// produce the same token.
    pub fn issue(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }

    /// Verify a token string against the signing secret and the supplied
    /// clock, returning its claims.
    ///
    /// # Errors
    ///
    /// - [`AuthError::BadSignature`] when the signature does not match the
    ///   received header and payload
    /// - [`AuthError::Expired`] when `now` is past the `exp` claim
    /// - [`AuthError::Malformed`] for anything that does not parse as a
    ///   three-segment JWT with the expected claims
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?;

        if now.timestamp() > data.claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(data.claims)
    }
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &[u8] = b"test-secret-of-sufficient-length";
    const TTL: i64 = 86_400;

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, TTL).expect("secret is long enough")
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    /// Replace one base64 character so the segment stays decodable but the
    /// signed bytes change.
    fn tamper(segment: &str) -> String {
        let mut chars: Vec<char> = segment.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        chars.into_iter().collect()
    }

    #[test]
    fn issue_then_verify_roundtrips_subject() {
        let codec = codec();
        let now = fixed_now();
        let token = codec.issue("a@x.com", now).expect("token issues");

        let claims = codec.verify(&token, now).expect("token verifies");
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + TTL);
    }

    #[test]
    fn issuing_is_deterministic() {
        let codec = codec();
        let now = fixed_now();
        let first = codec.issue("a@x.com", now).expect("token issues");
        let second = codec.issue("a@x.com", now).expect("token issues");
        assert_eq!(first, second);
    }

    #[test]
    fn tampered_payload_fails_with_bad_signature() {
        let codec = codec();
        let now = fixed_now();
        let token = codec.issue("a@x.com", now).expect("token issues");

        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], tamper(parts[1]), parts[2]);

        assert_eq!(codec.verify(&forged, now), Err(AuthError::BadSignature));
    }

    #[test]
    fn tampered_signature_fails_with_bad_signature() {
        let codec = codec();
        let now = fixed_now();
        let token = codec.issue("a@x.com", now).expect("token issues");

        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], parts[1], tamper(parts[2]));

        assert_eq!(codec.verify(&forged, now), Err(AuthError::BadSignature));
    }

    #[test]
    fn token_from_other_secret_fails_with_bad_signature() {
        let codec = codec();
        let other =
            TokenCodec::new(b"another-secret-of-sufficient-len", TTL).expect("valid secret");
        let now = fixed_now();

        let token = other.issue("a@x.com", now).expect("token issues");
        assert_eq!(codec.verify(&token, now), Err(AuthError::BadSignature));
    }

    #[test]
    fn expired_token_fails_with_expired() {
        let codec = codec();
        let issued_at = fixed_now();
        let token = codec.issue("a@x.com", issued_at).expect("token issues");

        let after_expiry = issued_at + chrono::Duration::seconds(TTL + 1);
        assert_eq!(codec.verify(&token, after_expiry), Err(AuthError::Expired));
    }

    #[test]
    fn token_is_valid_at_exact_expiry() {
        let codec = codec();
        let issued_at = fixed_now();
        let token = codec.issue("a@x.com", issued_at).expect("token issues");

        let at_expiry = issued_at + chrono::Duration::seconds(TTL);
        assert!(codec.verify(&token, at_expiry).is_ok());
    }

    #[test]
    fn garbage_fails_with_malformed() {
        let codec = codec();
        let now = fixed_now();

        assert_eq!(codec.verify("", now), Err(AuthError::Malformed));
        assert_eq!(codec.verify("not-a-jwt", now), Err(AuthError::Malformed));
        assert_eq!(codec.verify("a.b", now), Err(AuthError::Malformed));
    }

    #[test]
    fn unsigned_token_with_valid_segments_is_rejected() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let codec = codec();
        let now = fixed_now();

        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            format!(
                r#"{{"sub":"a@x.com","iat":{},"exp":{}}}"#,
                now.timestamp(),
                now.timestamp() + TTL
            )
            .as_bytes(),
        );
        let forged = format!("{header}.{payload}.AAAA");

        assert_eq!(codec.verify(&forged, now), Err(AuthError::BadSignature));
    }

    #[test]
    fn short_secret_is_a_configuration_error() {
        let result = TokenCodec::new(b"short", TTL);
        assert!(matches!(
            result,
            Err(ConfigError::TokenSecretTooShort { actual: 5 })
        ));
    }
}
