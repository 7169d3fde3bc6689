// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! The variants distinguish every internal failure mode for logging, but
//! the HTTP response is identical for all of them: a generic 401. A caller
//! probing the API cannot tell a malformed token from an expired one, or
//! a bad signature from an account that no longer exists.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication failure, as seen while deciding a request.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present.
    MissingAuthHeader,
    /// Authorization header is not `Bearer <token>`.
    InvalidAuthHeader,
    /// Token is structurally invalid (bad segments, base64, or JSON).
    Malformed,
    /// Token signature does not match the payload.
    BadSignature,
    /// Token expiry is in the past.
    Expired,
    /// Verified claims carry no usable subject.
    MissingSubject,
    /// Subject does not resolve to a stored user (or the lookup timed out).
    UnknownSubject,
}

#[derive(Serialize)]
struct AuthErrorBody {
    message: &'static str,
}

impl AuthError {
    /// Stable code for this error, used in logs only.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::Malformed => "malformed_token",
            AuthError::BadSignature => "bad_signature",
            AuthError::Expired => "token_expired",
            AuthError::MissingSubject => "missing_subject",
            AuthError::UnknownSubject => "unknown_subject",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::Malformed => write!(f, "Token is malformed"),
            AuthError::BadSignature => write!(f, "Token signature is invalid"),
            AuthError::Expired => write!(f, "Token has expired"),
            AuthError::MissingSubject => write!(f, "Token carries no subject claim"),
            AuthError::UnknownSubject => write!(f, "Token subject does not resolve to a user"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    /// Every variant maps to the same response. The variant is logged by
    /// the gate before this conversion; the body must not echo it.
    fn into_response(self) -> Response {
        let body = Json(AuthErrorBody {
            message: "Unauthorized",
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn every_variant_returns_identical_401() {
        let variants = [
            AuthError::MissingAuthHeader,
            AuthError::InvalidAuthHeader,
            AuthError::Malformed,
            AuthError::BadSignature,
            AuthError::Expired,
            AuthError::MissingSubject,
            AuthError::UnknownSubject,
        ];

        let mut bodies = Vec::new();
        for variant in variants {
            let response = variant.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            bodies.push(String::from_utf8(bytes.to_vec()).unwrap());
        }

        // One observable shape across all failure causes.
        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(bodies[0], r#"{"message":"Unauthorized"}"#);
    }

    #[test]
    fn error_codes_stay_distinct_for_logging() {
        assert_ne!(
            AuthError::BadSignature.error_code(),
            AuthError::Expired.error_code()
        );
        assert_ne!(
            AuthError::MissingSubject.error_code(),
            AuthError::UnknownSubject.error_code()
        );
    }
}
