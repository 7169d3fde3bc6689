// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for the request authentication context.
//!
//! These are read-only views of what the access gate attached to the
//! request. They never verify tokens themselves; a request that skipped
//! the gate has no context and is rejected, which keeps the gate the
//! single enforcement point.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is the resolved AuthenticatedUser
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::claims::{AuthContext, AuthenticatedUser};
use super::error::AuthError;

/// Extractor requiring a resolved identity.
///
/// Rejects with the uniform 401 when the context is anonymous or absent.
pub struct Auth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(AuthContext::Authenticated(user)) => Ok(Auth(user.clone())),
            _ => Err(AuthError::MissingAuthHeader),
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    /// Always succeeds. A request the gate never saw reads as anonymous.
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .unwrap_or(AuthContext::Anonymous))
    }
}
