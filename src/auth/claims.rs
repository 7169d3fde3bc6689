// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the per-request authentication context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

/// Claim set embedded in every issued token.
///
/// Immutable once constructed. The token is self-contained: these three
/// claims plus the signature are everything needed to authenticate a
/// request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the normalized email of the account.
    pub sub: String,

    /// Issued-at timestamp (Unix seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix seconds).
    pub exp: i64,
}

/// The identity resolved from a verified token for the current request.
///
/// This is the primary type used throughout the application to represent
/// the authenticated user making a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Id of the stored user record.
    pub user_id: String,
    /// Normalized email (matches the token's `sub` claim).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last profile update time.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Per-request authentication context.
///
/// Created by the access gate exactly once per request and attached to the
/// request's extensions; never mutated afterwards and never shared across
/// requests. Handlers receive it explicitly through extractors rather than
/// through any ambient lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// The request matched a public route; no identity was established.
    Anonymous,
    /// The request carried a valid token that resolved to this user.
    Authenticated(AuthenticatedUser),
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::Authenticated(_))
    }

    /// The resolved identity, if any.
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            AuthContext::Anonymous => None,
            AuthContext::Authenticated(user) => Some(user),
        }
    }
}
