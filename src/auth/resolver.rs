// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity resolution.
//!
//! Turns a verified claim set into a stored user via the user-lookup
//! collaborator. The lookup may be backed by I/O, so it is bounded by a
//! timeout; a lookup that does not answer in time reads as an unknown
//! subject and the request is denied rather than left hanging or surfaced
//! as a server error.

use std::future::Future;
use std::time::Duration;

use super::claims::{AuthenticatedUser, Claims};
use super::error::AuthError;
use crate::models::User;

/// Upper bound on one user lookup during request authentication.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// The user-lookup collaborator consumed during resolution.
pub trait UserLookup: Send + Sync {
    /// Find a user by (normalized) email.
    fn find_user_by_email(&self, email: &str) -> impl Future<Output = Option<User>> + Send;
}

/// Resolve verified claims to a concrete identity.
///
/// # Errors
///
/// - [`AuthError::MissingSubject`] when the claim set carries no usable
///   subject (absent subjects never reach here; an empty one does)
/// - [`AuthError::UnknownSubject`] when no user matches, or the lookup
///   exceeds `lookup_timeout`
pub async fn resolve<L: UserLookup>(
    lookup: &L,
    claims: &Claims,
    lookup_timeout: Duration,
) -> Result<AuthenticatedUser, AuthError> {
    let subject = claims.sub.trim();
    if subject.is_empty() {
        return Err(AuthError::MissingSubject);
    }

    let found = match tokio::time::timeout(lookup_timeout, lookup.find_user_by_email(subject)).await
    {
        Ok(found) => found,
        Err(_) => {
            tracing::warn!(subject, "user lookup timed out during authentication");
            None
        }
    };

    found
        .map(AuthenticatedUser::from)
        .ok_or(AuthError::UnknownSubject)
}
