// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the domain records and the request/response data
//! structures used by the REST API. API-facing types derive `Serialize`,
//! `Deserialize`, and `ToSchema` for automatic JSON handling and OpenAPI
//! documentation.
//!
//! ## Model Categories
//!
//! - **Users**: Accounts and their public profile shape
//! - **Rentals**: Rental listings owned by users
//! - **Messages**: Inquiries sent about a listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// User Models
// =============================================================================

/// A user account as held by the store.
///
/// Deliberately not `Serialize`: the password hash must never reach a
/// response body. API responses use [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Email address, unique per account. Stored normalized (NFKC,
    /// lowercased); the normalized form is the comparison key.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last profile update time.
    pub updated_at: DateTime<Utc>,
}

/// Public profile of a user, as returned by `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    /// Unique identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last profile update time.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Email address for the new account.
    pub email: String,
    /// Plaintext password; hashed before storage, never persisted as-is.
    pub password: String,
    /// Display name.
    pub name: String,
}

/// Request to log in with existing credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address of the account.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Response carrying a freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed JWT to present as `Authorization: Bearer <token>`.
    pub token: String,
}

/// Generic `{"message": ...}` response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// Rental Models
// =============================================================================

/// A rental listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Rental {
    /// Unique identifier.
    pub id: String,
    /// Listing title.
    pub name: String,
    /// Surface area in square meters.
    pub surface: f64,
    /// Monthly price.
    pub price: f64,
    /// Optional picture URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Free-form description.
    pub description: String,
    /// Id of the owning user.
    pub owner_id: String,
    /// Listing creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Request to create a rental listing. The owner is taken from the
/// authenticated request, not from the body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRentalRequest {
    /// Listing title.
    pub name: String,
    /// Surface area in square meters.
    pub surface: f64,
    /// Monthly price.
    pub price: f64,
    /// Optional picture URL.
    #[serde(default)]
    pub picture: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// Request to update a rental listing. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateRentalRequest {
    /// Updated title.
    #[serde(default)]
    pub name: Option<String>,
    /// Updated surface area.
    #[serde(default)]
    pub surface: Option<f64>,
    /// Updated price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Updated picture URL.
    #[serde(default)]
    pub picture: Option<String>,
    /// Updated description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Envelope for the rental list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RentalsResponse {
    pub rentals: Vec<Rental>,
}

// =============================================================================
// Message Models
// =============================================================================

/// An inquiry sent by a user about a rental listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Message {
    /// Unique identifier.
    pub id: String,
    /// The listing this message is about.
    pub rental_id: String,
    /// The user who sent the message.
    pub user_id: String,
    /// Message body.
    pub message: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Request to send a message about a rental listing. The sender is the
/// authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    /// The listing the message is about.
    pub rental_id: String,
    /// Message body.
    pub message: String,
}
