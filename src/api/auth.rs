// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication endpoints: register, login, current user.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::auth::{password, Auth, AuthenticatedUser};
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::state::AppState;

impl From<AuthenticatedUser> for UserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.user_id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Register a new account and return a freshly issued token.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "User registered successfully", body = TokenResponse),
        (status = 400, description = "Input missing or email already in use"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::bad_request("A valid email is required"));
    }
    if request.password.is_empty() {
        return Err(ApiError::bad_request("Password is required"));
    }
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }

    let hash = password::hash_password(&request.password)
        .map_err(|_| ApiError::internal("Failed to hash password"))?;
    let user = state.store.write().await.create_user(email, name, hash)?;

    tracing::info!(user_id = %user.id, "user registered");

    let token = state
        .tokens
        .issue(&user.email, Utc::now())
        .map_err(|_| ApiError::internal("Failed to issue token"))?;
    Ok(Json(TokenResponse { token }))
}

/// Log in with email and password.
///
/// Failure is uniform: bad email and bad password return the same status,
/// body, and code path. Unknown accounts still pay for one hash
/// verification against a dummy hash.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "User logged in successfully", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state.store.read().await.find_user_by_email(&request.email);

    let stored_hash = user
        .as_ref()
        .map(|u| u.password_hash.as_str())
        .unwrap_or_else(password::dummy_hash);
    let password_ok = password::verify_password(stored_hash, &request.password);

    match user {
        Some(user) if password_ok => {
            let token = state
                .tokens
                .issue(&user.email, Utc::now())
                .map_err(|_| ApiError::internal("Failed to issue token"))?;
            Ok(Json(TokenResponse { token }))
        }
        _ => Err(ApiError::new(StatusCode::UNAUTHORIZED, "error")),
    }
}

/// Return the authenticated user's public profile.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User info loaded successfully", body = UserResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn me(Auth(user): Auth) -> Json<UserResponse> {
    Json(user.into())
}
