// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{
    CreateRentalRequest, MessageResponse, Rental, RentalsResponse, UpdateRentalRequest,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/rentals",
    tag = "Rentals",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Rentals info loaded successfully", body = RentalsResponse),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn list_rentals(State(state): State<AppState>) -> Json<RentalsResponse> {
    let store = state.store.read().await;
    Json(RentalsResponse {
        rentals: store.list_rentals(),
    })
}

#[utoipa::path(
    get,
    path = "/api/rentals/{rental_id}",
    params(
        ("rental_id" = String, Path, description = "Identifier of the rental")
    ),
    tag = "Rentals",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Rental info loaded successfully", body = Rental),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Rental not found"),
    )
)]
pub async fn get_rental(
    Path(rental_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Rental>, ApiError> {
    let store = state.store.read().await;
    store
        .get_rental(&rental_id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Rental not found"))
}

/// Create a rental listing owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/rentals",
    request_body = CreateRentalRequest,
    tag = "Rentals",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Rental created with success", body = MessageResponse),
        (status = 400, description = "Input missing"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn create_rental(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateRentalRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name is required"));
    }

    let mut store = state.store.write().await;
    let rental = store.create_rental(&user.user_id, request);
    tracing::info!(rental_id = %rental.id, owner_id = %user.user_id, "rental created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Rental created !")),
    ))
}

#[utoipa::path(
    put,
    path = "/api/rentals/{rental_id}",
    params(
        ("rental_id" = String, Path, description = "Identifier of the rental to update")
    ),
    request_body = UpdateRentalRequest,
    tag = "Rentals",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Rental updated", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Rental not found"),
    )
)]
pub async fn update_rental(
    Path(rental_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateRentalRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut store = state.store.write().await;
    store.update_rental(&rental_id, request)?;
    Ok(Json(MessageResponse::new("Rental updated !")))
}
