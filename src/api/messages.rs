// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{CreateMessageRequest, MessageResponse};
use crate::state::AppState;

/// Send a message about a rental listing, on behalf of the authenticated
/// user.
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = CreateMessageRequest,
    tag = "Messages",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Message sent", body = MessageResponse),
        (status = 400, description = "Input missing or unknown rental"),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn create_message(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }

    let mut store = state.store.write().await;
    let message = store.create_message(&user.user_id, request)?;
    tracing::info!(message_id = %message.id, rental_id = %message.rental_id, "message recorded");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Message send with success")),
    ))
}
