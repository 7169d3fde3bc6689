// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::middleware::access_gate,
    models::{
        CreateMessageRequest, CreateRentalRequest, LoginRequest, MessageResponse, RegisterRequest,
        Rental, RentalsResponse, TokenResponse, UpdateRentalRequest, UserResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod messages;
pub mod rentals;

/// Assemble the full route tree.
///
/// Every route, public or private, sits behind the access gate; the gate
/// itself decides which requests may pass anonymously.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route(
            "/rentals",
            get(rentals::list_rentals).post(rentals::create_rental),
        )
        .route(
            "/rentals/{rental_id}",
            get(rentals::get_rental).put(rentals::update_rental),
        )
        .route("/messages", post(messages::create_message))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::liveness))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state, access_gate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::me,
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        rentals::update_rental,
        messages::create_message,
        health::liveness
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            UserResponse,
            MessageResponse,
            Rental,
            RentalsResponse,
            CreateRentalRequest,
            UpdateRentalRequest,
            CreateMessageRequest,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and identity"),
        (name = "Rentals", description = "Rental listing management"),
        (name = "Messages", description = "Messages about listings"),
        (name = "Health", description = "Liveness probes")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
