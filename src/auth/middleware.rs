// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The access gate.
//!
//! One middleware, applied to the whole router, makes the per-request
//! authentication decision. A request is either matched against the public
//! route set and passed through anonymously, or it must present a bearer
//! token that verifies and resolves to a stored user. The decision is made
//! exactly once and is terminal: a denial short-circuits before any
//! handler runs.
//!
//! Handlers never re-check authentication; they read the context the gate
//! attached via the extractors in `extractor.rs`.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::claims::{AuthContext, AuthenticatedUser};
use super::error::AuthError;
use super::resolver::{self, LOOKUP_TIMEOUT};
use crate::state::AppState;

/// Gate middleware. Wire with
/// `axum::middleware::from_fn_with_state(state, access_gate)` around the
/// full route tree; routes outside it would be unreachable to clients with
/// a consistent policy, so there are none.
pub async fn access_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();

    if state.public_routes.is_public(&path) {
        request.extensions_mut().insert(AuthContext::Anonymous);
        return next.run(request).await;
    }

    match authenticate(&state, request.headers()).await {
        Ok(user) => {
            request
                .extensions_mut()
                .insert(AuthContext::Authenticated(user));
            next.run(request).await
        }
        Err(error) => {
            // The cause stays in the logs; the response is uniform.
            tracing::debug!(path = %path, error_code = error.error_code(), "request denied");
            error.into_response()
        }
    }
}

/// Run the private-route checks: bearer token present, signature and
/// expiry valid, subject resolves to a user.
async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();

    let claims = state.tokens.verify(token, Utc::now())?;
    resolver::resolve(state, &claims, LOOKUP_TIMEOUT).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::{middleware, Json, Router};
    use chrono::Duration;
    use tower::ServiceExt;

    use crate::auth::extractor::Auth;
    use crate::state::testing;

    fn test_app(state: AppState) -> Router {
        Router::new()
            .route("/health", get(|| async { "ok" }))
            .route(
                "/api/rentals",
                get(|Auth(user): Auth| async move { Json(user.email) }),
            )
            .layer(middleware::from_fn_with_state(state.clone(), access_gate))
            .with_state(state)
    }

    async fn status_and_body(app: Router, request: HttpRequest<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_request(path: &str, bearer: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(path);
        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn public_route_allows_anonymous_requests() {
        let state = testing::state();
        let (status, _) = status_and_body(test_app(state), get_request("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn public_route_ignores_invalid_tokens() {
        let state = testing::state();
        let (status, _) = status_and_body(
            test_app(state),
            get_request("/health", Some("not-even-a-token")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler_with_identity() {
        let state = testing::state();
        let user = testing::seed_user(&state, "a@x.com", "pw").await;
        let token = state.tokens.issue(&user.email, Utc::now()).unwrap();

        let (status, body) =
            status_and_body(test_app(state), get_request("/api/rentals", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#""a@x.com""#);
    }

    #[tokio::test]
    async fn all_denial_causes_look_identical() {
        let state = testing::state();
        testing::seed_user(&state, "a@x.com", "pw").await;

        let expired = state
            .tokens
            .issue("a@x.com", Utc::now() - Duration::days(2))
            .unwrap();
        let unknown_subject = state.tokens.issue("ghost@x.com", Utc::now()).unwrap();
        let foreign = testing::codec_with_other_secret()
            .issue("a@x.com", Utc::now())
            .unwrap();

        let cases: Vec<Option<String>> = vec![
            None,
            Some("garbage".into()),
            Some(expired),
            Some(unknown_subject),
            Some(foreign),
        ];

        let mut responses = Vec::new();
        for bearer in &cases {
            let (status, body) = status_and_body(
                test_app(state.clone()),
                get_request("/api/rentals", bearer.as_deref()),
            )
            .await;
            responses.push((status, body));
        }

        for (status, body) in &responses {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, &responses[0].1);
        }
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_denied() {
        let state = testing::state();
        let request = HttpRequest::builder()
            .uri("/api/rentals")
            .header(AUTHORIZATION, "Basic dXNlcjpwdw==")
            .body(Body::empty())
            .unwrap();

        let (status, _) = status_and_body(test_app(state), request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
