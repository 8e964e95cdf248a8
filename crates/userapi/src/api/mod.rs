//! HTTP interface for userapi.
//!
//! This module builds the axum router that exposes the user store under
//! `/api/v1`, plus the health probe and the API documentation routes.

pub mod docs;
mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use error::{
    decode_json, ApiError, ApiResult, DeferredJson, ErrorBody, JsonBody, PathParam,
    INVALID_USER_ID, USER_NOT_FOUND,
};

use crate::store::UserStore;

/// Base path of the versioned API.
pub const API_BASE: &str = "/api/v1";

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The user store.
    pub store: Arc<UserStore>,
}

impl AppState {
    /// Wrap a store for use by the router.
    #[must_use]
    pub fn new(store: UserStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the application router.
///
/// When `docs` is true the OpenAPI document and Swagger UI are served under
/// `/swagger`.
pub fn router(state: AppState, docs: bool) -> Router {
    let users = Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        );

    let mut app = Router::new()
        .nest(API_BASE, users)
        .route("/health", get(handlers::health))
        .fallback(fallback);

    if docs {
        app = app.merge(docs::router());
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn fallback() -> ApiError {
    ApiError::not_found("route not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app(docs: bool) -> Router {
        crate::logging::init_test_logging();
        router(AppState::new(UserStore::seeded()), docs)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(true)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app(true)
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "route not found");
    }

    #[tokio::test]
    async fn test_docs_disabled() {
        let response = app(false)
            .oneshot(
                Request::builder()
                    .uri(docs::OPENAPI_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_docs_enabled() {
        let response = app(true)
            .oneshot(Request::builder().uri("/swagger").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
