//! Route definitions for the ReliefHub HTTP API.
//!
//! All REST routes are organized by domain and mounted under `/api`; the
//! WebSocket upgrade lives at `/ws`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(disaster_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let mut router = Router::new().nest("/api", api_routes);

    if state.config.realtime.enabled {
        router = router.route("/ws", get(handlers::ws::ws_upgrade));
    }

    router
        .layer(DefaultBodyLimit::max(state.config.storage.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth and account endpoints.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/profile", put(handlers::auth::update_profile))
        .route(
            "/auth/change-password",
            put(handlers::auth::change_password),
        )
        .route("/auth/users", get(handlers::auth::list_users))
        .route("/auth/users/{id}", delete(handlers::auth::delete_user))
}

/// Disaster lifecycle endpoints.
fn disaster_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/disasters",
            get(handlers::disaster::list).post(handlers::disaster::create),
        )
        .route("/disasters/nearby", get(handlers::disaster::nearby))
        .route(
            "/disasters/{id}",
            get(handlers::disaster::get)
                .put(handlers::disaster::update_details)
                .delete(handlers::disaster::delete),
        )
        .route(
            "/disasters/{id}/status",
            put(handlers::disaster::update_status),
        )
}

/// Notification endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list))
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/mark-all-read",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete),
        )
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build the CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors_config = &state.config.server.cors;

    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
