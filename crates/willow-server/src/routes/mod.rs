//! HTTP route handlers.

pub mod admin;
pub mod banner;
pub mod categories;
pub mod preferences;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/consent", consent_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn consent_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(preferences::routes())
        .merge(banner::routes())
        .merge(categories::routes())
        .merge(admin::routes())
}

/// JSON response that also (re)writes the consent cookie.
pub(crate) fn with_consent_cookie(value: &str, body: serde_json::Value) -> Response {
    (
        AppendHeaders([(header::SET_COOKIE, willow_consent::set_cookie_header(value))]),
        Json(body),
    )
        .into_response()
}

pub(crate) fn internal_error(err: willow_core::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}
