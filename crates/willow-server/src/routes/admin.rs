//! Catalog admin routes — category and cookie maintenance.
//!
//! Stands in for the CMS admin panel: a minimal JSON API for keeping the
//! catalog current. Visitor-facing consent never goes through here.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::info;

use crate::routes::internal_error;
use crate::state::AppState;
use willow_catalog::NewCategory;
use willow_core::Error;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/admin/categories",
            get(list_categories).post(upsert_category),
        )
        .route("/admin/categories/{slug}", delete(delete_category))
        .route(
            "/admin/categories/{slug}/cookies",
            get(list_cookies).post(add_cookie),
        )
}

#[derive(serde::Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

#[derive(serde::Deserialize)]
struct CookieBody {
    name: String,
    #[serde(default)]
    description: String,
}

/// GET /consent/admin/categories — the full catalog for a locale.
async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Response {
    let locale = state.locale(query.locale);
    match state.catalog.list_active(&locale) {
        Ok(categories) => {
            let total = categories.len();
            Json(serde_json::json!({
                "locale": locale,
                "categories": categories,
                "total": total,
            }))
            .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// POST /consent/admin/categories — create or update a category.
async fn upsert_category(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewCategory>,
) -> Response {
    let slug = body.slug.clone();
    match state
        .catalog
        .upsert_category(&body, &state.config.default_locale)
    {
        Ok(id) => {
            info!("Category upserted: {} (id={})", slug, id);
            Json(serde_json::json!({ "id": id, "slug": slug })).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// DELETE /consent/admin/categories/{slug}.
async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Response {
    let locale = state.locale(query.locale);
    match state.catalog.delete_category(&slug, &locale) {
        Ok(true) => {
            info!("Category deleted: {} ({})", slug, locale);
            Json(serde_json::json!({ "deleted": true, "slug": slug })).into_response()
        }
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("Unknown category: {}", slug) })),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /consent/admin/categories/{slug}/cookies.
async fn list_cookies(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Response {
    let locale = state.locale(query.locale);
    match state.catalog.list_cookies(&slug, &locale) {
        Ok(cookies) => {
            let total = cookies.len();
            Json(serde_json::json!({
                "slug": slug,
                "cookies": cookies,
                "total": total,
            }))
            .into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// POST /consent/admin/categories/{slug}/cookies — register a cookie.
async fn add_cookie(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
    Json(body): Json<CookieBody>,
) -> Response {
    let locale = state.locale(query.locale);
    match state
        .catalog
        .add_cookie(&slug, &locale, &body.name, &body.description)
    {
        Ok(id) => Json(serde_json::json!({ "id": id, "name": body.name })).into_response(),
        Err(Error::NotFound(msg)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("Not found: {}", msg) })),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}
