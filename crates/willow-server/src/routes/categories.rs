//! Per-category routes — single-category accept/decline and timestamp lookup.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::routes::{internal_error, with_consent_cookie};
use crate::state::{consent_cookie, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories/{slug}/accept", post(accept_category))
        .route("/categories/{slug}/decline", post(decline_category))
        .route("/categories/{slug}/timestamp", get(category_timestamp))
}

#[derive(serde::Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

async fn accept_category(
    state: State<Arc<AppState>>,
    path: Path<String>,
    query: Query<LocaleQuery>,
    headers: HeaderMap,
) -> Response {
    set_category(state, path, query, headers, true).await
}

async fn decline_category(
    state: State<Arc<AppState>>,
    path: Path<String>,
    query: Query<LocaleQuery>,
    headers: HeaderMap,
) -> Response {
    set_category(state, path, query, headers, false).await
}

/// POST /consent/categories/{slug}/accept|decline — single-category update
/// that leaves every other category's stored value untouched.
async fn set_category(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
    accepted: bool,
) -> Response {
    let locale = state.locale(query.locale);
    let category = match state.catalog.get_category(&slug, &locale) {
        Ok(Some(category)) => category,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": format!("Unknown category: {}", slug) })),
            )
                .into_response();
        }
        Err(e) => return internal_error(e),
    };

    // Required categories cannot be toggled; leave the cookie untouched.
    if category.is_required {
        return Json(serde_json::json!({
            "slug": slug,
            "required": true,
            "changed": false,
        }))
        .into_response();
    }

    let existing = consent_cookie(&headers).unwrap_or_default();
    let updated = willow_consent::update_consent(&existing, &slug, accepted, Utc::now());

    with_consent_cookie(
        &updated,
        serde_json::json!({
            "slug": slug,
            "accepted": accepted,
            "changed": true,
            "consentString": updated,
        }),
    )
}

/// GET /consent/categories/{slug}/timestamp — when the category was accepted.
async fn category_timestamp(
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    let existing = consent_cookie(&headers).unwrap_or_default();
    let accepted_at = willow_consent::consent_timestamp(&existing, &slug);

    Json(serde_json::json!({
        "slug": slug,
        "acceptedAt": accepted_at.map(|t| t.to_rfc3339()),
    }))
}
