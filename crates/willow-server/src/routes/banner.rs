//! Banner routes — visibility check and accept-all / decline-all actions.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use tracing::info;

use crate::routes::{internal_error, with_consent_cookie};
use crate::state::{consent_cookie, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/banner", get(banner_status).post(banner_action))
}

#[derive(serde::Deserialize)]
struct BannerBody {
    action: String,
    locale: Option<String>,
}

/// GET /consent/banner — whether the banner should show.
///
/// Keyed on the raw cookie's presence, not its decoded content.
async fn banner_status(headers: HeaderMap) -> Json<serde_json::Value> {
    let cookie = consent_cookie(&headers);
    Json(serde_json::json!({
        "showBanner": willow_consent::show_banner(cookie.as_deref()),
    }))
}

/// POST /consent/banner — accept or decline every category at once.
async fn banner_action(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BannerBody>,
) -> Response {
    let locale = state.locale(body.locale);
    let categories = match state.catalog.list_active(&locale) {
        Ok(categories) => categories,
        Err(e) => return internal_error(e),
    };

    let consent_map = match body.action.as_str() {
        "accept_all" => willow_consent::accept_all(&categories),
        "decline_all" => willow_consent::decline_all(&categories),
        other => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": format!("Unknown action: {}", other) })),
            )
                .into_response();
        }
    };

    let encoded = willow_consent::encode(&consent_map, &categories, Utc::now());
    info!("Banner action '{}' recorded for locale {}", body.action, locale);

    with_consent_cookie(
        &encoded,
        serde_json::json!({
            "action": body.action,
            "consentString": encoded,
            "showBanner": false,
        }),
    )
}
