//! Preferences routes — full per-category consent read and write.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::routes::{internal_error, with_consent_cookie};
use crate::state::{consent_cookie, AppState};
use willow_consent::CategoryConsent;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/preferences", get(get_preferences).post(set_preferences))
}

#[derive(serde::Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

#[derive(serde::Deserialize)]
struct PreferencesBody {
    categories: HashMap<String, bool>,
    locale: Option<String>,
}

/// GET /consent/preferences — categories with the visitor's current state.
async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
    headers: HeaderMap,
) -> Response {
    let locale = state.locale(query.locale);
    let categories = match state.catalog.list_active(&locale) {
        Ok(categories) => categories,
        Err(e) => return internal_error(e),
    };

    let cookie = consent_cookie(&headers);
    let serialized = cookie.clone().unwrap_or_default();
    let states = willow_consent::consent_states(&serialized, &categories);

    let items: Vec<serde_json::Value> = categories
        .iter()
        .zip(states.iter())
        .map(|(category, (_, consent))| {
            let (granted, accepted_at) = match consent {
                CategoryConsent::AlwaysGranted => (true, None),
                CategoryConsent::Granted { since } => (true, since.map(|t| t.to_rfc3339())),
                CategoryConsent::Denied => (false, None),
            };
            serde_json::json!({
                "slug": category.slug,
                "title": category.title,
                "description": category.description,
                "required": category.is_required,
                "granted": granted,
                "acceptedAt": accepted_at,
            })
        })
        .collect();

    Json(serde_json::json!({
        "locale": locale,
        "categories": items,
        "consentString": serialized,
        "showBanner": willow_consent::show_banner(cookie.as_deref()),
    }))
    .into_response()
}

/// POST /consent/preferences — store a full consent decision.
async fn set_preferences(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PreferencesBody>,
) -> Response {
    let locale = state.locale(body.locale);
    let categories = match state.catalog.list_active(&locale) {
        Ok(categories) => categories,
        Err(e) => return internal_error(e),
    };

    // Required categories cannot be opted out of, whatever the form said.
    let mut consent_map = HashMap::new();
    for category in &categories {
        let granted = category.is_required
            || body.categories.get(&category.slug).copied().unwrap_or(false);
        consent_map.insert(category.slug.clone(), granted);
    }

    let encoded = willow_consent::encode(&consent_map, &categories, Utc::now());

    with_consent_cookie(
        &encoded,
        serde_json::json!({
            "consentString": encoded,
            "consent": willow_consent::decode(&encoded, &categories),
        }),
    )
}
