//! Catalog row types.

use serde::{Deserialize, Serialize};

/// Input for creating or updating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "isRequired")]
    pub is_required: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub locale: Option<String>,
}

/// An individual cookie within a category (e.g., `_ga` under analytics).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCookie {
    pub id: i64,
    pub name: String,
    pub description: String,
}
