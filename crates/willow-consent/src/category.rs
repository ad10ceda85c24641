//! Cookie category record — the catalog entry the codec reads.

use serde::{Deserialize, Serialize};

/// A cookie category as supplied by the catalog.
///
/// The codec only reads `slug` and `is_required`; the display fields ride
/// along for the HTTP layer. Catalogs hand these over already ordered
/// (display order ascending, then slug ascending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieCategory {
    /// Unique identifier within a locale (e.g., `analytics`).
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Description of what these cookies do.
    pub description: String,
    /// Required categories are always granted and never stored in the cookie.
    #[serde(rename = "isRequired")]
    pub is_required: bool,
    /// Display order (lower numbers appear first).
    pub order: i64,
}
