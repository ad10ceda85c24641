//! Consent-string codec — encode, decode, timestamp lookup, in-place update.
//!
//! Wire format: `slug=<RFC3339>|slug=-1|...` in catalog order, or the
//! literal `CONSENT_GIVEN` when the catalog has no optional categories.
//! A `-1` value means declined; any other value records the acceptance
//! instant. Required categories never appear in the string.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};

use crate::category::CookieCategory;

/// Sentinel stored when no optional categories exist, so the banner stays
/// hidden even though there is nothing to record.
pub const CONSENT_GIVEN: &str = "CONSENT_GIVEN";

/// Value recorded for a declined category.
pub const DECLINED: &str = "-1";

/// Encode a consent map into the serialized cookie value.
///
/// Categories are emitted in catalog order; slugs missing from `consent`
/// count as declined. Required categories are skipped entirely. Never
/// returns an empty string: an all-required (or empty) catalog yields the
/// sentinel instead.
pub fn encode(
    consent: &HashMap<String, bool>,
    categories: &[CookieCategory],
    now: DateTime<Utc>,
) -> String {
    let now = now.to_rfc3339();
    let mut parts = Vec::new();

    for category in categories {
        // Required categories are always accepted and never stored.
        if category.is_required {
            continue;
        }
        if consent.get(&category.slug).copied().unwrap_or(false) {
            parts.push(format!("{}={}", category.slug, now));
        } else {
            parts.push(format!("{}={}", category.slug, DECLINED));
        }
    }

    if parts.is_empty() {
        return CONSENT_GIVEN.to_string();
    }

    parts.join("|")
}

/// Decode a serialized value into a boolean consent map over the catalog.
///
/// The output covers every catalog category: required slugs are forced to
/// `true` no matter what the string holds for them, optional slugs are
/// `true` iff a stored value exists and is not `-1`. Malformed timestamp
/// text still counts as accepted here; only [`consent_timestamp`] parses
/// it. Stored slugs no longer in the catalog are dropped silently.
pub fn decode(serialized: &str, categories: &[CookieCategory]) -> HashMap<String, bool> {
    let raw = parse_raw(serialized);

    let mut consent = HashMap::new();
    for category in categories {
        if category.is_required {
            consent.insert(category.slug.clone(), true);
        } else {
            let value = raw
                .iter()
                .find(|(slug, _)| slug == &category.slug)
                .map(|(_, value)| value.as_str())
                .unwrap_or(DECLINED);
            consent.insert(category.slug.clone(), value != DECLINED);
        }
    }

    consent
}

/// Instant at which a category was accepted, if it was.
///
/// Only the first pair matching `slug` is considered (unlike `decode`,
/// which lets later duplicates overwrite earlier ones — both behaviors are
/// part of the stored-cookie contract). Declined, absent, or unparseable
/// values all yield `None`; this never fails.
pub fn consent_timestamp(serialized: &str, slug: &str) -> Option<DateTime<FixedOffset>> {
    for part in serialized.split('|') {
        let Some((stored_slug, value)) = part.split_once('=') else {
            continue;
        };
        if stored_slug != slug {
            continue;
        }
        if value == DECLINED {
            return None;
        }
        return DateTime::parse_from_rfc3339(value).ok();
    }
    None
}

/// Update a single category inside an existing serialized value.
///
/// Purely string-level: the catalog is not consulted, so slugs for deleted
/// or unknown categories are preserved verbatim, and categories absent from
/// `existing` are not re-added unless they are the one being updated. Entry
/// order is first-seen order; updating an existing slug keeps its position.
pub fn update_consent(
    existing: &str,
    slug: &str,
    accepted: bool,
    now: DateTime<Utc>,
) -> String {
    let mut raw = parse_raw(existing);

    let value = if accepted {
        now.to_rfc3339()
    } else {
        DECLINED.to_string()
    };

    match raw.iter_mut().find(|(stored_slug, _)| stored_slug == slug) {
        Some(entry) => entry.1 = value,
        None => raw.push((slug.to_string(), value)),
    }

    let parts: Vec<String> = raw
        .iter()
        .map(|(slug, value)| format!("{}={}", slug, value))
        .collect();
    parts.join("|")
}

/// Parse `slug=value` pairs preserving first-seen order; a duplicate slug
/// overwrites the stored value in place (last write wins). Chunks without
/// an `=` — including the sentinel — are skipped.
fn parse_raw(serialized: &str) -> Vec<(String, String)> {
    let mut raw: Vec<(String, String)> = Vec::new();
    for part in serialized.split('|') {
        let Some((slug, value)) = part.split_once('=') else {
            continue;
        };
        match raw.iter_mut().find(|(stored_slug, _)| stored_slug == slug) {
            Some(entry) => entry.1 = value.to_string(),
            None => raw.push((slug.to_string(), value.to_string())),
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn category(slug: &str, is_required: bool, order: i64) -> CookieCategory {
        CookieCategory {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            is_required,
            order,
        }
    }

    fn sample_catalog() -> Vec<CookieCategory> {
        vec![
            category("essential", true, 0),
            category("analytics", false, 1),
            category("marketing", false, 2),
        ]
    }

    fn t(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 0, 11, secs).unwrap()
    }

    #[test]
    fn test_encode_skips_required_and_orders_by_catalog() {
        let catalog = sample_catalog();
        let consent = HashMap::from([
            ("essential".to_string(), true),
            ("analytics".to_string(), true),
        ]);
        let encoded = encode(&consent, &catalog, t(49));
        assert_eq!(
            encoded,
            "analytics=2026-02-10T00:11:49+00:00|marketing=-1"
        );
    }

    #[test]
    fn test_encode_missing_slug_counts_as_declined() {
        let catalog = sample_catalog();
        let encoded = encode(&HashMap::new(), &catalog, t(49));
        assert_eq!(encoded, "analytics=-1|marketing=-1");
    }

    #[test]
    fn test_encode_all_required_catalog_yields_sentinel() {
        let catalog = vec![category("essential", true, 0)];
        assert_eq!(encode(&HashMap::new(), &catalog, t(0)), CONSENT_GIVEN);
    }

    #[test]
    fn test_encode_empty_catalog_yields_sentinel() {
        assert_eq!(encode(&HashMap::new(), &[], t(0)), CONSENT_GIVEN);
    }

    #[test]
    fn test_round_trip_preserves_optional_booleans() {
        let catalog = sample_catalog();
        let consent = HashMap::from([
            ("analytics".to_string(), true),
            ("marketing".to_string(), false),
        ]);
        let decoded = decode(&encode(&consent, &catalog, t(49)), &catalog);
        assert_eq!(decoded["analytics"], true);
        assert_eq!(decoded["marketing"], false);
        assert_eq!(decoded["essential"], true);
    }

    #[test]
    fn test_decode_empty_and_sentinel_parity() {
        let catalog = sample_catalog();
        let from_empty = decode("", &catalog);
        let from_sentinel = decode(CONSENT_GIVEN, &catalog);
        assert_eq!(from_empty, from_sentinel);
        assert_eq!(from_empty["essential"], true);
        assert_eq!(from_empty["analytics"], false);
        assert_eq!(from_empty["marketing"], false);
    }

    #[test]
    fn test_decode_sentinel_all_required_catalog() {
        let catalog = vec![category("essential", true, 0)];
        let decoded = decode(CONSENT_GIVEN, &catalog);
        assert_eq!(decoded["essential"], true);
    }

    #[test]
    fn test_decode_required_immune_to_stored_value() {
        let catalog = sample_catalog();
        let decoded = decode("essential=-1|analytics=-1", &catalog);
        assert_eq!(decoded["essential"], true);
    }

    #[test]
    fn test_decode_malformed_timestamp_still_counts_as_accepted() {
        let catalog = sample_catalog();
        let decoded = decode("analytics=not-a-timestamp", &catalog);
        assert_eq!(decoded["analytics"], true);
    }

    #[test]
    fn test_decode_skips_chunks_without_equals() {
        let catalog = sample_catalog();
        let decoded = decode("garbage|analytics=2026-02-10T00:11:49+00:00", &catalog);
        assert_eq!(decoded["analytics"], true);
        assert_eq!(decoded["marketing"], false);
    }

    #[test]
    fn test_decode_drops_unknown_slugs() {
        let catalog = sample_catalog();
        let decoded = decode("deleted=2026-02-10T00:11:49+00:00|analytics=-1", &catalog);
        assert!(!decoded.contains_key("deleted"));
        assert_eq!(decoded.len(), catalog.len());
    }

    #[test]
    fn test_decode_duplicate_slug_last_write_wins() {
        let catalog = sample_catalog();
        let decoded = decode("analytics=2026-02-10T00:11:49+00:00|analytics=-1", &catalog);
        assert_eq!(decoded["analytics"], false);
    }

    #[test]
    fn test_consent_timestamp_extraction() {
        let serialized = "analytics=2026-02-10T00:11:49+00:00|marketing=-1";
        let ts = consent_timestamp(serialized, "analytics").unwrap();
        assert_eq!(ts, t(49));
        assert!(consent_timestamp(serialized, "marketing").is_none());
        assert!(consent_timestamp(serialized, "preferences").is_none());
    }

    #[test]
    fn test_consent_timestamp_malformed_value_is_none() {
        assert!(consent_timestamp("analytics=not-a-timestamp", "analytics").is_none());
    }

    #[test]
    fn test_consent_timestamp_first_match_wins() {
        // Unlike decode, a later duplicate does not override the first pair.
        let serialized = "analytics=-1|analytics=2026-02-10T00:11:49+00:00";
        assert!(consent_timestamp(serialized, "analytics").is_none());
    }

    #[test]
    fn test_consent_timestamp_empty_string() {
        assert!(consent_timestamp("", "analytics").is_none());
    }

    #[test]
    fn test_update_preserves_other_slugs_and_order() {
        let existing = "analytics=2026-02-10T00:11:49+00:00|marketing=-1";
        let updated = update_consent(existing, "marketing", true, t(55));
        assert_eq!(
            updated,
            "analytics=2026-02-10T00:11:49+00:00|marketing=2026-02-10T00:11:55+00:00"
        );
    }

    #[test]
    fn test_update_is_idempotent_on_repeated_accept() {
        let s = "analytics=-1|marketing=-1";
        let once = update_consent(s, "analytics", true, t(10));
        let twice = update_consent(&once, "analytics", true, t(20));
        assert_eq!(
            twice,
            "analytics=2026-02-10T00:11:20+00:00|marketing=-1"
        );
    }

    #[test]
    fn test_update_appends_new_slug() {
        let updated = update_consent("analytics=-1", "preferences", false, t(0));
        assert_eq!(updated, "analytics=-1|preferences=-1");
    }

    #[test]
    fn test_update_on_empty_string() {
        let updated = update_consent("", "analytics", true, t(49));
        assert_eq!(updated, "analytics=2026-02-10T00:11:49+00:00");
    }

    #[test]
    fn test_update_on_sentinel_drops_it() {
        // The sentinel chunk has no `=`, so it is skipped like any other
        // malformed fragment and the update becomes the only entry.
        let updated = update_consent(CONSENT_GIVEN, "analytics", false, t(0));
        assert_eq!(updated, "analytics=-1");
    }

    #[test]
    fn test_update_preserves_unknown_and_required_slugs() {
        let existing = "essential=-1|deleted=2026-02-10T00:11:49+00:00";
        let updated = update_consent(existing, "analytics", true, t(55));
        assert_eq!(
            updated,
            "essential=-1|deleted=2026-02-10T00:11:49+00:00|analytics=2026-02-10T00:11:55+00:00"
        );
    }

    #[test]
    fn test_accept_all_scenario() {
        // Catalog listed in display order: essential first (order 0,
        // required), then analytics (order 1, optional).
        let catalog = vec![
            category("essential", true, 0),
            category("analytics", false, 1),
        ];
        let consent = HashMap::from([
            ("essential".to_string(), true),
            ("analytics".to_string(), true),
        ]);
        let encoded = encode(&consent, &catalog, t(49));
        assert_eq!(encoded, "analytics=2026-02-10T00:11:49+00:00");

        let decoded = decode(&encoded, &catalog);
        assert_eq!(decoded["essential"], true);
        assert_eq!(decoded["analytics"], true);
    }
}
