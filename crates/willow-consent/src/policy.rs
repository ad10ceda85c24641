//! Category consent policy — derived per-visitor state and banner actions.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};

use crate::category::CookieCategory;
use crate::codec;

/// Effective consent for one category, derived from the serialized string.
///
/// Never persisted as an enum; only the serialized form persists. Required
/// categories are `AlwaysGranted` regardless of what the string holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryConsent {
    /// Required category: consent cannot be withheld.
    AlwaysGranted,
    /// Optional category the visitor accepted. `since` is `None` when the
    /// stored timestamp is missing or unparseable.
    Granted { since: Option<DateTime<FixedOffset>> },
    /// Optional category that was declined or never answered.
    Denied,
}

impl CategoryConsent {
    pub fn is_granted(&self) -> bool {
        !matches!(self, CategoryConsent::Denied)
    }
}

/// Derive per-category consent states in catalog order.
pub fn consent_states(
    serialized: &str,
    categories: &[CookieCategory],
) -> Vec<(String, CategoryConsent)> {
    let consent = codec::decode(serialized, categories);

    categories
        .iter()
        .map(|category| {
            let state = if category.is_required {
                CategoryConsent::AlwaysGranted
            } else if consent.get(&category.slug).copied().unwrap_or(false) {
                CategoryConsent::Granted {
                    since: codec::consent_timestamp(serialized, &category.slug),
                }
            } else {
                CategoryConsent::Denied
            };
            (category.slug.clone(), state)
        })
        .collect()
}

/// Consent map for the banner's accept-all action: every category true.
pub fn accept_all(categories: &[CookieCategory]) -> HashMap<String, bool> {
    categories
        .iter()
        .map(|category| (category.slug.clone(), true))
        .collect()
}

/// Consent map for the banner's decline-all action: only required
/// categories stay true.
pub fn decline_all(categories: &[CookieCategory]) -> HashMap<String, bool> {
    categories
        .iter()
        .map(|category| (category.slug.clone(), category.is_required))
        .collect()
}

/// Whether a decoded consent map grants a category; absent slugs are false.
pub fn is_accepted(consent: &HashMap<String, bool>, slug: &str) -> bool {
    consent.get(slug).copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

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

    #[test]
    fn test_consent_states_catalog_order() {
        let catalog = sample_catalog();
        let states = consent_states("analytics=2026-02-10T00:11:49+00:00|marketing=-1", &catalog);
        assert_eq!(states[0].0, "essential");
        assert_eq!(states[0].1, CategoryConsent::AlwaysGranted);
        assert_eq!(states[2].1, CategoryConsent::Denied);

        let expected = Utc.with_ymd_and_hms(2026, 2, 10, 0, 11, 49).unwrap();
        match &states[1].1 {
            CategoryConsent::Granted { since: Some(ts) } => assert_eq!(*ts, expected),
            other => panic!("expected granted with timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_granted_without_parseable_timestamp() {
        let catalog = sample_catalog();
        let states = consent_states("analytics=not-a-timestamp", &catalog);
        assert_eq!(states[1].1, CategoryConsent::Granted { since: None });
        assert!(states[1].1.is_granted());
    }

    #[test]
    fn test_missing_cookie_denies_optional_only() {
        let catalog = sample_catalog();
        let states = consent_states("", &catalog);
        assert!(states[0].1.is_granted());
        assert!(!states[1].1.is_granted());
        assert!(!states[2].1.is_granted());
    }

    #[test]
    fn test_accept_all_and_decline_all_maps() {
        let catalog = sample_catalog();
        let accepted = accept_all(&catalog);
        assert!(accepted.values().all(|granted| *granted));

        let declined = decline_all(&catalog);
        assert_eq!(declined["essential"], true);
        assert_eq!(declined["analytics"], false);
        assert_eq!(declined["marketing"], false);
    }

    #[test]
    fn test_is_accepted_missing_slug_is_false() {
        let consent = HashMap::from([("analytics".to_string(), true)]);
        assert!(is_accepted(&consent, "analytics"));
        assert!(!is_accepted(&consent, "marketing"));
    }
}
