//! Cookie consent core — codec, policy, and cookie wire contract.
//!
//! Encodes per-category consent decisions into a compact delimited string
//! (`analytics=2026-02-10T00:11:49+00:00|marketing=-1`), decodes it back
//! against a category catalog, and updates single categories in place
//! without disturbing other categories' recorded timestamps.

pub mod category;
pub mod codec;
pub mod cookie;
pub mod policy;

pub use category::CookieCategory;
pub use codec::{consent_timestamp, decode, encode, update_consent, CONSENT_GIVEN, DECLINED};
pub use cookie::{
    read_consent_cookie, set_cookie_header, show_banner, SameSite, CONSENT_COOKIE,
    CONSENT_MAX_AGE_SECS,
};
pub use policy::{accept_all, consent_states, decline_all, is_accepted, CategoryConsent};
