//! Cookie wire contract — the `cookie_consent` cookie and its attributes.

use std::fmt;

/// Name of the cookie carrying the serialized consent string.
pub const CONSENT_COOKIE: &str = "cookie_consent";

/// Cookie lifetime: one year.
pub const CONSENT_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// SameSite cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render the `Set-Cookie` header value for a consent string.
///
/// One-year max-age, root path, SameSite=Lax, and deliberately no
/// HttpOnly: page scripts read the value to gate tag loading.
pub fn set_cookie_header(value: &str) -> String {
    format!(
        "{}={}; Max-Age={}; Path=/; SameSite={}",
        CONSENT_COOKIE,
        value,
        CONSENT_MAX_AGE_SECS,
        SameSite::Lax
    )
}

/// Extract the consent cookie's raw value from a request `Cookie` header.
///
/// Returns `None` when the header or the cookie is absent. An empty value
/// is returned as `Some("")` — presence and emptiness are distinct, since
/// banner visibility keys on presence alone.
pub fn read_consent_cookie(header: Option<&str>) -> Option<String> {
    let header = header?;
    for pair in header.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if name == CONSENT_COOKIE {
            return Some(value.to_string());
        }
    }
    None
}

/// The banner shows iff the consent cookie is absent from the request.
///
/// This is a presence check on the raw cookie, not on decoded content: an
/// empty-but-present value suppresses the banner even though decode then
/// reports every optional category declined.
pub fn show_banner(cookie: Option<&str>) -> bool {
    cookie.is_none()
}
