//! SQLite-backed cookie category catalog.
//!
//! Persists the categories (and the individual cookies they group) that
//! site administrators define, and serves them as the ordered list the
//! consent codec consumes.

pub mod schema;
pub mod store;
pub mod types;

pub use store::CatalogStore;
pub use types::{CatalogCookie, NewCategory};
