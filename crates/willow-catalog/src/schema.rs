//! Database schema SQL.

/// Catalog tables: categories and the cookies grouped under them.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS cookie_categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    is_required INTEGER NOT NULL DEFAULT 0,
    display_order INTEGER NOT NULL DEFAULT 0,
    locale TEXT NOT NULL DEFAULT 'en',
    UNIQUE (slug, locale)
);

CREATE TABLE IF NOT EXISTS cookies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_id INTEGER NOT NULL REFERENCES cookie_categories(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_categories_locale ON cookie_categories(locale);
CREATE INDEX IF NOT EXISTS idx_cookies_category ON cookies(category_id);
"#;
