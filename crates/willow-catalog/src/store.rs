//! SQLite catalog store.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use crate::schema::SCHEMA_SQL;
use crate::types::{CatalogCookie, NewCategory};
use willow_consent::CookieCategory;
use willow_core::{Error, Result};

/// Catalog store backed by a single SQLite database.
pub struct CatalogStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl CatalogStore {
    /// Open or create the catalog store.
    ///
    /// `db_dir` is the directory (e.g., `data/catalog/`). The file will be
    /// `db_dir/willow.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Catalog(e.to_string()))?;
        let db_path = db_dir.join("willow.db");

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(e.to_string()))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let category_count = store.count_categories()?;
        info!(
            "CatalogStore initialized: {} categories, path={}",
            category_count,
            store.db_path.display()
        );

        Ok(store)
    }

    /// Active categories for a locale, in display order.
    ///
    /// Ordering is `display_order ASC, slug ASC` — the slug tie-break keeps
    /// the encode output stable when two categories share an order value.
    pub fn list_active(&self, locale: &str) -> Result<Vec<CookieCategory>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT slug, title, description, is_required, display_order
                 FROM cookie_categories
                 WHERE locale = ?1
                 ORDER BY display_order ASC, slug ASC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![locale], |row| {
                Ok(CookieCategory {
                    slug: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    is_required: row.get::<_, i64>(3)? != 0,
                    order: row.get(4)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Look up a single category by slug and locale.
    pub fn get_category(&self, slug: &str, locale: &str) -> Result<Option<CookieCategory>> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT slug, title, description, is_required, display_order
             FROM cookie_categories
             WHERE slug = ?1 AND locale = ?2",
            params![slug, locale],
            |row| {
                Ok(CookieCategory {
                    slug: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    is_required: row.get::<_, i64>(3)? != 0,
                    order: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(|e| Error::Database(e.to_string()))
    }

    /// Insert or update a category, keyed on (slug, locale). Returns the
    /// category's row id.
    pub fn upsert_category(&self, category: &NewCategory, default_locale: &str) -> Result<i64> {
        let locale = category.locale.as_deref().unwrap_or(default_locale);
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO cookie_categories
                 (slug, title, description, is_required, display_order, locale)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (slug, locale) DO UPDATE SET
                 title = excluded.title,
                 description = excluded.description,
                 is_required = excluded.is_required,
                 display_order = excluded.display_order",
            params![
                category.slug,
                category.title,
                category.description,
                category.is_required as i64,
                category.order,
                locale,
            ],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        conn.query_row(
            "SELECT id FROM cookie_categories WHERE slug = ?1 AND locale = ?2",
            params![category.slug, locale],
            |row| row.get(0),
        )
        .map_err(|e| Error::Database(e.to_string()))
    }

    /// Delete a category and (via cascade) its cookies. Returns whether a
    /// row was removed.
    pub fn delete_category(&self, slug: &str, locale: &str) -> Result<bool> {
        let conn = self.conn.lock();
        let removed = conn
            .execute(
                "DELETE FROM cookie_categories WHERE slug = ?1 AND locale = ?2",
                params![slug, locale],
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(removed > 0)
    }

    /// Register an individual cookie under a category.
    pub fn add_cookie(
        &self,
        category_slug: &str,
        locale: &str,
        name: &str,
        description: &str,
    ) -> Result<i64> {
        let conn = self.conn.lock();
        let category_id: Option<i64> = conn
            .query_row(
                "SELECT id FROM cookie_categories WHERE slug = ?1 AND locale = ?2",
                params![category_slug, locale],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        let category_id = category_id
            .ok_or_else(|| Error::NotFound(format!("category '{}'", category_slug)))?;

        conn.execute(
            "INSERT INTO cookies (category_id, name, description) VALUES (?1, ?2, ?3)",
            params![category_id, name, description],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(conn.last_insert_rowid())
    }

    /// Cookies registered under a category, ordered by name.
    pub fn list_cookies(&self, category_slug: &str, locale: &str) -> Result<Vec<CatalogCookie>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT c.id, c.name, c.description
                 FROM cookies c
                 JOIN cookie_categories cat ON cat.id = c.category_id
                 WHERE cat.slug = ?1 AND cat.locale = ?2
                 ORDER BY c.name ASC",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![category_slug, locale], |row| {
                Ok(CatalogCookie {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Total number of categories across all locales.
    pub fn count_categories(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM cookie_categories", [], |row| {
            row.get(0)
        })
        .map_err(|e| Error::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_category(slug: &str, is_required: bool, order: i64) -> NewCategory {
        NewCategory {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            is_required,
            order,
            locale: None,
        }
    }

    fn open_store() -> (TempDir, CatalogStore) {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_list_active_ordering() {
        let (_dir, store) = open_store();
        // Inserted out of display order; two categories share order 1 to
        // exercise the slug tie-break.
        store.upsert_category(&new_category("marketing", false, 1), "en").unwrap();
        store.upsert_category(&new_category("essential", true, 0), "en").unwrap();
        store.upsert_category(&new_category("analytics", false, 1), "en").unwrap();

        let slugs: Vec<String> = store
            .list_active("en")
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(slugs, ["essential", "analytics", "marketing"]);
    }

    #[test]
    fn test_list_active_filters_locale() {
        let (_dir, store) = open_store();
        store.upsert_category(&new_category("analytics", false, 0), "en").unwrap();
        let mut de = new_category("analytik", false, 0);
        de.locale = Some("de".to_string());
        store.upsert_category(&de, "en").unwrap();

        let en = store.list_active("en").unwrap();
        assert_eq!(en.len(), 1);
        assert_eq!(en[0].slug, "analytics");

        let de = store.list_active("de").unwrap();
        assert_eq!(de.len(), 1);
        assert_eq!(de[0].slug, "analytik");
    }

    #[test]
    fn test_upsert_updates_existing_row() {
        let (_dir, store) = open_store();
        let first_id = store
            .upsert_category(&new_category("analytics", false, 1), "en")
            .unwrap();

        let mut updated = new_category("analytics", true, 5);
        updated.title = "Analytics cookies".to_string();
        let second_id = store.upsert_category(&updated, "en").unwrap();

        assert_eq!(first_id, second_id);
        let category = store.get_category("analytics", "en").unwrap().unwrap();
        assert!(category.is_required);
        assert_eq!(category.order, 5);
        assert_eq!(category.title, "Analytics cookies");
        assert_eq!(store.count_categories().unwrap(), 1);
    }

    #[test]
    fn test_delete_category_cascades_cookies() {
        let (_dir, store) = open_store();
        store.upsert_category(&new_category("analytics", false, 0), "en").unwrap();
        store.add_cookie("analytics", "en", "_ga", "Google Analytics").unwrap();
        store.add_cookie("analytics", "en", "_gid", "Google Analytics").unwrap();

        assert!(store.delete_category("analytics", "en").unwrap());
        assert!(!store.delete_category("analytics", "en").unwrap());
        assert!(store.get_category("analytics", "en").unwrap().is_none());
        assert!(store.list_cookies("analytics", "en").unwrap().is_empty());
    }

    #[test]
    fn test_list_cookies_ordered_by_name() {
        let (_dir, store) = open_store();
        store.upsert_category(&new_category("analytics", false, 0), "en").unwrap();
        store.add_cookie("analytics", "en", "_gid", "session scoped").unwrap();
        store.add_cookie("analytics", "en", "_ga", "visitor id").unwrap();

        let names: Vec<String> = store
            .list_cookies("analytics", "en")
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["_ga", "_gid"]);
    }

    #[test]
    fn test_add_cookie_unknown_category() {
        let (_dir, store) = open_store();
        let err = store.add_cookie("missing", "en", "_ga", "").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
