//! Catalog seeding — installs a default category catalog for new sites.

use std::path::Path;

use willow_catalog::{CatalogStore, NewCategory};
use willow_core::DataPaths;

/// Result of a seed run.
#[derive(Debug)]
pub struct SeedReport {
    pub categories_created: Vec<String>,
    pub cookies_created: usize,
    pub errors: Vec<String>,
}

fn default_catalog() -> Vec<(NewCategory, Vec<(&'static str, &'static str)>)> {
    let category = |slug: &str, title: &str, description: &str, is_required, order| NewCategory {
        slug: slug.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        is_required,
        order,
        locale: None,
    };

    vec![
        (
            category(
                "essential",
                "Essential",
                "Cookies the site cannot function without.",
                true,
                0,
            ),
            vec![
                ("sessionid", "Keeps you signed in"),
                ("csrftoken", "Protects forms against cross-site requests"),
            ],
        ),
        (
            category(
                "analytics",
                "Analytics",
                "Help us understand how the site is used.",
                false,
                1,
            ),
            vec![
                ("_ga", "Distinguishes visitors"),
                ("_gid", "Distinguishes visitors for 24 hours"),
            ],
        ),
        (
            category(
                "marketing",
                "Marketing",
                "Used to show relevant advertising.",
                false,
                2,
            ),
            vec![("_fbp", "Ad delivery and measurement")],
        ),
        (
            category(
                "preferences",
                "Preferences",
                "Remember choices like theme and language.",
                false,
                3,
            ),
            vec![("theme", "Stores the selected color theme")],
        ),
    ]
}

/// Seed the default catalog into the given data directory.
pub fn run_seed(data_dir: &Path) -> SeedReport {
    let mut report = SeedReport {
        categories_created: Vec::new(),
        cookies_created: 0,
        errors: Vec::new(),
    };

    let paths = match DataPaths::new(data_dir) {
        Ok(paths) => paths,
        Err(e) => {
            report.errors.push(format!("Failed to create data dirs: {}", e));
            return report;
        }
    };

    let store = match CatalogStore::open(&paths.catalog) {
        Ok(store) => store,
        Err(e) => {
            report.errors.push(format!("Failed to open catalog: {}", e));
            return report;
        }
    };

    for (category, cookies) in default_catalog() {
        let slug = category.slug.clone();
        if let Err(e) = store.upsert_category(&category, "en") {
            report.errors.push(format!("Category {}: {}", slug, e));
            continue;
        }
        report.categories_created.push(slug.clone());

        // Re-running the seed must not duplicate cookie rows.
        let existing: Vec<String> = match store.list_cookies(&slug, "en") {
            Ok(cookies) => cookies.into_iter().map(|c| c.name).collect(),
            Err(e) => {
                report.errors.push(format!("Category {}: {}", slug, e));
                continue;
            }
        };

        for (name, description) in cookies {
            if existing.iter().any(|n| n == name) {
                continue;
            }
            match store.add_cookie(&slug, "en", name, description) {
                Ok(_) => report.cookies_created += 1,
                Err(e) => report.errors.push(format!("Cookie {}: {}", name, e)),
            }
        }
    }

    report
}

/// Print a seed report to stdout.
pub fn print_report(report: &SeedReport) {
    println!("Seed report");
    println!("  Categories: {}", report.categories_created.join(", "));
    println!("  Cookies registered: {}", report.cookies_created);

    if report.errors.is_empty() {
        println!("  Status: ok");
    } else {
        println!("  Errors:");
        for error in &report.errors {
            println!("    - {}", error);
        }
    }
}
