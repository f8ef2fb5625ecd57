//! Shared test utilities for the savenest-meta test suite.
//!
//! Provides fixture setup, content builders, and mtime helpers for the
//! staleness tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let store = ContentStore::load(&fixture_paths(&tmp));
//! assert_eq!(article_slugs(store.articles()), ["nbn-speed", "solar-sharer-2026", "switch-gas"]);
//!
//! touch_after(&fixture_paths(&tmp).offers, Duration::from_secs(60));
//! ```

use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::content::ContentPaths;
use crate::engine::MetadataEngine;
use crate::types::{Article, Offer};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// The layout matches the stock config (`assets/data/*.json`), so a default
/// [`SiteConfig`] with the temp dir as base directory reads the fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Content paths of a fixture copy.
pub fn fixture_paths(tmp: &TempDir) -> ContentPaths {
    ContentPaths::new(
        tmp.path().join("assets/data/blog_posts.json"),
        tmp.path().join("assets/data/products.json"),
    )
}

/// Engine over a fixture copy with the stock config.
pub fn fixture_engine(tmp: &TempDir) -> MetadataEngine {
    MetadataEngine::from_config(&SiteConfig::default(), tmp.path())
}

/// Write a file under the temp dir and return its path.
pub fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

// =========================================================================
// Content builders
// =========================================================================

/// Article with only a slug set.
pub fn article(slug: &str) -> Article {
    Article {
        slug: slug.to_string(),
        ..Article::default()
    }
}

/// Offer with id, category, and provider set.
pub fn offer(id: &str, category: &str, provider: &str) -> Offer {
    Offer {
        id: id.to_string(),
        category: category.to_string(),
        provider_name: provider.to_string(),
        plan_name: "Plan".to_string(),
        ..Offer::default()
    }
}

/// All article slugs in order.
pub fn article_slugs(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.slug.as_str()).collect()
}

// =========================================================================
// Modification times
// =========================================================================

/// Set a file's modification time.
pub fn set_mtime(path: &Path, when: DateTime<Utc>) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::from(when))
        .unwrap();
}

/// Push a file's modification time `by` into the future, as an edit made
/// after any cache build in the test would.
pub fn touch_after(path: &Path, by: Duration) {
    set_mtime(path, DateTime::<Utc>::from(SystemTime::now() + by));
}
