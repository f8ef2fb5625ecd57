//! Fixture setup shared by the integration tests.

#![allow(dead_code)]

use savenest_meta::config::SiteConfig;
use savenest_meta::engine::MetadataEngine;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_site() -> TempDir {
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

pub fn articles_path(site: &TempDir) -> PathBuf {
    site.path().join("assets/data/blog_posts.json")
}

pub fn offers_path(site: &TempDir) -> PathBuf {
    site.path().join("assets/data/products.json")
}

/// Stock config with an upload token variable nobody sets.
pub fn test_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.upload.token_env = "SAVENEST_META_TEST_TOKEN_NEVER_SET".to_string();
    config
}

pub fn engine_for(site: &TempDir, config: &SiteConfig) -> MetadataEngine {
    MetadataEngine::from_config(config, site.path())
}

/// Rewrite a data file and push its mtime into the future so the next
/// freshness check sees it as changed.
pub fn edit_source(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();
}

/// Content of `<title>` in a rendered document.
pub fn title_of(html: &str) -> &str {
    let start = html.find("<title>").expect("document has a <title>") + "<title>".len();
    let end = html[start..].find("</title>").expect("<title> is closed") + start;
    &html[start..end]
}

/// `content` of a `<meta property="...">` tag.
pub fn meta_property<'a>(html: &'a str, property: &str) -> Option<&'a str> {
    let marker = format!(r#"<meta property="{property}" content=""#);
    let start = html.find(&marker)? + marker.len();
    let end = html[start..].find('"')? + start;
    Some(&html[start..end])
}
