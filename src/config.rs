//! Service configuration.
//!
//! Handles loading, validating, and merging `savenest.toml`. Every value has a
//! stock default; a config file is a sparse overlay that only needs the keys it
//! wants to change. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! brand = "SaveNest"
//! base_url = "https://savenest.au"
//! asset_base_url = "https://savenest.au/assets/assets/"
//! default_title = "..."
//! default_description = "..."
//! default_image = "https://savenest.au/assets/assets/images/hero_energy.jpg"
//!
//! [content]
//! articles = "assets/data/blog_posts.json"   # relative to the config file
//! offers = "assets/data/products.json"
//! cache_file = ".savenest-cache/metadata.json"
//!
//! [guides.images]
//! electricity = "images/hero_energy.jpg"
//!
//! [document]
//! keywords = "..."
//! analytics_id = "G-XXXXXXX"                 # "" drops the tracking snippet
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 8080
//!
//! [upload]
//! route = "/upload"
//! token_env = "HUBSPOT_ACCESS_TOKEN"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! The upload credential is never read from the file; `upload.token_env`
//! names the environment variable that carries it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Branding, URLs, and the site-wide default metadata.
    pub site: SiteSettings,
    /// Content data files and the cache artifact location.
    pub content: ContentConfig,
    /// Guide page imagery.
    pub guides: GuideConfig,
    /// Static parts of the document shell.
    pub document: DocumentConfig,
    /// HTTP listener.
    pub server: ServerConfig,
    /// Upload relay endpoint.
    pub upload: UploadConfig,
    /// Log verbosity.
    pub logging: LoggingConfig,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.brand.trim().is_empty() {
            return Err(ConfigError::Validation("site.brand must not be empty".into()));
        }
        for (key, value) in [
            ("site.base_url", &self.site.base_url),
            ("site.asset_base_url", &self.site.asset_base_url),
            ("site.default_image", &self.site.default_image),
            ("upload.endpoint", &self.upload.endpoint),
        ] {
            if !is_http_url(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be an absolute http(s) URL, got {value:?}"
                )));
            }
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".into()));
        }
        if self.server.workers == Some(0) {
            return Err(ConfigError::Validation(
                "server.workers must be at least 1".into(),
            ));
        }
        if self.upload.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "upload.max_bytes must be non-zero".into(),
            ));
        }
        if !self.upload.route.starts_with('/') {
            return Err(ConfigError::Validation(
                "upload.route must start with '/'".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if let Some(id) = &self.document.analytics_id
            && !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ConfigError::Validation(
                "document.analytics_id may only contain letters, digits and '-'".into(),
            ));
        }
        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

/// Branding and site-wide default metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Brand name used in generated titles (`"... | SaveNest Blog"`).
    pub brand: String,
    /// Public origin; canonical URLs are built on it.
    pub base_url: String,
    /// Prefix for relative image references.
    pub asset_base_url: String,
    pub default_title: String,
    pub default_description: String,
    /// Absolute URL of the fallback preview image.
    pub default_image: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            brand: "SaveNest".to_string(),
            base_url: "https://savenest.au".to_string(),
            asset_base_url: "https://savenest.au/assets/assets/".to_string(),
            default_title: "Compare Energy Plans Australia 2026 | SaveNest – Save $500+"
                .to_string(),
            default_description: "Compare electricity, gas, internet, and insurance plans \
                in Australia. Find the best deals, understand the 2026 Solar Sharer Offer, \
                and stop paying the loyalty tax with SaveNest."
                .to_string(),
            default_image: "https://savenest.au/assets/assets/images/hero_energy.jpg"
                .to_string(),
        }
    }
}

/// Content data files and the cache artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// JSON array of articles.
    pub articles: PathBuf,
    /// JSON object of category → array of offers.
    pub offers: PathBuf,
    /// Persisted metadata cache. An empty path keeps the cache in memory only.
    pub cache_file: Option<PathBuf>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            articles: PathBuf::from("assets/data/blog_posts.json"),
            offers: PathBuf::from("assets/data/products.json"),
            cache_file: Some(PathBuf::from(".savenest-cache/metadata.json")),
        }
    }
}

impl ContentConfig {
    /// Resolve relative paths against `base_dir` (the config file's directory).
    pub fn resolved(&self, base_dir: &Path) -> ContentConfig {
        ContentConfig {
            articles: base_dir.join(&self.articles),
            offers: base_dir.join(&self.offers),
            cache_file: self
                .cache_file
                .as_ref()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| base_dir.join(p)),
        }
    }
}

/// Guide page imagery, keyed by lowercased utility name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuideConfig {
    pub images: BTreeMap<String, String>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        let images = [
            ("electricity", "images/hero_energy.jpg"),
            ("gas", "images/hero_gas.jpg"),
            ("internet", "images/hero_internet.jpg"),
            ("insurance", "images/hero_insurance.jpg"),
            ("solar", "images/hero_solar.jpg"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { images }
    }
}

/// Static parts of the document shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    pub keywords: String,
    pub author: String,
    /// Home-screen title for iOS.
    pub app_title: String,
    /// Google Analytics measurement id. No tracking snippet when absent or
    /// empty.
    pub analytics_id: Option<String>,
    pub organization_logo: String,
    pub organization_description: String,
    /// Script that boots the client-side app.
    pub bootstrap_script: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            keywords: "compare electricity Australia, utility comparison, save money energy, \
                solar sharer offer 2026, cheap internet plans, home insurance comparison, \
                savenest, cheapest electricity provider NSW 2026"
                .to_string(),
            author: "SaveNest Australia".to_string(),
            app_title: "savenest".to_string(),
            analytics_id: Some("G-P1K9W1BY9P".to_string()),
            organization_logo: "https://savenest.au/assets/assets/images/logo.png".to_string(),
            organization_description: "Compare utility services and save money on \
                electricity, gas, internet, and insurance in Australia."
                .to_string(),
            bootstrap_script: "flutter_bootstrap.js".to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Worker threads. When absent, actix-web picks one per core.
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

/// Upload relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadConfig {
    /// Path the relay is mounted on.
    pub route: String,
    /// Upstream file API.
    pub endpoint: String,
    /// Upstream folder the file lands in.
    pub folder_path: String,
    /// Upstream access level, sent as `{"access": ...}`.
    pub access: String,
    /// Environment variable holding the bearer token.
    pub token_env: String,
    /// `Access-Control-Allow-Origin` value.
    pub allowed_origin: String,
    /// Largest multipart body accepted, in bytes. Bigger uploads get 413.
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            route: "/upload".to_string(),
            endpoint: "https://api.hubapi.com/files/v3/files".to_string(),
            folder_path: "savenest_bills".to_string(),
            access: "PUBLIC_INDEXABLE".to_string(),
            token_env: "HUBSPOT_ACCESS_TOKEN".to_string(),
            allowed_origin: "*".to_string(),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Logging settings. `RUST_LOG` still wins when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Directory relative content paths resolve against.
pub fn config_base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# SaveNest metadata server configuration
# ======================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity and default metadata
# ---------------------------------------------------------------------------
[site]
# Brand used in generated titles: "{title} | {brand} Blog".
brand = "SaveNest"

# Public origin. Canonical URLs are "{base_url}/blog/{slug}" and so on.
base_url = "https://savenest.au"

# Relative image references are appended to this (after one leading
# "assets/" segment is stripped).
asset_base_url = "https://savenest.au/assets/assets/"

# Metadata for the home page and for anything that doesn't resolve.
default_title = "Compare Energy Plans Australia 2026 | SaveNest – Save $500+"
default_description = "Compare electricity, gas, internet, and insurance plans in Australia. Find the best deals, understand the 2026 Solar Sharer Offer, and stop paying the loyalty tax with SaveNest."
default_image = "https://savenest.au/assets/assets/images/hero_energy.jpg"

# ---------------------------------------------------------------------------
# Content data files (paths relative to this file)
# ---------------------------------------------------------------------------
[content]
articles = "assets/data/blog_posts.json"
offers = "assets/data/products.json"

# Persisted path → metadata map. Rebuilt whenever a data file is newer.
# Set to "" to keep the cache in memory only.
cache_file = ".savenest-cache/metadata.json"

# ---------------------------------------------------------------------------
# Guide pages (/guides/{state}/{utility})
# ---------------------------------------------------------------------------
[guides.images]
# Preview image per utility (lowercase). Unlisted utilities use
# site.default_image.
electricity = "images/hero_energy.jpg"
gas = "images/hero_gas.jpg"
insurance = "images/hero_insurance.jpg"
internet = "images/hero_internet.jpg"
solar = "images/hero_solar.jpg"

# ---------------------------------------------------------------------------
# Document shell
# ---------------------------------------------------------------------------
[document]
keywords = "compare electricity Australia, utility comparison, save money energy, solar sharer offer 2026, cheap internet plans, home insurance comparison, savenest, cheapest electricity provider NSW 2026"
author = "SaveNest Australia"
app_title = "savenest"
# Google Analytics measurement id. Set to "" to drop the tracking snippet.
analytics_id = "G-P1K9W1BY9P"
organization_logo = "https://savenest.au/assets/assets/images/logo.png"
organization_description = "Compare utility services and save money on electricity, gas, internet, and insurance in Australia."
bootstrap_script = "flutter_bootstrap.js"

# ---------------------------------------------------------------------------
# HTTP server
# ---------------------------------------------------------------------------
[server]
bind = "127.0.0.1"
port = 8080
# Worker threads. Omit to use one per CPU core.
# workers = 4

# ---------------------------------------------------------------------------
# Upload relay
# ---------------------------------------------------------------------------
[upload]
route = "/upload"
endpoint = "https://api.hubapi.com/files/v3/files"
folder_path = "savenest_bills"
access = "PUBLIC_INDEXABLE"
# Environment variable holding the bearer token. If it is unset, the
# client's own "Authorization: Bearer ..." header is relayed instead.
token_env = "HUBSPOT_ACCESS_TOKEN"
allowed_origin = "*"
# Largest upload accepted, in bytes (10 MiB). Larger bodies are rejected
# with 413 before anything is relayed.
max_bytes = 10485760

# ---------------------------------------------------------------------------
# Logging (RUST_LOG overrides)
# ---------------------------------------------------------------------------
[logging]
level = "info"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn default_site_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.site.brand, "SaveNest");
        assert_eq!(config.site.base_url, "https://savenest.au");
        assert_eq!(
            config.site.default_image,
            "https://savenest.au/assets/assets/images/hero_energy.jpg"
        );
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[site]
brand = "Nest"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.brand, "Nest");
        // Defaults preserved
        assert_eq!(config.site.base_url, "https://savenest.au");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r#"
[site]
brnad = "typo"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[database]\nurl = \"x\"\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_rejects_empty_brand() {
        let mut config = SiteConfig::default();
        config.site.brand = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_relative_base_url() {
        let mut config = SiteConfig::default();
        config.site.base_url = "savenest.au".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.base_url"));
    }

    #[test]
    fn validate_rejects_zero_upload_limit() {
        let mut config = SiteConfig::default();
        config.upload.max_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("upload.max_bytes"));
    }

    #[test]
    fn validate_rejects_relative_default_image() {
        let mut config = SiteConfig::default();
        config.site.default_image = "images/hero.jpg".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let mut config = SiteConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let mut config = SiteConfig::default();
        config.server.workers = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_log_level() {
        let mut config = SiteConfig::default();
        config.logging.level = "verbose".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_uppercase_log_level() {
        let mut config = SiteConfig::default();
        config.logging.level = "DEBUG".into();
        config.validate().unwrap();
    }

    #[test]
    fn validate_rejects_upload_route_without_slash() {
        let mut config = SiteConfig::default();
        config.upload.route = "upload".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_script_in_analytics_id() {
        let mut config = SiteConfig::default();
        config.document.analytics_id = Some("G-1');alert(1);//".into());
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_overlays_nested_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[site]
brand = "A"
base_url = "https://a.example"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[site]\nbrand = \"B\"\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["site"]["brand"].as_str(), Some("B"));
        assert_eq!(merged["site"]["base_url"].as_str(), Some("https://a.example"));
    }

    #[test]
    fn merge_toml_replaces_non_table_values() {
        let base: toml::Value = toml::from_str("port = 1").unwrap();
        let overlay: toml::Value = toml::from_str("port = 2").unwrap();
        assert_eq!(merge_toml(base, overlay)["port"].as_integer(), Some(2));
    }

    #[test]
    fn guide_images_overlay_adds_to_defaults() {
        let overlay: toml::Value =
            toml::from_str("[guides.images]\nwater = \"images/water.jpg\"\n").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.guides.images["water"], "images/water.jpg");
        assert_eq!(config.guides.images["gas"], "images/hero_gas.jpg");
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_config_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("savenest.toml")).unwrap();
        assert_eq!(config.site.brand, "SaveNest");
    }

    #[test]
    fn load_config_reads_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("savenest.toml");
        fs::write(&path, "[server]\nport = 9090\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.bind, "127.0.0.1");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("savenest.toml");
        fs::write(&path, "this is not [valid toml").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_runs_validation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("savenest.toml");
        fs::write(&path, "[server]\nport = 0\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.site.default_title, defaults.site.default_title);
        assert_eq!(
            parsed.site.default_description,
            defaults.site.default_description
        );
        assert_eq!(parsed.document.keywords, defaults.document.keywords);
        assert_eq!(parsed.guides.images, defaults.guides.images);
        assert_eq!(parsed.content.cache_file, defaults.content.cache_file);
        assert_eq!(parsed.upload.endpoint, defaults.upload.endpoint);
        assert_eq!(parsed.upload.max_bytes, defaults.upload.max_bytes);
    }

    // =========================================================================
    // Path resolution
    // =========================================================================

    #[test]
    fn content_paths_resolve_against_base_dir() {
        let resolved = ContentConfig::default().resolved(Path::new("/srv/site"));
        assert_eq!(
            resolved.articles,
            PathBuf::from("/srv/site/assets/data/blog_posts.json")
        );
        assert_eq!(
            resolved.cache_file,
            Some(PathBuf::from("/srv/site/.savenest-cache/metadata.json"))
        );
    }

    #[test]
    fn absolute_content_paths_are_kept() {
        let content = ContentConfig {
            articles: PathBuf::from("/data/a.json"),
            offers: PathBuf::from("/data/o.json"),
            cache_file: None,
        };
        let resolved = content.resolved(Path::new("/srv/site"));
        assert_eq!(resolved.articles, PathBuf::from("/data/a.json"));
        assert_eq!(resolved.cache_file, None);
    }

    #[test]
    fn empty_cache_file_disables_persistence() {
        let content = ContentConfig {
            cache_file: Some(PathBuf::new()),
            ..ContentConfig::default()
        };
        assert_eq!(content.resolved(Path::new("/srv")).cache_file, None);
    }

    #[test]
    fn config_base_dir_of_bare_filename_is_cwd() {
        assert_eq!(config_base_dir(Path::new("savenest.toml")), PathBuf::from("."));
        assert_eq!(
            config_base_dir(Path::new("/etc/savenest/savenest.toml")),
            PathBuf::from("/etc/savenest")
        );
    }
}
