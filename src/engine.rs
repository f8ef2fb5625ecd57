//! Per-request pipeline: classify → cache / generate → render.
//!
//! ```text
//! "/blog/nbn-speed?ref=x"
//!     │ route::classify
//!     ▼
//! RouteMatch::Article { slug: "nbn-speed" }
//!     │ MetadataCache::lookup("blog/nbn-speed")     (content routes)
//!     │ MetadataResolver::guide_record(..)           (guide routes)
//!     ▼
//! Resolution { record, source: Cache }
//!     │ DocumentRenderer::render
//!     ▼
//! "<!DOCTYPE html>..."
//! ```
//!
//! Content routes are answered only from the cache. A cache miss means the
//! key isn't in the content, so it renders the default record rather than
//! attempting a live lookup.

use crate::cache::{MetadataCache, RebuildSummary};
use crate::config::SiteConfig;
use crate::content::ContentPaths;
use crate::metadata::MetadataResolver;
use crate::render::DocumentRenderer;
use crate::route::{self, RouteMatch};
use crate::types::MetadataRecord;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Why a route got the default record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultReason {
    Home,
    /// The path matched no route grammar.
    MalformedRoute,
    /// A content route whose key isn't in the content.
    NotFound,
}

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum MetadataSource {
    Cache,
    Generated,
    Default(DefaultReason),
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataSource::Cache => f.write_str("cache"),
            MetadataSource::Generated => f.write_str("generated"),
            MetadataSource::Default(DefaultReason::Home) => f.write_str("default (home)"),
            MetadataSource::Default(DefaultReason::MalformedRoute) => {
                f.write_str("default (unknown route)")
            }
            MetadataSource::Default(DefaultReason::NotFound) => {
                f.write_str("default (not found)")
            }
        }
    }
}

/// A resolved request path.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub route: RouteMatch,
    pub record: MetadataRecord,
    pub source: MetadataSource,
}

/// Owns the cache, resolver, and renderer for one site.
#[derive(Debug)]
pub struct MetadataEngine {
    resolver: MetadataResolver,
    cache: MetadataCache,
    renderer: DocumentRenderer,
}

impl MetadataEngine {
    /// Build an engine from a validated config. Relative content paths are
    /// resolved against `base_dir`.
    pub fn from_config(config: &SiteConfig, base_dir: &Path) -> Self {
        let content = config.content.resolved(base_dir);
        let resolver = MetadataResolver::new(config);
        let cache = MetadataCache::new(
            ContentPaths::new(content.articles, content.offers),
            content.cache_file,
            resolver.clone(),
        );
        Self {
            resolver,
            cache,
            renderer: DocumentRenderer::new(config),
        }
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    /// Make sure a fresh snapshot is loaded (adopting the artifact if it is
    /// still valid).
    pub fn warm(&self) -> usize {
        self.cache.snapshot().len()
    }

    /// Force a rebuild.
    pub fn rebuild(&self) -> RebuildSummary {
        self.cache.rebuild()
    }

    pub fn resolve_path(&self, raw_path: &str) -> Resolution {
        let route = route::classify(raw_path);
        let (record, source) = match &route {
            RouteMatch::Home => (
                self.resolver.default_record().clone(),
                MetadataSource::Default(DefaultReason::Home),
            ),
            RouteMatch::Unknown => (
                self.resolver.default_record().clone(),
                MetadataSource::Default(DefaultReason::MalformedRoute),
            ),
            RouteMatch::Guide(guide) => {
                (self.resolver.guide_record(guide), MetadataSource::Generated)
            }
            RouteMatch::Article { .. } | RouteMatch::OfferDetail { .. } => {
                let hit = route
                    .canonical_path()
                    .and_then(|key| self.cache.lookup(&key));
                match hit {
                    Some(record) => (record, MetadataSource::Cache),
                    None => (
                        self.resolver.default_record().clone(),
                        MetadataSource::Default(DefaultReason::NotFound),
                    ),
                }
            }
        };
        debug!("Resolved {raw_path:?} as {} from {source}", route.kind());
        Resolution {
            route,
            record,
            source,
        }
    }

    pub fn render_record(&self, record: &MetadataRecord) -> String {
        self.renderer.render(record)
    }

    pub fn render_path(&self, raw_path: &str) -> String {
        self.render_record(&self.resolve_path(raw_path).record)
    }
}
