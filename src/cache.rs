//! Precomputed path → metadata map for content routes.
//!
//! Resolving an article or offer means scanning a data file. This module does
//! that scan once, computes a [`MetadataRecord`] for every article and offer,
//! and keys each by its canonical relative path (`blog/{slug}`,
//! `deal/{id}`). Requests then do a single map lookup.
//!
//! # Design
//!
//! A [`CacheSnapshot`] is immutable once built. [`MetadataCache`] holds the
//! current one behind an `RwLock<Option<Arc<_>>>`; a rebuild computes a
//! complete new snapshot and swaps the `Arc`. Readers never see a partial map.
//! Concurrent rebuilds each produce an equivalent map and the last swap wins.
//!
//! Guide, home, and unknown routes are not cached. They need no content
//! lookup.
//!
//! ## Freshness
//!
//! A snapshot records, per content source, whether the file existed and the
//! modification time and length observed just before it was read. It also
//! records the resolver's settings fingerprint. It is stale when:
//!
//! 1. a source's modification time or length differs from the recorded one,
//! 2. a source appeared or disappeared since the build,
//! 3. the configured source paths changed, or
//! 4. the `[site]` or `[guides]` settings changed.
//!
//! Comparing for equality rather than against the build time means a source
//! stamped in the future (clock skew) is rebuilt once, not on every request.
//! Stamps are taken *before* the sources are read, so an edit racing the
//! rebuild marks the new snapshot stale rather than being lost.
//!
//! ## Storage
//!
//! With `content.cache_file` set, each rebuild is also written as JSON:
//!
//! ```json
//! { "version": 2, "built_at": "2026-...Z", "settings": "9f86d0...",
//!   "sources": [{"path": ".../blog_posts.json", "present": true,
//!                "modified": "2026-...Z", "len": 2048}, ...],
//!   "entries": { "blog/nbn-speed": { "title": ..., ... } } }
//! ```
//!
//! The file goes to a temp file in the same directory first and is renamed
//! over the old one. A fresh artifact is adopted on startup instead of
//! rebuilding. Missing, corrupt, or wrong-version artifacts are ignored.

use crate::content::{ContentPaths, ContentStore};
use crate::metadata::MetadataResolver;
use crate::types::MetadataRecord;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Version of the artifact format. Bump to invalidate existing artifacts.
pub const ARTIFACT_VERSION: u32 = 2;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode cache artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// State of one content source as observed at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStamp {
    pub path: PathBuf,
    pub present: bool,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub len: u64,
}

impl SourceStamp {
    fn capture(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) => Self {
                path: path.to_path_buf(),
                present: true,
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
                len: meta.len(),
            },
            Err(_) => Self {
                path: path.to_path_buf(),
                present: false,
                modified: None,
                len: 0,
            },
        }
    }

    /// Whether the source still looks exactly as it did when stamped. A
    /// present source without a modification time can't be verified.
    fn is_current(&self) -> bool {
        if self.present && self.modified.is_none() {
            return false;
        }
        Self::capture(&self.path) == *self
    }
}

/// One complete, immutable build of the metadata map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub version: u32,
    pub built_at: DateTime<Utc>,
    /// [`MetadataResolver::fingerprint`] of the settings the records were
    /// built with.
    #[serde(default)]
    pub settings: String,
    pub sources: Vec<SourceStamp>,
    pub entries: BTreeMap<String, MetadataRecord>,
}

impl CacheSnapshot {
    /// Compute records for every article and offer in `store`.
    ///
    /// On duplicate keys the first record wins, matching
    /// [`ContentStore::find_offer_by_id`].
    pub fn build(
        store: &ContentStore,
        resolver: &MetadataResolver,
        built_at: DateTime<Utc>,
        sources: Vec<SourceStamp>,
    ) -> Self {
        let mut entries = BTreeMap::new();
        for article in store.articles() {
            entries
                .entry(format!("blog/{}", article.slug))
                .or_insert_with(|| resolver.article_record(article));
        }
        for offer in store.offers() {
            entries
                .entry(format!("deal/{}", offer.id))
                .or_insert_with(|| resolver.offer_record(offer));
        }
        Self {
            version: ARTIFACT_VERSION,
            built_at,
            settings: resolver.fingerprint().to_string(),
            sources,
            entries,
        }
    }

    pub fn get(&self, path: &str) -> Option<&MetadataRecord> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the snapshot still reflects the sources at `paths` and the
    /// settings digested in `settings`.
    pub fn is_fresh(&self, paths: &ContentPaths, settings: &str) -> bool {
        let expected = paths.sources();
        self.settings == settings
            && self.sources.len() == expected.len()
            && self
                .sources
                .iter()
                .zip(expected)
                .all(|(stamp, path)| stamp.path == path && stamp.is_current())
    }

    /// Load an artifact. Returns `None` if the file doesn't exist or can't be
    /// used (corruption, version mismatch).
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let snapshot: Self = match serde_json::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                warn!("Ignoring unreadable cache artifact {}: {e}", path.display());
                return None;
            }
        };
        if snapshot.version != ARTIFACT_VERSION {
            info!(
                "Ignoring cache artifact {} with version {} (current {ARTIFACT_VERSION})",
                path.display(),
                snapshot.version
            );
            return None;
        }
        Some(snapshot)
    }

    /// Write the artifact atomically: temp file in the same directory, then
    /// rename over `path`.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |source| CacheError::Io {
            path: path.to_path_buf(),
            source,
        };
        fs::create_dir_all(dir).map_err(io_err)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.flush().map_err(io_err)?;
        tmp.persist(path).map_err(|source| CacheError::Persist {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

/// Outcome of a rebuild, for logs and the `build-cache` command.
#[derive(Debug, Clone)]
pub struct RebuildSummary {
    pub articles: usize,
    pub offers: usize,
    pub entries: usize,
    pub duplicate_offer_ids: Vec<String>,
    pub problems: Vec<String>,
    pub persisted: Option<PathBuf>,
    pub elapsed: Duration,
}

impl fmt::Display for RebuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entries ({} articles, {} offers) in {}ms",
            self.entries,
            self.articles,
            self.offers,
            self.elapsed.as_millis()
        )?;
        if !self.duplicate_offer_ids.is_empty() {
            write!(f, ", {} duplicate offer ids", self.duplicate_offer_ids.len())?;
        }
        if !self.problems.is_empty() {
            write!(f, ", {} unavailable sources", self.problems.len())?;
        }
        Ok(())
    }
}

/// Process-wide owner of the current snapshot.
#[derive(Debug)]
pub struct MetadataCache {
    paths: ContentPaths,
    artifact: Option<PathBuf>,
    resolver: MetadataResolver,
    current: RwLock<Option<Arc<CacheSnapshot>>>,
}

impl MetadataCache {
    pub fn new(paths: ContentPaths, artifact: Option<PathBuf>, resolver: MetadataResolver) -> Self {
        Self {
            paths,
            artifact,
            resolver,
            current: RwLock::new(None),
        }
    }

    pub fn paths(&self) -> &ContentPaths {
        &self.paths
    }

    pub fn artifact(&self) -> Option<&Path> {
        self.artifact.as_deref()
    }

    /// Whether `snapshot` matches this cache's sources and resolver settings.
    pub fn is_fresh(&self, snapshot: &CacheSnapshot) -> bool {
        snapshot.is_fresh(&self.paths, self.resolver.fingerprint())
    }

    /// The snapshot currently held, without any freshness check.
    pub fn current(&self) -> Option<Arc<CacheSnapshot>> {
        self.read_current().clone()
    }

    /// A fresh snapshot, building one if needed.
    ///
    /// The first call adopts a fresh on-disk artifact if there is one. After
    /// that a stale snapshot triggers a rebuild.
    pub fn snapshot(&self) -> Arc<CacheSnapshot> {
        let held = self.current();
        match held {
            Some(snapshot) if self.is_fresh(&snapshot) => snapshot,
            Some(_) => {
                debug!("Metadata cache stale, rebuilding");
                self.rebuild();
                self.current_or_empty()
            }
            None => {
                if let Some(adopted) = self.adopt_artifact() {
                    return adopted;
                }
                self.rebuild();
                self.current_or_empty()
            }
        }
    }

    /// Look up a canonical relative path in a fresh snapshot.
    pub fn lookup(&self, path: &str) -> Option<MetadataRecord> {
        self.snapshot().get(path).cloned()
    }

    /// Reload content, build a complete snapshot, persist it, and swap it in.
    pub fn rebuild(&self) -> RebuildSummary {
        let started = Instant::now();
        let built_at = Utc::now();
        let sources = self
            .paths
            .sources()
            .iter()
            .map(|path| SourceStamp::capture(path))
            .collect();
        let store = ContentStore::load(&self.paths);
        let snapshot = CacheSnapshot::build(&store, &self.resolver, built_at, sources);

        let duplicate_offer_ids = store.duplicate_offer_ids();
        if !duplicate_offer_ids.is_empty() {
            warn!(
                "Duplicate offer ids (first occurrence wins): {}",
                duplicate_offer_ids.join(", ")
            );
        }

        let persisted = self.artifact.as_ref().and_then(|path| match snapshot.save(path) {
            Ok(()) => Some(path.clone()),
            Err(e) => {
                warn!("Metadata cache kept in memory only: {e}");
                None
            }
        });

        let summary = RebuildSummary {
            articles: store.articles().len(),
            offers: store.offer_count(),
            entries: snapshot.len(),
            duplicate_offer_ids,
            problems: store.problems().to_vec(),
            persisted,
            elapsed: started.elapsed(),
        };
        *self.write_current() = Some(Arc::new(snapshot));
        info!("Rebuilt metadata cache: {summary}");
        summary
    }

    fn adopt_artifact(&self) -> Option<Arc<CacheSnapshot>> {
        let path = self.artifact.as_ref()?;
        let snapshot = CacheSnapshot::load(path)?;
        if !self.is_fresh(&snapshot) {
            debug!("Cache artifact {} is stale", path.display());
            return None;
        }
        info!(
            "Adopted metadata cache from {} ({} entries, built {})",
            path.display(),
            snapshot.len(),
            snapshot.built_at.to_rfc3339()
        );
        let snapshot = Arc::new(snapshot);
        *self.write_current() = Some(Arc::clone(&snapshot));
        Some(snapshot)
    }

    fn current_or_empty(&self) -> Arc<CacheSnapshot> {
        self.current().unwrap_or_else(|| {
            Arc::new(CacheSnapshot::build(
                &ContentStore::default(),
                &self.resolver,
                Utc::now(),
                Vec::new(),
            ))
        })
    }

    fn read_current(&self) -> RwLockReadGuard<'_, Option<Arc<CacheSnapshot>>> {
        self.current.read().unwrap_or_else(|poisoned| {
            error!("Metadata cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_current(&self) -> RwLockWriteGuard<'_, Option<Arc<CacheSnapshot>>> {
        self.current.write().unwrap_or_else(|poisoned| {
            error!("Metadata cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
