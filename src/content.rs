//! Content store: articles and offers loaded from flat JSON data files.
//!
//! ## Data files
//!
//! ```text
//! blog_posts.json   [ {"slug": ..., "title": ..., "summary": ..., "imageUrl": ...}, ... ]
//! products.json     { "metadata": {...},
//!                     "electricity": [ {"id": ..., "providerName": ..., ...}, ... ],
//!                     "internet":    [ ... ] }
//! ```
//!
//! The offers document carries a non-array `metadata` entry next to the
//! categories; any top-level value that isn't an array is skipped. Individual
//! records that fail to decode, or that lack their key (`slug` / `id`), are
//! skipped as well so one bad row doesn't hide the rest of the file.
//!
//! ## Failure policy
//!
//! [`load_articles`] and [`load_offers`] report a [`ContentError`] when a
//! whole file is missing or unreadable. [`ContentStore::load`] absorbs those:
//! it logs a warning and carries on with no content from that file, which
//! makes every affected route resolve to default metadata.

use crate::types::{Article, Offer};
use log::{debug, warn};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A content data file could not be used.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content file not found: {0}")]
    Missing(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected structure in {path}: expected {expected}")]
    Shape {
        path: PathBuf,
        expected: &'static str,
    },
}

/// Locations of the two content sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPaths {
    pub articles: PathBuf,
    pub offers: PathBuf,
}

impl ContentPaths {
    pub fn new(articles: impl Into<PathBuf>, offers: impl Into<PathBuf>) -> Self {
        Self {
            articles: articles.into(),
            offers: offers.into(),
        }
    }

    /// Both sources, articles first.
    pub fn sources(&self) -> [&Path; 2] {
        [&self.articles, &self.offers]
    }
}

/// Offers sharing one category key, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCategory {
    pub name: String,
    pub offers: Vec<Offer>,
}

/// Read-only view over the loaded content.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    articles: Vec<Article>,
    categories: Vec<OfferCategory>,
    problems: Vec<String>,
}

impl ContentStore {
    pub fn new(articles: Vec<Article>, categories: Vec<OfferCategory>) -> Self {
        Self {
            articles,
            categories,
            problems: Vec::new(),
        }
    }

    /// Load both sources, degrading a failed source to "no content".
    pub fn load(paths: &ContentPaths) -> Self {
        let mut problems = Vec::new();
        let articles = load_articles(&paths.articles).unwrap_or_else(|e| {
            warn!("Articles unavailable, serving defaults for blog routes: {e}");
            problems.push(e.to_string());
            Vec::new()
        });
        let categories = load_offers(&paths.offers).unwrap_or_else(|e| {
            warn!("Offers unavailable, serving defaults for deal routes: {e}");
            problems.push(e.to_string());
            Vec::new()
        });
        Self {
            articles,
            categories,
            problems,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn categories(&self) -> &[OfferCategory] {
        &self.categories
    }

    /// All offers across categories, in document order.
    pub fn offers(&self) -> impl Iterator<Item = &Offer> {
        self.categories.iter().flat_map(|c| c.offers.iter())
    }

    pub fn offer_count(&self) -> usize {
        self.categories.iter().map(|c| c.offers.len()).sum()
    }

    /// Source-level load failures absorbed by [`ContentStore::load`].
    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty() && self.offer_count() == 0
    }

    pub fn find_article_by_slug(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    /// First offer with this id in any category.
    pub fn find_offer_by_id(&self, id: &str) -> Option<&Offer> {
        self.offers().find(|o| o.id == id)
    }

    /// Offer ids used by more than one offer, in first-seen order.
    ///
    /// Ids must be unique across categories; anything returned here is a
    /// defect in the data file.
    pub fn duplicate_offer_ids(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for offer in self.offers() {
            let count = counts.entry(offer.id.as_str()).or_insert(0);
            if *count == 0 {
                order.push(offer.id.as_str());
            }
            *count += 1;
        }
        order
            .into_iter()
            .filter(|id| counts[id] > 1)
            .map(String::from)
            .collect()
    }

    /// Article slugs used by more than one article.
    pub fn duplicate_article_slugs(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dupes = Vec::new();
        for article in &self.articles {
            if !seen.insert(article.slug.as_str()) && !dupes.contains(&article.slug) {
                dupes.push(article.slug.clone());
            }
        }
        dupes
    }
}

/// Load the article list.
pub fn load_articles(path: &Path) -> Result<Vec<Article>, ContentError> {
    let Value::Array(items) = read_json(path)? else {
        return Err(ContentError::Shape {
            path: path.to_path_buf(),
            expected: "an array of articles",
        });
    };

    let articles = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Article>(item) {
            Ok(article) if !article.slug.is_empty() => Some(article),
            Ok(_) => {
                debug!("Skipping article #{index} in {}: no slug", path.display());
                None
            }
            Err(e) => {
                debug!("Skipping article #{index} in {}: {e}", path.display());
                None
            }
        })
        .collect();
    Ok(articles)
}

/// Load offers grouped by category, in document order.
pub fn load_offers(path: &Path) -> Result<Vec<OfferCategory>, ContentError> {
    let Value::Object(groups) = read_json(path)? else {
        return Err(ContentError::Shape {
            path: path.to_path_buf(),
            expected: "an object of category arrays",
        });
    };

    let mut categories = Vec::new();
    for (name, group) in groups {
        let Value::Array(items) = group else {
            debug!("Skipping non-category key {name:?} in {}", path.display());
            continue;
        };
        let offers = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<Offer>(item) {
                Ok(offer) if !offer.id.is_empty() => Some(Offer {
                    category: name.clone(),
                    ..offer
                }),
                Ok(_) => {
                    debug!("Skipping offer {name}#{index} in {}: no id", path.display());
                    None
                }
                Err(e) => {
                    debug!("Skipping offer {name}#{index} in {}: {e}", path.display());
                    None
                }
            })
            .collect();
        categories.push(OfferCategory { name, offers });
    }
    Ok(categories)
}

fn read_json(path: &Path) -> Result<Value, ContentError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ContentError::Missing(path.to_path_buf())
        } else {
            ContentError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&content).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}
