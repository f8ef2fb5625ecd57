//! Metadata resolution: route + content → [`MetadataRecord`].
//!
//! Every route resolves to a complete record. Content routes look their
//! record up in the [`ContentStore`]; guide routes are generated from their
//! path parameters; home and unknown routes get the site default.
//!
//! ## Templates
//!
//! | Route                 | Title                                               | Type      |
//! |-----------------------|-----------------------------------------------------|-----------|
//! | `blog/{slug}`         | `{title} \| {brand} Blog`                           | `article` |
//! | `deal/{id}`           | `{provider} - {plan} \| {brand}`                    | `product` |
//! | `guides/{s}/{u}`      | `{Utility} Plans in {STATE}: Compare Providers \| {brand}` | `article` |
//! | home, unknown         | `site.default_title`                                | `website` |
//!
//! Descriptions come from the article summary or offer description. When
//! those are blank the site default description is used instead, so no
//! document ever ships an empty `og:description`.
//!
//! Image references go through the [`ImageUrlNormalizer`]; guide images are
//! looked up in `[guides.images]` by lowercased utility and fall back to the
//! default image.
//!
//! Records depend on `[site]` and `[guides]` as much as on content. The
//! resolver's [`fingerprint`](MetadataResolver::fingerprint) digests those
//! settings so a cached record built under other settings can be told apart.

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::image_url::ImageUrlNormalizer;
use crate::route::{GuideRoute, RouteMatch};
use crate::types::{Article, ContentType, MetadataRecord, Offer};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Resolve a metadata field from multiple sources.
///
/// Takes candidate values in priority order and returns the first one that
/// is non-empty after trimming.
///
/// ```text
/// description: first_non_empty(&[article.summary, site.default_description])
/// ```
pub fn first_non_empty(sources: &[&str]) -> Option<String> {
    sources
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// Produces metadata records for routes.
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    brand: String,
    base_url: String,
    default_description: String,
    default_record: MetadataRecord,
    normalizer: ImageUrlNormalizer,
    guide_images: BTreeMap<String, String>,
    fingerprint: String,
}

impl MetadataResolver {
    pub fn new(config: &SiteConfig) -> Self {
        let site = &config.site;
        let base_url = site.base_url.trim_end_matches('/').to_string();
        let normalizer = ImageUrlNormalizer::new(&site.asset_base_url, &site.default_image);
        let default_record = MetadataRecord {
            title: site.default_title.clone(),
            description: site.default_description.clone(),
            image_url: normalizer.default_image().to_string(),
            content_type: ContentType::Website,
            canonical_url: format!("{base_url}/"),
        };
        let guide_images = config
            .guides
            .images
            .iter()
            .map(|(utility, image)| (utility.to_lowercase(), image.clone()))
            .collect();
        let fingerprint = settings_fingerprint(config);
        Self {
            brand: site.brand.clone(),
            base_url,
            default_description: site.default_description.clone(),
            default_record,
            normalizer,
            guide_images,
            fingerprint,
        }
    }

    /// SHA-256 of every setting that feeds a record.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The site-wide record used for home and for anything unresolved.
    pub fn default_record(&self) -> &MetadataRecord {
        &self.default_record
    }

    pub fn normalizer(&self) -> &ImageUrlNormalizer {
        &self.normalizer
    }

    /// Absolute canonical URL for a relative canonical path. The empty path
    /// is the site root (`{base}/`).
    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Resolve a route, falling back to the default record.
    pub fn resolve(&self, route: &RouteMatch, store: &ContentStore) -> MetadataRecord {
        self.lookup(route, store)
            .unwrap_or_else(|| self.default_record.clone())
    }

    /// Resolve a route without the default fallback. `None` for home,
    /// unknown routes, and content keys that aren't in the store.
    pub fn lookup(&self, route: &RouteMatch, store: &ContentStore) -> Option<MetadataRecord> {
        match route {
            RouteMatch::Home | RouteMatch::Unknown => None,
            RouteMatch::Article { slug } => store
                .find_article_by_slug(slug)
                .map(|article| self.article_record(article)),
            RouteMatch::OfferDetail { id } => {
                store.find_offer_by_id(id).map(|offer| self.offer_record(offer))
            }
            RouteMatch::Guide(guide) => Some(self.guide_record(guide)),
        }
    }

    pub fn article_record(&self, article: &Article) -> MetadataRecord {
        MetadataRecord {
            title: format!("{} | {} Blog", article.title, self.brand),
            description: self.description_or_default(&article.summary),
            image_url: self.normalizer.normalize(&article.image_url),
            content_type: ContentType::Article,
            canonical_url: self.canonical_url(&format!("blog/{}", article.slug)),
        }
    }

    pub fn offer_record(&self, offer: &Offer) -> MetadataRecord {
        MetadataRecord {
            title: format!(
                "{} - {} | {}",
                offer.provider_name, offer.plan_name, self.brand
            ),
            description: self.description_or_default(&offer.description),
            image_url: self.normalizer.normalize(&offer.logo_url),
            content_type: ContentType::Product,
            canonical_url: self.canonical_url(&format!("deal/{}", offer.id)),
        }
    }

    pub fn guide_record(&self, guide: &GuideRoute) -> MetadataRecord {
        let image_url = self
            .guide_images
            .get(&guide.utility_segment.to_lowercase())
            .map(|image| self.normalizer.normalize(image))
            .unwrap_or_else(|| self.normalizer.default_image().to_string());
        MetadataRecord {
            title: format!(
                "{} Plans in {}: Compare Providers | {}",
                guide.utility, guide.state, self.brand
            ),
            description: format!(
                "Compare {} plans from leading providers in {}. See current rates, \
                 switch in minutes, and stop paying the loyalty tax with {}.",
                guide.utility.to_lowercase(),
                guide.state,
                self.brand
            ),
            image_url,
            content_type: ContentType::Article,
            canonical_url: self.canonical_url(&format!(
                "guides/{}/{}",
                guide.state_segment, guide.utility_segment
            )),
        }
    }

    fn description_or_default(&self, description: &str) -> String {
        first_non_empty(&[description, self.default_description.as_str()]).unwrap_or_default()
    }
}

/// Inputs: the `[site]` fields and the `[guides]` image table. If any of
/// these change, every precomputed record is invalid.
fn settings_fingerprint(config: &SiteConfig) -> String {
    let site = &config.site;
    let mut hasher = Sha256::new();
    hasher.update(b"metadata\0");
    for value in [
        &site.brand,
        &site.base_url,
        &site.asset_base_url,
        &site.default_title,
        &site.default_description,
        &site.default_image,
    ] {
        hasher.update(value.as_bytes());
        hasher.update(b"\0");
    }
    for (utility, image) in &config.guides.images {
        hasher.update(utility.as_bytes());
        hasher.update(b"=");
        hasher.update(image.as_bytes());
        hasher.update(b"\0");
    }
    format!("{:x}", hasher.finalize())
}
