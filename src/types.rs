//! Shared types passed between the content store, the resolver, the cache and
//! the renderer.
//!
//! Content records ([`Article`], [`Offer`]) are deserialized straight from the
//! flat data files using the field names the front-end already writes
//! (`imageUrl`, `providerName`, ...). [`MetadataRecord`] is the unit the cache
//! persists and the renderer consumes, so it is serialized too.
//!
//! The data files are hand-maintained and use `null` as freely as an absent
//! key. Both read as an empty string.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A blog article from `blog_posts.json`.
///
/// Only the fields the metadata engine needs are kept; everything else in the
/// data file (body, author, tags, ...) is ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    /// Unique key, the `{slug}` in `/blog/{slug}`.
    #[serde(deserialize_with = "null_as_empty")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub summary: String,
    /// Raw image reference: absolute URL, site-relative path, or empty.
    #[serde(deserialize_with = "null_as_empty")]
    pub image_url: String,
}

/// A plan/deal from `products.json`.
///
/// Offers are grouped by category in the data file but addressed only by
/// `id` on `/deal/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Offer {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    /// Grouping key, filled in from the enclosing object key on load.
    #[serde(skip)]
    pub category: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub provider_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub plan_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    /// Raw logo reference, normalized like any other image.
    #[serde(deserialize_with = "null_as_empty")]
    pub logo_url: String,
}

/// `null` and absent both mean "no value".
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Open Graph content type of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Website,
    Article,
    Product,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Website => "website",
            ContentType::Article => "article",
            ContentType::Product => "product",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything substituted into the document shell for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub title: String,
    pub description: String,
    /// Always absolute.
    pub image_url: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub canonical_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_reads_camel_case_fields() {
        let json = r#"{
            "slug": "nbn-speed",
            "title": "Is Your NBN Plan Too Fast?",
            "summary": "Most households pay for speed they never use.",
            "imageUrl": "images/nbn.jpg",
            "content": "ignored body"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.slug, "nbn-speed");
        assert_eq!(article.image_url, "images/nbn.jpg");
    }

    #[test]
    fn article_missing_fields_default_to_empty() {
        let article: Article = serde_json::from_str(r#"{"slug": "bare"}"#).unwrap();
        assert_eq!(article.title, "");
        assert_eq!(article.summary, "");
        assert_eq!(article.image_url, "");
    }

    #[test]
    fn article_null_fields_read_as_empty() {
        let json = r#"{"slug": "nbn-speed", "title": "T", "summary": null, "imageUrl": null}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.slug, "nbn-speed");
        assert_eq!(article.summary, "");
        assert_eq!(article.image_url, "");
    }

    #[test]
    fn offer_null_fields_read_as_empty() {
        let json = r#"{"id": "x", "providerName": "AGL", "planName": null,
                       "description": null, "logoUrl": null}"#;
        let offer: Offer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.id, "x");
        assert_eq!(offer.plan_name, "");
        assert_eq!(offer.logo_url, "");
    }

    #[test]
    fn offer_ignores_pricing_fields() {
        let json = r#"{
            "id": "agl-value-saver",
            "providerName": "AGL",
            "planName": "Value Saver",
            "description": "No lock-in contract.",
            "logoUrl": "assets/images/logos/agl.png",
            "price": 1.25,
            "isGreen": true
        }"#;
        let offer: Offer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.provider_name, "AGL");
        assert_eq!(offer.logo_url, "assets/images/logos/agl.png");
        assert_eq!(offer.category, "");
    }

    #[test]
    fn metadata_record_serializes_type_field() {
        let record = MetadataRecord {
            title: "t".into(),
            description: "d".into(),
            image_url: "https://example.com/i.jpg".into(),
            content_type: ContentType::Product,
            canonical_url: "https://example.com/deal/x".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "product");
        assert_eq!(json["canonicalUrl"], "https://example.com/deal/x");
    }

    #[test]
    fn content_type_display_matches_og_values() {
        assert_eq!(ContentType::Website.to_string(), "website");
        assert_eq!(ContentType::Article.to_string(), "article");
        assert_eq!(ContentType::Product.to_string(), "product");
    }
}
