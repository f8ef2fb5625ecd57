//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>` or a JSON
//! value) for testability and a `print_*` wrapper that writes to stdout.
//! Format functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## check
//!
//! ```text
//! Content
//!     Articles: 3
//!         Source: assets/data/blog_posts.json
//!     Offers: 5 in 3 categories
//!         Source: assets/data/products.json
//!         electricity: 2
//!         internet: 2
//!         gas: 1
//! Duplicate offer ids
//!     agl-value-saver
//! ```
//!
//! ## build-cache
//!
//! ```text
//! Rebuilt 8 entries (3 articles, 5 offers) in 2ms
//!     Artifact: .savenest-cache/metadata.json
//! ```
//!
//! ## resolve
//!
//! ```json
//! { "path": "/blog/nbn-speed", "route": "article", "source": {"kind": "cache"},
//!   "record": { "title": ..., ... } }
//! ```

use crate::cache::RebuildSummary;
use crate::content::{ContentPaths, ContentStore};
use crate::engine::Resolution;
use serde_json::{Value, json};

const INDENT: &str = "    ";

fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

// ============================================================================
// check
// ============================================================================

/// Content inventory and integrity problems.
pub fn format_check_output(store: &ContentStore, paths: &ContentPaths) -> Vec<String> {
    let mut lines = vec!["Content".to_string()];

    lines.push(format!("{}Articles: {}", indent(1), store.articles().len()));
    lines.push(format!("{}Source: {}", indent(2), paths.articles.display()));

    lines.push(format!(
        "{}Offers: {} in {} categories",
        indent(1),
        store.offer_count(),
        store.categories().len()
    ));
    lines.push(format!("{}Source: {}", indent(2), paths.offers.display()));
    for category in store.categories() {
        lines.push(format!(
            "{}{}: {}",
            indent(2),
            category.name,
            category.offers.len()
        ));
    }

    push_section(&mut lines, "Unavailable sources", store.problems());
    push_section(&mut lines, "Duplicate offer ids", &store.duplicate_offer_ids());
    push_section(
        &mut lines,
        "Duplicate article slugs",
        &store.duplicate_article_slugs(),
    );
    lines
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(title.to_string());
    lines.extend(items.iter().map(|item| format!("{}{item}", indent(1))));
}

/// Whether `check` should report failure.
pub fn check_has_problems(store: &ContentStore) -> bool {
    !store.problems().is_empty()
        || !store.duplicate_offer_ids().is_empty()
        || !store.duplicate_article_slugs().is_empty()
}

pub fn print_check_output(store: &ContentStore, paths: &ContentPaths) {
    for line in format_check_output(store, paths) {
        println!("{line}");
    }
}

// ============================================================================
// build-cache
// ============================================================================

pub fn format_rebuild_summary(summary: &RebuildSummary) -> Vec<String> {
    let mut lines = vec![format!("Rebuilt {summary}")];
    match &summary.persisted {
        Some(path) => lines.push(format!("{}Artifact: {}", indent(1), path.display())),
        None => lines.push(format!("{}Artifact: none (in memory only)", indent(1))),
    }
    for id in &summary.duplicate_offer_ids {
        lines.push(format!("{}Duplicate offer id: {id}", indent(1)));
    }
    for problem in &summary.problems {
        lines.push(format!("{}Unavailable: {problem}", indent(1)));
    }
    lines
}

pub fn print_rebuild_summary(summary: &RebuildSummary) {
    for line in format_rebuild_summary(summary) {
        println!("{line}");
    }
}

// ============================================================================
// resolve
// ============================================================================

pub fn format_resolution(raw_path: &str, resolution: &Resolution) -> Value {
    json!({
        "path": raw_path,
        "route": resolution.route.kind(),
        "canonicalPath": resolution.route.canonical_path(),
        "source": resolution.source,
        "record": resolution.record,
    })
}

pub fn print_resolution(raw_path: &str, resolution: &Resolution) -> serde_json::Result<()> {
    let value = format_resolution(raw_path, resolution);
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::OfferCategory;
    use crate::engine::{DefaultReason, MetadataSource};
    use crate::route::RouteMatch;
    use crate::test_helpers::*;
    use crate::types::{ContentType, MetadataRecord};
    use std::path::PathBuf;
    use std::time::Duration;

    fn paths() -> ContentPaths {
        ContentPaths::new("data/blog_posts.json", "data/products.json")
    }

    // =========================================================================
    // check
    // =========================================================================

    #[test]
    fn check_output_lists_counts() {
        let tmp = setup_fixtures();
        let store = ContentStore::load(&fixture_paths(&tmp));
        let lines = format_check_output(&store, &paths());
        assert_eq!(
            lines,
            [
                "Content",
                "    Articles: 3",
                "        Source: data/blog_posts.json",
                "    Offers: 5 in 3 categories",
                "        Source: data/products.json",
                "        electricity: 2",
                "        internet: 2",
                "        gas: 1",
            ]
        );
        assert!(!check_has_problems(&store));
    }

    #[test]
    fn check_output_reports_duplicates() {
        let store = ContentStore::new(
            vec![],
            vec![OfferCategory {
                name: "gas".into(),
                offers: vec![offer("x", "gas", "A"), offer("x", "gas", "B")],
            }],
        );
        let lines = format_check_output(&store, &paths());
        assert_eq!(&lines[lines.len() - 2..], ["Duplicate offer ids", "    x"]);
        assert!(check_has_problems(&store));
    }

    // =========================================================================
    // build-cache
    // =========================================================================

    #[test]
    fn rebuild_summary_lines() {
        let summary = RebuildSummary {
            articles: 1,
            offers: 2,
            entries: 3,
            duplicate_offer_ids: vec![],
            problems: vec![],
            persisted: Some(PathBuf::from(".savenest-cache/metadata.json")),
            elapsed: Duration::from_millis(4),
        };
        assert_eq!(
            format_rebuild_summary(&summary),
            [
                "Rebuilt 3 entries (1 articles, 2 offers) in 4ms",
                "    Artifact: .savenest-cache/metadata.json",
            ]
        );
    }

    // =========================================================================
    // resolve
    // =========================================================================

    #[test]
    fn resolution_json_shape() {
        let resolution = Resolution {
            route: RouteMatch::OfferDetail { id: "nope".into() },
            record: MetadataRecord {
                title: "t".into(),
                description: "d".into(),
                image_url: "https://x/i.jpg".into(),
                content_type: ContentType::Website,
                canonical_url: "https://x/".into(),
            },
            source: MetadataSource::Default(DefaultReason::NotFound),
        };
        let value = format_resolution("/deal/nope", &resolution);
        assert_eq!(value["route"], "offer");
        assert_eq!(value["canonicalPath"], "deal/nope");
        assert_eq!(value["source"]["reason"], "not_found");
        assert_eq!(value["record"]["type"], "website");
    }
}
