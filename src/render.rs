//! Document rendering.
//!
//! Produces the single HTML shell the client-side app boots from, with the
//! resolved [`MetadataRecord`] substituted into the primary, Open Graph, and
//! Twitter meta tags. Everything else in the shell (icons, manifest,
//! structured data, analytics, bootstrap script) is fixed per configuration.
//!
//! Uses [maud](https://maud.lambda.xyz/) for the markup. Maud escapes `&`,
//! `<`, `>` and `"` but leaves `'` alone, so substituted values go through
//! [`escape_html`] and are spliced as pre-escaped text.

use crate::config::SiteConfig;
use crate::types::MetadataRecord;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::json;

/// Escape text for HTML text and attribute contexts.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn text(value: &str) -> PreEscaped<String> {
    PreEscaped(escape_html(value))
}

/// Renders the document shell for a metadata record.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    keywords: String,
    author: String,
    app_title: String,
    bootstrap_script: String,
    structured_data: String,
    analytics: Option<String>,
}

impl DocumentRenderer {
    pub fn new(config: &SiteConfig) -> Self {
        let document = &config.document;
        let analytics = document
            .analytics_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(analytics_snippet);
        Self {
            keywords: document.keywords.clone(),
            author: document.author.clone(),
            app_title: document.app_title.clone(),
            bootstrap_script: document.bootstrap_script.clone(),
            structured_data: structured_data(config),
            analytics,
        }
    }

    pub fn render(&self, record: &MetadataRecord) -> String {
        self.document(record).into_string()
    }

    fn document(&self, record: &MetadataRecord) -> Markup {
        let title = text(&record.title);
        let description = text(&record.description);
        let image = text(&record.image_url);
        let url = text(&record.canonical_url);
        let content_type = text(record.content_type.as_str());

        html! {
            (DOCTYPE)
            html {
                head {
                    base href="/";
                    meta charset="UTF-8";
                    meta content="IE=Edge" http-equiv="X-UA-Compatible";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";

                    title { (title) }
                    meta name="description" content=(description);
                    meta name="keywords" content=(text(&self.keywords));
                    meta name="author" content=(text(&self.author));
                    link rel="canonical" href=(url);

                    meta property="og:type" content=(content_type);
                    meta property="og:url" content=(url);
                    meta property="og:title" content=(title);
                    meta property="og:description" content=(description);
                    meta property="og:image" content=(image);
                    meta property="og:image:secure_url" content=(image);

                    meta property="twitter:card" content="summary_large_image";
                    meta property="twitter:url" content=(url);
                    meta property="twitter:title" content=(title);
                    meta property="twitter:description" content=(description);
                    meta property="twitter:image" content=(image);

                    meta name="apple-mobile-web-app-capable" content="yes";
                    meta name="apple-mobile-web-app-status-bar-style" content="black";
                    meta name="apple-mobile-web-app-title" content=(text(&self.app_title));
                    link rel="apple-touch-icon" href="icons/Icon-192.png";
                    link rel="icon" type="image/png" href="favicon.png";
                    link rel="manifest" href="manifest.json";

                    script type="application/ld+json" { (PreEscaped(&self.structured_data)) }
                    @if let Some(analytics) = &self.analytics {
                        (PreEscaped(analytics))
                    }
                }
                body {
                    script src=(text(&self.bootstrap_script)) async {}
                }
            }
        }
    }
}

/// Organization JSON-LD. `</` is escaped so the payload can't close the
/// surrounding script element.
fn structured_data(config: &SiteConfig) -> String {
    let document = &config.document;
    let data = json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": document.author,
        "url": config.site.base_url.trim_end_matches('/'),
        "logo": document.organization_logo,
        "description": document.organization_description,
        "address": {
            "@type": "PostalAddress",
            "addressLocality": "Sydney",
            "addressRegion": "NSW",
            "addressCountry": "AU"
        },
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "customer service",
            "areaServed": "AU",
            "availableLanguage": "English"
        }
    });
    data.to_string().replace("</", "<\\/")
}

/// gtag loader. `id` is restricted to `[A-Za-z0-9-]` by config validation.
fn analytics_snippet(id: &str) -> String {
    format!(
        "<script async src=\"https://www.googletagmanager.com/gtag/js?id={id}\"></script>\
         <script>window.dataLayer = window.dataLayer || [];\
         function gtag(){{dataLayer.push(arguments);}}\
         gtag('js', new Date());\
         gtag('config', '{id}');</script>"
    )
}
