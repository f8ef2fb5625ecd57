//! # SaveNest Meta
//!
//! Serves the HTML shell of the SaveNest single-page app with per-route
//! social and SEO metadata already in the markup. Crawlers and link-preview
//! bots never run the client-side app, so `og:title`, `og:image` and friends
//! have to be correct in the document the server sends.
//!
//! # Request Flow
//!
//! ```text
//! path ─► route::classify ─► RouteMatch
//!                               │
//!          ┌────────────────────┼───────────────────────┐
//!          ▼                    ▼                       ▼
//!     Home / Unknown      Article / Offer             Guide
//!     default record      MetadataCache lookup        generated from
//!                         (rebuilt from Content-      path parameters
//!                          Store when stale)
//!          └────────────────────┼───────────────────────┘
//!                               ▼
//!                 render::DocumentRenderer ─► HTML
//! ```
//!
//! No failure along this path is fatal. Missing or corrupt data files, unknown
//! keys, and unmatched paths all end in the site default record, so a page is
//! always delivered.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`route`] | Ordered route grammars → [`route::RouteMatch`] |
//! | [`image_url`] | Raw image references → absolute URLs (idempotent) |
//! | [`content`] | Loads articles and offers from the JSON data files |
//! | [`metadata`] | Route + content → [`types::MetadataRecord`] |
//! | [`cache`] | Precomputed path → record map, persisted and swapped atomically |
//! | [`render`] | The document shell, with every substituted field escaped |
//! | [`engine`] | Ties the above together per request |
//! | [`server`] | actix-web app: documents, health, upload relay |
//! | [`upload`] | Multipart upload relay to the third-party file API |
//! | [`config`] | `savenest.toml` loading, merging, and validation |
//! | [`types`] | Shared content and metadata types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Cache Snapshots Instead of Shared Mutation
//!
//! The cache is never edited in place. A rebuild computes a whole new
//! [`cache::CacheSnapshot`] and swaps an `Arc`. Readers holding the old one
//! finish with it undisturbed; concurrent rebuilds produce equivalent maps, so
//! whichever lands last is fine.
//!
//! ## A Cache Miss Is Not Found
//!
//! Content routes are answered only from the snapshot. A key missing from a
//! fresh snapshot is missing from the content, so there is no live lookup
//! fallback.
//!
//! ## Maud With Explicit Escaping
//!
//! The shell is a [Maud](https://maud.lambda.xyz/) template. Maud's escaping
//! skips `'`, and titles routinely contain apostrophes inside attribute
//! values, so metadata fields are escaped with [`render::escape_html`] and
//! spliced pre-escaped.

pub mod cache;
pub mod config;
pub mod content;
pub mod engine;
pub mod image_url;
pub mod metadata;
pub mod output;
pub mod render;
pub mod route;
pub mod server;
pub mod types;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_helpers;
