//! Image reference normalization.
//!
//! Content files reference images in whatever form the author typed:
//! absolute URLs, `images/x.jpg`, `/images/x.jpg`, or `assets/images/x.jpg`.
//! The Flutter web build serves bundled assets from `/assets/assets/`, so the
//! site asset base already carries one `assets/` segment twice over. A
//! leading `assets/` in the reference is therefore stripped once before the
//! base is prepended:
//!
//! ```text
//! images/nbn.jpg          → {asset_base}images/nbn.jpg
//! /images/nbn.jpg         → {asset_base}images/nbn.jpg
//! assets/images/nbn.jpg   → {asset_base}images/nbn.jpg
//! https://cdn.example/x   → https://cdn.example/x
//! ""                      → {default_image}
//! ```
//!
//! Every output starts with `http`, and inputs starting with `http` pass
//! through untouched, so normalizing twice is the same as normalizing once.

/// Turns raw image references into absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlNormalizer {
    asset_base: String,
    default_image: String,
}

impl ImageUrlNormalizer {
    /// `asset_base` gains a trailing `/` if it lacks one. Both values must be
    /// absolute URLs (config validation enforces this).
    pub fn new(asset_base: &str, default_image: &str) -> Self {
        let mut asset_base = asset_base.trim().to_string();
        if !asset_base.ends_with('/') {
            asset_base.push('/');
        }
        Self {
            asset_base,
            default_image: default_image.trim().to_string(),
        }
    }

    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    /// Normalize one raw reference into an absolute URL.
    pub fn normalize(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return self.default_image.clone();
        }
        if raw.starts_with("http") {
            return raw.to_string();
        }

        let relative = raw.trim_start_matches('/');
        let relative = relative.strip_prefix("assets/").unwrap_or(relative);
        if relative.is_empty() {
            return self.default_image.clone();
        }
        format!("{}{}", self.asset_base, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://savenest.au/assets/assets/";
    const HERO: &str = "https://savenest.au/assets/assets/images/hero_energy.jpg";

    fn normalizer() -> ImageUrlNormalizer {
        ImageUrlNormalizer::new(BASE, HERO)
    }

    // =========================================================================
    // Fallbacks and pass-through
    // =========================================================================

    #[test]
    fn empty_reference_uses_default_image() {
        assert_eq!(normalizer().normalize(""), HERO);
        assert_eq!(normalizer().normalize("   "), HERO);
    }

    #[test]
    fn absolute_urls_pass_through() {
        let n = normalizer();
        assert_eq!(
            n.normalize("https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(
            n.normalize("http://legacy.example.com/b.png"),
            "http://legacy.example.com/b.png"
        );
    }

    #[test]
    fn bare_assets_segment_uses_default_image() {
        assert_eq!(normalizer().normalize("assets/"), HERO);
        assert_eq!(normalizer().normalize("/"), HERO);
    }

    // =========================================================================
    // Relative references
    // =========================================================================

    #[test]
    fn relative_path_gets_asset_base() {
        assert_eq!(
            normalizer().normalize("images/nbn.jpg"),
            "https://savenest.au/assets/assets/images/nbn.jpg"
        );
    }

    #[test]
    fn leading_slashes_are_stripped() {
        assert_eq!(
            normalizer().normalize("//images/nbn.jpg"),
            "https://savenest.au/assets/assets/images/nbn.jpg"
        );
    }

    #[test]
    fn one_assets_segment_is_stripped() {
        let n = normalizer();
        assert_eq!(
            n.normalize("assets/images/nbn.jpg"),
            n.normalize("images/nbn.jpg")
        );
        assert_eq!(
            n.normalize("/assets/images/nbn.jpg"),
            n.normalize("images/nbn.jpg")
        );
    }

    #[test]
    fn only_one_assets_segment_is_stripped() {
        assert_eq!(
            normalizer().normalize("assets/assets/images/x.jpg"),
            "https://savenest.au/assets/assets/assets/images/x.jpg"
        );
    }

    #[test]
    fn assets_must_be_a_whole_segment() {
        assert_eq!(
            normalizer().normalize("assetsy/x.jpg"),
            "https://savenest.au/assets/assets/assetsy/x.jpg"
        );
    }

    #[test]
    fn base_without_trailing_slash_is_fixed() {
        let n = ImageUrlNormalizer::new("https://savenest.au/assets/assets", HERO);
        assert_eq!(
            n.normalize("images/a.jpg"),
            "https://savenest.au/assets/assets/images/a.jpg"
        );
    }

    // =========================================================================
    // Idempotence
    // =========================================================================

    #[test]
    fn normalizing_twice_changes_nothing() {
        let n = normalizer();
        let inputs = [
            "",
            "  ",
            "/",
            "assets/",
            "images/nbn.jpg",
            "/images/nbn.jpg",
            "assets/images/nbn.jpg",
            "/assets/images/nbn.jpg",
            "assets/assets/images/nbn.jpg",
            "https://savenest.au/assets/assets/images/nbn.jpg",
            "http://example.com/x.png",
            "logos/agl energy.png",
            "  images/padded.jpg  ",
        ];
        for input in inputs {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "not idempotent for {input:?}");
            assert!(once.starts_with("http"), "not absolute for {input:?}");
        }
    }
}
