//! `[sitemap]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sitemap]
//! path = "/sitemap.xml"
//! static_urls = ["/software/", "/dailynotes"]
//! ```

use serde::{Deserialize, Serialize};

/// Important static pages listed after the articles.
///
/// There are more static pages, but these are the ones worth crawling.
const DEFAULT_STATIC_URLS: &[&str] = &[
    "/book/go-cookbook.html",
    "/articles/cbz-cbr-comic-book-reader-viewer-for-windows.html",
    "/articles/chm-reader-viewer-for-windows.html",
    "/articles/mobi-ebook-reader-viewer-for-windows.html",
    "/articles/epub-ebook-reader-viewer-for-windows.html",
    "/articles/where-to-get-free-ebooks-epub-mobi.html",
    "/software/",
    "static/documents.html",
    "/dailynotes",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// URL path the sitemap is served at.
    pub path: String,
    /// Static page paths (relative to the request host).
    pub static_urls: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            path: "/sitemap.xml".into(),
            static_urls: DEFAULT_STATIC_URLS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl SitemapConfig {
    pub fn validate(&self, problems: &mut Vec<String>) {
        if !self.path.starts_with('/') {
            problems.push("sitemap.path must start with `/`".into());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.sitemap.path, "/sitemap.xml");
        assert_eq!(config.sitemap.static_urls.len(), 9);
        assert_eq!(config.sitemap.static_urls[6], "/software/");
    }

    #[test]
    fn test_custom_static_urls() {
        let config = test_parse_config("[sitemap]\nstatic_urls = [\"/about\"]");
        assert_eq!(config.sitemap.static_urls, vec!["/about"]);
    }

    #[test]
    fn test_empty_static_urls() {
        let config = test_parse_config("[sitemap]\nstatic_urls = []");
        assert!(config.sitemap.static_urls.is_empty());
    }
}
