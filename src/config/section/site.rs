//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My blog"
//! author = "Jane Doe"
//! url = "https://blog.example.com"
//! ```

use serde::{Deserialize, Serialize};

/// Site metadata used for feed titles and absolute links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,

    /// Author name, written as the feed author when non-empty.
    pub author: String,

    /// Public site URL (e.g., "https://blog.example.com").
    pub url: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: "Blog".into(),
            author: String::new(),
            url: "http://localhost:5277".into(),
        }
    }
}

impl SiteInfoConfig {
    /// `url` must be an absolute http(s) URL with a host.
    pub fn validate(&self, problems: &mut Vec<String>) {
        match url::Url::parse(&self.url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => {}
            Ok(_) => problems.push(format!(
                "site.url `{}` must be an http(s) URL with a host",
                self.url
            )),
            Err(e) => problems.push(format!("site.url `{}` is invalid: {e}", self.url)),
        }
    }
}
