//! XML document generators.
//!
//! Render documents from a content snapshot:
//!
//! - **Feed**: Atom feeds for articles and daily notes
//! - **Sitemap**: Search engine indexing (`sitemap.xml`)
//!
//! Generators are pure: they take the data and the current time and
//! return the XML text. Serving and error policy live in `cli::serve`.

pub mod feed;
pub mod sitemap;

use crate::{config::SiteConfig, content::ContentSnapshot};
use anyhow::Result;
use chrono::{DateTime, Utc};
use feed::{FeedKind, render_feed};
use sitemap::render_sitemap;

/// A document that can be rendered from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    Feed(FeedKind),
    Sitemap,
}

/// Render `document` from one snapshot.
///
/// `host` is only used by the sitemap.
pub fn render_document(
    document: Document,
    snapshot: &ContentSnapshot,
    config: &SiteConfig,
    host: &str,
    now: DateTime<Utc>,
) -> Result<String> {
    match document {
        Document::Feed(kind) => render_feed(kind, snapshot, config, now),
        Document::Sitemap => render_sitemap(
            snapshot.articles(),
            &config.sitemap.static_urls,
            snapshot.notes(),
            host,
            now.date_naive(),
        ),
    }
}
