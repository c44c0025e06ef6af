//! Request path to document routing.

use crate::{
    config::SiteConfig,
    generator::{Document, feed::FeedKind},
};

/// Resolve a request URL to the document served there.
///
/// Query strings and fragments are ignored; paths match exactly.
pub fn resolve(url: &str, config: &SiteConfig) -> Option<Document> {
    let path = url.split(['?', '#']).next().unwrap_or(url);

    if path == config.sitemap.path {
        return Some(Document::Sitemap);
    }
    FeedKind::ALL
        .into_iter()
        .find(|kind| kind.channel(&config.feed).path == path)
        .map(Document::Feed)
}
