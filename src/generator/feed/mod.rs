//! Atom 1.0 feed generation.
//!
//! Three feeds are served:
//!
//! | Kind          | Source   | Selection                                   |
//! |---------------|----------|---------------------------------------------|
//! | `Articles`    | articles | newest `max_entries`, `exclude_tag` dropped |
//! | `AllArticles` | articles | newest `max_entries`                        |
//! | `Notes`       | notes    | first `max_entries` (already newest first)  |

use crate::{config::SiteConfig, content::ContentSnapshot};
use anyhow::Result;
use chrono::{DateTime, Utc};

pub mod atom;
mod common;

pub use common::{FeedKind, FeedMeta};

/// Render feed `kind` from one snapshot.
pub fn render_feed(
    kind: FeedKind,
    snapshot: &ContentSnapshot,
    config: &SiteConfig,
    now: DateTime<Utc>,
) -> Result<String> {
    let meta = FeedMeta::from_config(config, kind);
    let max_entries = config.feed.max_entries;

    match kind {
        FeedKind::Articles => atom::render_articles_feed(
            snapshot.articles(),
            Some(config.feed.exclude_tag.as_str()),
            &meta,
            max_entries,
            now,
        ),
        FeedKind::AllArticles => {
            atom::render_articles_feed(snapshot.articles(), None, &meta, max_entries, now)
        }
        FeedKind::Notes => atom::render_notes_feed(snapshot.notes(), &meta, max_entries, now),
    }
}
