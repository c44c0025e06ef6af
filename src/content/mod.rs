//! Blog content: articles, daily notes and the shared snapshot.
//!
//! ```text
//! articles/*.md ─┐
//!                ├─► ContentLoader ─► ContentSnapshot ─► ContentStore (ArcSwap)
//! notes/*.md ────┘                                          │
//!                                   ContentWatcher ─refresh─┘
//! ```
//!
//! Renderers only ever see an `Arc<ContentSnapshot>`: articles ordered
//! oldest first, notes ordered newest first. A refresh builds a whole new
//! snapshot and swaps it in; readers holding the old one are unaffected.

mod article;
mod frontmatter;
mod loader;
mod note;
mod store;
mod watch;

pub use article::{Article, filter_articles_by_tag};
pub use loader::ContentLoader;
pub use note::Note;
pub use store::{ContentSnapshot, ContentStore};
pub use watch::spawn_watcher;

use chrono::{DateTime, NaiveDate, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::borrow::Cow;

/// Everything outside the RFC 3986 unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode one URL path segment (ids come from file names).
fn encode_segment(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, PATH_SEGMENT).into()
}

/// Parse a front matter date: `YYYY-MM-DD` or RFC 3339.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim().trim_matches('"');
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
