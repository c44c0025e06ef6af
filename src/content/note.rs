//! Daily notes.

use super::encode_segment;
use chrono::{DateTime, Utc};

/// A daily note. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: Option<String>,
    /// HTML-escaped note text.
    pub html_body: String,
    pub day: DateTime<Utc>,
    /// Site-relative URL path.
    pub url: String,
}

impl Note {
    /// Site-relative URL path for a note id, id percent-encoded.
    pub fn url_for(id: &str) -> String {
        format!("dailynotes/note/{}", encode_segment(id))
    }

    /// Title, falling back to the note id when unset or blank.
    ///
    /// Blank means empty or whitespace only (`title: "  "`) and counts as
    /// unset. A non-blank title is returned untrimmed.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.id,
        }
    }
}
