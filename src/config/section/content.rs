//! `[content]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [content]
//! articles = "articles"       # Markdown articles (relative to site root)
//! notes = "notes"             # Daily notes (relative to site root)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Articles directory.
    pub articles: PathBuf,
    /// Daily notes directory.
    pub notes: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            articles: "articles".into(),
            notes: "notes".into(),
        }
    }
}
