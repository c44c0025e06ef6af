//! `[feed]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [feed]
//! max_entries = 25            # Entries per feed (most recent first)
//! exclude_tag = "note"        # Tag dropped from the main article feed
//!
//! [feed.articles]
//! path = "/atom.xml"
//!
//! [feed.all_articles]
//! path = "/atom-all.xml"
//!
//! [feed.notes]
//! title = "My daily notes"
//! path = "/dailynotes-atom.xml"
//! ```

use serde::{Deserialize, Serialize};

const ARTICLES_PATH: &str = "/atom.xml";
const ALL_ARTICLES_PATH: &str = "/atom-all.xml";
const NOTES_PATH: &str = "/dailynotes-atom.xml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Maximum number of entries per feed.
    pub max_entries: usize,
    /// Articles carrying this tag are left out of `articles` (but not `all_articles`).
    pub exclude_tag: String,
    /// Article feed without `exclude_tag` articles.
    pub articles: FeedChannelConfig,
    /// Article feed with every article.
    pub all_articles: FeedChannelConfig,
    /// Daily notes feed.
    pub notes: FeedChannelConfig,
}

/// One served feed: URL path and optional title override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedChannelConfig {
    /// Feed title; falls back to the site title.
    pub title: Option<String>,
    /// URL path the feed is served at. Empty means the feed's default.
    pub path: String,
}

impl FeedChannelConfig {
    fn at(path: &str) -> Self {
        Self {
            title: None,
            path: path.into(),
        }
    }
}

impl Default for FeedChannelConfig {
    fn default() -> Self {
        Self::at("")
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_entries: 25,
            exclude_tag: "note".into(),
            articles: FeedChannelConfig::at(ARTICLES_PATH),
            all_articles: FeedChannelConfig::at(ALL_ARTICLES_PATH),
            notes: FeedChannelConfig::at(NOTES_PATH),
        }
    }
}

impl FeedConfig {
    /// Give channels declared without a `path` their default one.
    pub fn fill_default_paths(&mut self) {
        for (channel, default) in [
            (&mut self.articles, ARTICLES_PATH),
            (&mut self.all_articles, ALL_ARTICLES_PATH),
            (&mut self.notes, NOTES_PATH),
        ] {
            if channel.path.is_empty() {
                channel.path = default.into();
            }
        }
    }

    pub fn validate(&self, problems: &mut Vec<String>) {
        if self.max_entries == 0 {
            problems.push("feed.max_entries must be at least 1".into());
        }
        for (name, channel) in [
            ("articles", &self.articles),
            ("all_articles", &self.all_articles),
            ("notes", &self.notes),
        ] {
            if !channel.path.starts_with('/') {
                problems.push(format!("feed.{name}.path must start with `/`"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.feed.max_entries, 25);
        assert_eq!(config.feed.exclude_tag, "note");
        assert_eq!(config.feed.articles.path, "/atom.xml");
        assert_eq!(config.feed.all_articles.path, "/atom-all.xml");
        assert_eq!(config.feed.notes.path, "/dailynotes-atom.xml");
        assert!(config.feed.notes.title.is_none());
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config(
            "[feed]\nmax_entries = 10\nexclude_tag = \"draft\"\n[feed.notes]\ntitle = \"Notes\"\npath = \"/notes.xml\"",
        );
        assert_eq!(config.feed.max_entries, 10);
        assert_eq!(config.feed.exclude_tag, "draft");
        assert_eq!(config.feed.notes.title.as_deref(), Some("Notes"));
        assert_eq!(config.feed.notes.path, "/notes.xml");
        // untouched channels keep their defaults
        assert_eq!(config.feed.articles.path, "/atom.xml");
    }

    #[test]
    fn test_title_only_channel_keeps_default_path() {
        let config = test_parse_config("[feed.notes]\ntitle = \"Notes\"");
        assert_eq!(config.feed.notes.path, "/dailynotes-atom.xml");
        assert_eq!(config.feed.notes.title.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_relative_path_rejected() {
        let config = test_parse_config("[feed.articles]\npath = \"atom.xml\"");
        let mut problems = Vec::new();
        config.feed.validate(&mut problems);
        assert_eq!(problems, vec!["feed.articles.path must start with `/`"]);
    }
}
