//! Feed selection and metadata shared by all feeds.

use crate::{
    config::{FeedChannelConfig, FeedConfig, SiteConfig},
    content::{Article, Note, filter_articles_by_tag},
};

/// Which feed to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Articles without the exclude tag.
    Articles,
    /// Every article.
    AllArticles,
    /// Daily notes.
    Notes,
}

impl FeedKind {
    pub const ALL: [Self; 3] = [Self::Articles, Self::AllArticles, Self::Notes];

    /// Serving configuration for this feed.
    pub fn channel(self, feed: &FeedConfig) -> &FeedChannelConfig {
        match self {
            Self::Articles => &feed.articles,
            Self::AllArticles => &feed.all_articles,
            Self::Notes => &feed.notes,
        }
    }

    fn default_title(self, site_title: &str) -> String {
        match self {
            Self::Articles | Self::AllArticles => site_title.to_string(),
            Self::Notes => format!("{site_title} daily notes"),
        }
    }
}

/// Feed-level fields: title, self link, base URL for entry links.
#[derive(Debug, Clone)]
pub struct FeedMeta {
    pub title: String,
    pub self_link: String,
    /// Site URL without trailing slash.
    pub base_url: String,
    pub author: Option<String>,
}

impl FeedMeta {
    pub fn from_config(config: &SiteConfig, kind: FeedKind) -> Self {
        let channel = kind.channel(&config.feed);
        let title = channel
            .title
            .clone()
            .unwrap_or_else(|| kind.default_title(&config.site.title));
        let author = Some(config.site.author.clone()).filter(|a| !a.is_empty());

        Self {
            title,
            self_link: config.absolute_url(&channel.path),
            base_url: config.base_url().to_string(),
            author,
        }
    }

    /// Absolute link for a site-relative path.
    pub fn link(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// The newest `max_entries` articles, newest first.
///
/// `articles` is ordered oldest first. With `exclude_tag` set, articles
/// carrying that tag are dropped before selection.
pub fn latest_articles<'a>(
    articles: &'a [Article],
    exclude_tag: Option<&str>,
    max_entries: usize,
) -> Vec<&'a Article> {
    let candidates = match exclude_tag {
        Some(tag) => filter_articles_by_tag(articles, tag, false),
        None => articles.iter().collect(),
    };

    let n = max_entries.min(candidates.len());
    candidates[candidates.len() - n..]
        .iter()
        .rev()
        .copied()
        .collect()
}

/// The first `max_entries` notes; `notes` is already newest first.
pub fn latest_notes(notes: &[Note], max_entries: usize) -> &[Note] {
    &notes[..max_entries.min(notes.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn articles(count: usize) -> Vec<Article> {
        (0..count)
            .map(|i| Article {
                id: format!("a{i}"),
                title: format!("Article {i}"),
                body_html: String::new(),
                published_on: day(i as i64),
                tags: if i % 2 == 0 {
                    ["note".to_string()].into_iter().collect()
                } else {
                    Default::default()
                },
            })
            .collect()
    }

    fn notes(count: usize) -> Vec<Note> {
        (0..count)
            .map(|i| Note {
                id: format!("n{i}"),
                title: None,
                html_body: String::new(),
                day: day(1000 - i as i64),
                url: Note::url_for(&format!("n{i}")),
            })
            .collect()
    }

    fn ids<'a>(items: impl IntoIterator<Item = &'a Article>) -> Vec<&'a str> {
        items.into_iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_small_cache_reversed() {
        let all = articles(3);
        assert_eq!(ids(latest_articles(&all, None, 25)), ["a2", "a1", "a0"]);
    }

    #[test]
    fn test_large_cache_truncated_to_newest() {
        let all = articles(40);
        let latest = latest_articles(&all, None, 25);

        assert_eq!(latest.len(), 25);
        assert_eq!(latest[0].id, "a39");
        assert_eq!(latest[24].id, "a15");
        assert!(latest.windows(2).all(|w| w[0].published_on > w[1].published_on));
    }

    #[test]
    fn test_exclude_tag_before_selection() {
        let all = articles(10);
        let latest = latest_articles(&all, Some("note"), 3);

        assert_eq!(ids(latest.iter().copied()), ["a9", "a7", "a5"]);
        assert!(latest.iter().all(|a| !a.has_tag("note")));
    }

    #[test]
    fn test_empty_cache() {
        assert!(latest_articles(&[], None, 25).is_empty());
        assert!(latest_notes(&[], 25).is_empty());
    }

    #[test]
    fn test_notes_keep_order() {
        let all = notes(30);
        let latest = latest_notes(&all, 25);

        assert_eq!(latest.len(), 25);
        assert_eq!(latest, &all[..25]);
    }

    #[test]
    fn test_feed_meta_from_config() {
        let mut config = test_parse_config("");
        config.site.author = "Jane".into();
        let meta = FeedMeta::from_config(&config, FeedKind::AllArticles);

        assert_eq!(meta.title, "Test");
        assert_eq!(meta.self_link, "https://example.com/atom-all.xml");
        assert_eq!(meta.author.as_deref(), Some("Jane"));
        assert_eq!(meta.link("article/1/x.html"), "https://example.com/article/1/x.html");
    }

    #[test]
    fn test_feed_meta_title_override() {
        let config = test_parse_config("[feed.articles]\ntitle = \"Main\"\npath = \"/feed.xml\"");
        let meta = FeedMeta::from_config(&config, FeedKind::Articles);

        assert_eq!(meta.title, "Main");
        assert_eq!(meta.self_link, "https://example.com/feed.xml");
        assert!(meta.author.is_none());
    }
}
