//! Blog articles.

use super::encode_segment;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;

/// A published article. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Short stable identifier, part of the permalink.
    pub id: String,
    pub title: String,
    /// Rendered HTML body.
    pub body_html: String,
    pub published_on: DateTime<Utc>,
    pub tags: FxHashSet<String>,
}

impl Article {
    /// Site-relative URL path: `article/<id>/<slug>.html`, id percent-encoded.
    pub fn permalink(&self) -> String {
        format!(
            "article/{}/{}.html",
            encode_segment(&self.id),
            slugify(&self.title)
        )
    }

    /// Exact, case-sensitive tag match.
    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Keep (`keep = true`) or drop (`keep = false`) articles tagged `tag`.
///
/// Relative order is preserved.
pub fn filter_articles_by_tag<'a>(
    articles: &'a [Article],
    tag: &str,
    keep: bool,
) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| a.has_tag(tag) == keep)
        .collect()
}

/// Turn a title into a URL-safe slug.
///
/// Unicode is transliterated to ASCII, runs of non-alphanumeric characters
/// collapse into a single `-`.
pub fn slugify(title: &str) -> String {
    let ascii = deunicode::deunicode(title);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(id: &str, tags: &[&str]) -> Article {
        Article {
            id: id.into(),
            title: format!("Title {id}"),
            body_html: String::new(),
            published_on: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[test]
    fn test_permalink() {
        let mut a = article("x1", &[]);
        a.title = "Hello, World!".into();
        assert_eq!(a.permalink(), "article/x1/hello-world.html");
    }

    #[test]
    fn test_permalink_encodes_id() {
        let mut a = article("my post#2", &[]);
        a.title = "Über café".into();
        assert_eq!(a.permalink(), "article/my%20post%232/uber-cafe.html");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Go cookbook"), "go-cookbook");
        assert_eq!(slugify("  --Rust & C++--  "), "rust-c");
        assert_eq!(slugify("Über café"), "uber-cafe");
        assert_eq!(slugify("???"), "untitled");
    }

    #[test]
    fn test_filter_drop_tag() {
        let articles = vec![
            article("a", &["note"]),
            article("b", &["go"]),
            article("c", &["go", "note"]),
            article("d", &[]),
        ];
        let ids: Vec<_> = filter_articles_by_tag(&articles, "note", false)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, ["b", "d"]);
    }

    #[test]
    fn test_filter_keep_tag() {
        let articles = vec![article("a", &["note"]), article("b", &["Note"])];
        let kept = filter_articles_by_tag(&articles, "note", true);
        // tag match is exact, "Note" is a different tag
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");
    }
}
