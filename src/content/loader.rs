//! Content loading from the articles and notes directories.
//!
//! # File layout
//!
//! ```text
//! articles/
//! ├── go-tips.md            # front matter: id?, title, date, tags, draft
//! └── 2019/rust-notes.md    # nested directories are scanned too
//! notes/
//! └── 2024-03-01.md         # front matter optional: date falls back to file name
//! ```
//!
//! A file that cannot be parsed is logged and skipped; a content directory
//! that cannot be read fails the whole load so a refresh never replaces a
//! good snapshot with a half-empty one.

use super::{
    Article, ContentSnapshot, ContentStore, Note, frontmatter::{self, EntryMeta}, parse_date,
};
use crate::{config::ContentConfig, debug, log};
use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use pulldown_cmark::{Options, Parser, html};
use rustc_hash::FxHashSet;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File extensions treated as content.
const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Builds `ContentSnapshot`s from disk.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    articles_dir: PathBuf,
    notes_dir: PathBuf,
}

impl ContentLoader {
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            articles_dir: config.articles.clone(),
            notes_dir: config.notes.clone(),
        }
    }

    /// Directories the loader reads (for the watcher).
    pub fn dirs(&self) -> [&Path; 2] {
        [&self.articles_dir, &self.notes_dir]
    }

    /// Load a fresh snapshot: articles oldest first, notes newest first.
    pub fn load(&self) -> Result<ContentSnapshot> {
        let articles = self.load_articles()?;
        let notes = self.load_notes()?;
        debug!("content"; "{} articles, {} notes", articles.len(), notes.len());
        Ok(ContentSnapshot::new(articles, notes))
    }

    /// Load and swap a new snapshot into `store`.
    ///
    /// On error the store keeps its previous snapshot.
    pub fn refresh(&self, store: &ContentStore) -> Result<()> {
        let snapshot = self.load()?;
        log!("content"; "loaded {} articles, {} notes", snapshot.articles().len(), snapshot.notes().len());
        store.replace(snapshot);
        Ok(())
    }

    fn load_articles(&self) -> Result<Vec<Article>> {
        let mut articles = Vec::new();
        for path in collect_content_files(&self.articles_dir)? {
            match read_article(&path) {
                Ok(Some(article)) => articles.push(article),
                Ok(None) => {}
                Err(e) => log!("warning"; "skipping {}: {:#}", path.display(), e),
            }
        }

        articles.sort_by(|a, b| {
            a.published_on
                .cmp(&b.published_on)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut seen = FxHashSet::default();
        articles.retain(|a| {
            let fresh = seen.insert(a.id.clone());
            if !fresh {
                log!("warning"; "duplicate article id `{}`, keeping the earliest", a.id);
            }
            fresh
        });

        Ok(articles)
    }

    fn load_notes(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::new();
        for path in collect_content_files(&self.notes_dir)? {
            match read_note(&path) {
                Ok(Some(note)) => notes.push(note),
                Ok(None) => {}
                Err(e) => log!("warning"; "skipping {}: {:#}", path.display(), e),
            }
        }

        notes.sort_by(|a, b| b.day.cmp(&a.day).then_with(|| a.id.cmp(&b.id)));
        Ok(notes)
    }
}

/// Collect content files under `dir`, sorted by path.
///
/// A missing directory is empty content; an unreadable one is an error.
fn collect_content_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        debug!("content"; "{} does not exist, treating as empty", dir.display());
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort(true) {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_content_file(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

fn is_content_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| CONTENT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
    !hidden && ext_ok
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read one article. Drafts yield `Ok(None)`.
fn read_article(path: &Path) -> Result<Option<Article>> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let (meta, body) = frontmatter::extract(&source)?;
    let EntryMeta {
        id,
        title,
        date,
        tags,
        draft,
    } = meta;

    if draft {
        debug!("content"; "draft skipped: {}", path.display());
        return Ok(None);
    }

    let Some(date) = date else {
        bail!("missing `date`");
    };
    let Some(published_on) = parse_date(&date) else {
        bail!("invalid `date`: {date}");
    };

    let id = id.unwrap_or_else(|| file_stem(path));
    let title = title.unwrap_or_else(|| id.clone());

    Ok(Some(Article {
        id,
        title,
        body_html: markdown_to_html(body),
        published_on,
        tags: tags.into_iter().collect(),
    }))
}

/// Read one note. The day comes from `date`, else from a `YYYY-MM-DD` file name prefix.
fn read_note(path: &Path) -> Result<Option<Note>> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let (meta, body) = frontmatter::extract(&source)?;

    if meta.draft {
        return Ok(None);
    }

    let stem = file_stem(path);
    let day = meta
        .date
        .as_deref()
        .and_then(parse_date)
        .or_else(|| stem.get(..10).and_then(parse_date));
    let Some(day) = day else {
        bail!("missing `date` and file name does not start with YYYY-MM-DD");
    };

    let id = meta.id.unwrap_or(stem);
    Ok(Some(Note {
        url: Note::url_for(&id),
        title: meta.title,
        html_body: quick_xml::escape::escape(body.trim()).into_owned(),
        day,
        id,
    }))
}

/// Render Markdown to HTML with the common extensions enabled.
fn markdown_to_html(markdown: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, opts);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn loader(root: &TempDir) -> ContentLoader {
        ContentLoader::new(&ContentConfig {
            articles: root.path().join("articles"),
            notes: root.path().join("notes"),
        })
    }

    #[test]
    fn test_articles_sorted_oldest_first() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("articles");
        write(&dir, "b.md", "---\ntitle: B\ndate: 2024-02-01\n---\nbody b");
        write(&dir, "a.md", "---\ntitle: A\ndate: 2024-03-01\n---\nbody a");
        write(&dir, "2019/c.md", "---\ntitle: C\ndate: 2019-05-05\ntags: note\n---\n*c*");

        let snapshot = loader(&root).load().unwrap();
        let ids: Vec<_> = snapshot.articles().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["c", "b", "a"]);

        let c = &snapshot.articles()[0];
        assert!(c.has_tag("note"));
        assert_eq!(c.body_html.trim(), "<p><em>c</em></p>");
    }

    #[test]
    fn test_drafts_and_broken_files_skipped() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("articles");
        write(&dir, "ok.md", "---\ntitle: Ok\ndate: 2024-01-01\n---\n");
        write(&dir, "draft.md", "---\ntitle: D\ndate: 2024-01-02\ndraft: true\n---\n");
        write(&dir, "nodate.md", "---\ntitle: N\n---\n");
        write(&dir, "image.png", "not content");

        let snapshot = loader(&root).load().unwrap();
        assert_eq!(snapshot.articles().len(), 1);
        assert_eq!(snapshot.articles()[0].title, "Ok");
    }

    #[test]
    fn test_explicit_id_and_duplicates() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("articles");
        write(&dir, "one.md", "---\nid: same\ntitle: First\ndate: 2024-01-01\n---\n");
        write(&dir, "two.md", "---\nid: same\ntitle: Second\ndate: 2024-06-01\n---\n");

        let snapshot = loader(&root).load().unwrap();
        assert_eq!(snapshot.articles().len(), 1);
        assert_eq!(snapshot.articles()[0].title, "First");
    }

    #[test]
    fn test_notes_sorted_newest_first() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("notes");
        write(&dir, "2024-03-01.md", "first <b>note</b>");
        write(&dir, "2024-03-05-later.md", "---\ntitle: Later\n---\nsecond");
        write(&dir, "misc.md", "---\ndate: 2024-03-03\n---\nmiddle");

        let snapshot = loader(&root).load().unwrap();
        let ids: Vec<_> = snapshot.notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["2024-03-05-later", "misc", "2024-03-01"]);

        let oldest = &snapshot.notes()[2];
        assert_eq!(oldest.day.day(), 1);
        assert_eq!(oldest.html_body, "first &lt;b&gt;note&lt;/b&gt;");
        assert_eq!(oldest.url, "dailynotes/note/2024-03-01");
        assert_eq!(snapshot.notes()[0].title.as_deref(), Some("Later"));
    }

    #[test]
    fn test_ids_from_file_names_are_url_encoded() {
        let root = TempDir::new().unwrap();
        let articles = root.path().join("articles");
        write(&articles, "my post.md", "---\ntitle: Hi\ndate: 2024-01-01\n---\n");
        write(&root.path().join("notes"), "2024-01-01 café#1.md", "hello");

        let snapshot = loader(&root).load().unwrap();
        let article = &snapshot.articles()[0];
        assert_eq!(article.id, "my post");
        assert_eq!(article.permalink(), "article/my%20post/hi.html");

        let note = &snapshot.notes()[0];
        assert_eq!(note.id, "2024-01-01 café#1");
        assert_eq!(note.url, "dailynotes/note/2024-01-01%20caf%C3%A9%231");
    }

    #[test]
    fn test_missing_dirs_are_empty() {
        let root = TempDir::new().unwrap();
        let snapshot = loader(&root).load().unwrap();
        assert!(snapshot.articles().is_empty());
        assert!(snapshot.notes().is_empty());
    }

    #[test]
    fn test_file_as_dir_is_error() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("articles"), "").unwrap();
        assert!(loader(&root).load().is_err());
    }

    #[test]
    fn test_refresh_replaces_snapshot() {
        let root = TempDir::new().unwrap();
        let loader = loader(&root);
        let store = ContentStore::default();

        write(&root.path().join("notes"), "2024-01-01.md", "hi");
        loader.refresh(&store).unwrap();
        assert_eq!(store.load().notes().len(), 1);
    }
}
