//! Atom 1.0 feed generation.
//!
//! Builds `atom_syndication` feeds from articles and daily notes.

use super::common::{FeedMeta, latest_articles, latest_notes};
use crate::content::{Article, Note};
use anyhow::Result;
use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, Feed, FeedBuilder, GeneratorBuilder, Link, LinkBuilder,
    Person, PersonBuilder, Text,
};
use chrono::{DateTime, Utc};

/// Render the article feed: newest `max_entries` articles, newest first.
///
/// `updated` is the newest article's publish date, or `now` when empty.
pub fn render_articles_feed(
    articles: &[Article],
    exclude_tag: Option<&str>,
    meta: &FeedMeta,
    max_entries: usize,
    now: DateTime<Utc>,
) -> Result<String> {
    let latest = latest_articles(articles, exclude_tag, max_entries);
    let updated = latest.first().map_or(now, |a| a.published_on);
    let entries = latest.iter().map(|a| article_entry(a, meta)).collect();

    AtomFeed::new(meta, updated, entries).into_xml()
}

/// Render the notes feed: first `max_entries` notes in input order.
pub fn render_notes_feed(
    notes: &[Note],
    meta: &FeedMeta,
    max_entries: usize,
    now: DateTime<Utc>,
) -> Result<String> {
    let latest = latest_notes(notes, max_entries);
    let updated = latest.first().map_or(now, |n| n.day);
    let entries = latest.iter().map(|n| note_entry(n, meta)).collect();

    AtomFeed::new(meta, updated, entries).into_xml()
}

struct AtomFeed<'a> {
    meta: &'a FeedMeta,
    updated: DateTime<Utc>,
    entries: Vec<Entry>,
}

impl<'a> AtomFeed<'a> {
    fn new(meta: &'a FeedMeta, updated: DateTime<Utc>, entries: Vec<Entry>) -> Self {
        Self {
            meta,
            updated,
            entries,
        }
    }

    fn into_xml(self) -> Result<String> {
        let meta = self.meta;

        let self_link: Link = LinkBuilder::default()
            .href(meta.self_link.clone())
            .rel("self".to_string())
            .mime_type(Some("application/atom+xml".to_string()))
            .build();

        let alternate_link: Link = LinkBuilder::default()
            .href(format!("{}/", meta.base_url))
            .rel("alternate".to_string())
            .build();

        let authors: Vec<Person> = meta
            .author
            .as_ref()
            .map(|name| vec![PersonBuilder::default().name(name.clone()).build()])
            .unwrap_or_default();

        let feed: Feed = FeedBuilder::default()
            .title(Text::plain(meta.title.clone()))
            .id(meta.self_link.clone())
            .updated(self.updated.fixed_offset())
            .authors(authors)
            .links(vec![self_link, alternate_link])
            .generator(Some(
                GeneratorBuilder::default()
                    .value(env!("CARGO_PKG_NAME"))
                    .version(Some(env!("CARGO_PKG_VERSION").to_string()))
                    .build(),
            ))
            .entries(self.entries)
            .build();

        let bytes = feed.write_to(Vec::new())?;
        Ok(String::from_utf8(bytes)?)
    }
}

fn article_entry(article: &Article, meta: &FeedMeta) -> Entry {
    html_entry(
        &article.title,
        meta.link(&article.permalink()),
        article.body_html.clone(),
        article.published_on,
    )
}

fn note_entry(note: &Note, meta: &FeedMeta) -> Entry {
    html_entry(
        note.display_title(),
        meta.link(&note.url),
        format!("<pre>{}</pre>", note.html_body),
        note.day,
    )
}

/// Entry with HTML content; the link doubles as the entry id.
fn html_entry(title: &str, link: String, html: String, date: DateTime<Utc>) -> Entry {
    let date = date.fixed_offset();

    let entry_link: Link = LinkBuilder::default()
        .href(link.clone())
        .rel("alternate".to_string())
        .build();

    let content = ContentBuilder::default()
        .value(Some(html))
        .content_type(Some("html".to_string()))
        .build();

    EntryBuilder::default()
        .title(Text::plain(title.to_string()))
        .id(link)
        .updated(date)
        .published(Some(date))
        .links(vec![entry_link])
        .content(Some(content))
        .build()
}
