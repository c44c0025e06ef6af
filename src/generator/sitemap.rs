//! Sitemap generation.
//!
//! Lists every article, the configured static pages and every daily note
//! for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!  <url>
//!   <loc>https://example.com/article/a1/hello.html</loc>
//!   <lastmod>2025-01-01</lastmod>
//!  </url>
//! </urlset>
//! ```

use crate::content::{Article, Note};
use anyhow::Result;
use chrono::NaiveDate;
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const LASTMOD_FORMAT: &str = "%Y-%m-%d";

/// Render the sitemap for `host`.
///
/// Order: articles (as given), static URLs, notes. Static pages carry
/// `today` as their `lastmod`.
pub fn render_sitemap(
    articles: &[Article],
    static_urls: &[String],
    notes: &[Note],
    host: &str,
    today: NaiveDate,
) -> Result<String> {
    SitemapUrlSet::build(articles, static_urls, notes, host, today).into_xml()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
}

#[derive(Debug, Default)]
pub struct SitemapUrlSet {
    pub urls: Vec<SitemapUrl>,
}

impl SitemapUrlSet {
    pub fn build(
        articles: &[Article],
        static_urls: &[String],
        notes: &[Note],
        host: &str,
        today: NaiveDate,
    ) -> Self {
        let mut urls = Vec::with_capacity(articles.len() + static_urls.len() + notes.len());
        let mut push = |path: &str, date: NaiveDate| {
            urls.push(SitemapUrl {
                loc: join_url(host, path),
                lastmod: date.format(LASTMOD_FORMAT).to_string(),
            });
        };

        for article in articles {
            push(&article.permalink(), article.published_on.date_naive());
        }
        for path in static_urls {
            push(path, today);
        }
        for note in notes {
            push(&note.url, note.day.date_naive());
        }

        Self { urls }
    }

    pub fn into_xml(self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::with_capacity(4096), b' ', 1);

        let urlset = BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]);
        writer.write_event(Event::Start(urlset))?;
        for url in &self.urls {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &url.loc)?;
            write_text_element(&mut writer, "lastmod", &url.lastmod)?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let body = String::from_utf8(writer.into_inner())?;
        Ok(format!("{XML_HEADER}{body}"))
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// `https://` + `host` and `path` joined as one cleaned slash path.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment,
/// and the result never ends in `/`.
pub fn join_url(host: &str, path: &str) -> String {
    format!("https://{}", clean_path(&format!("{host}/{path}")))
}

fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}
