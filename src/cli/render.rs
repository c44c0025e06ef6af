//! One-shot rendering to a file or stdout.

use super::RenderTarget;
use crate::{
    config::SiteConfig,
    content::ContentSnapshot,
    generator::{Document, feed::FeedKind, render_document},
    log,
};
use anyhow::{Context, Result};
use chrono::Utc;
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

impl From<RenderTarget> for Document {
    fn from(target: RenderTarget) -> Self {
        match target {
            RenderTarget::Atom => Self::Feed(FeedKind::Articles),
            RenderTarget::AtomAll => Self::Feed(FeedKind::AllArticles),
            RenderTarget::Dailynotes => Self::Feed(FeedKind::Notes),
            RenderTarget::Sitemap => Self::Sitemap,
        }
    }
}

/// Render `target` and write it to `output` (stdout when `None`).
///
/// Errors are returned, not degraded: a failed render exits non-zero.
pub fn render(
    config: &SiteConfig,
    snapshot: &ContentSnapshot,
    target: RenderTarget,
    host: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let host = host.map_or_else(|| config.site_host(), str::to_string);
    let xml = render_document(target.into(), snapshot, config, &host, Utc::now())?;

    match output {
        Some(path) => {
            fs::write(path, &xml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log!("render"; "{}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(xml.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
