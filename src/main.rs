//! blogfeed - Atom feeds and sitemap for a personal blog.

mod cli;
mod config;
mod content;
mod core;
mod generator;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use content::{ContentLoader, ContentStore};
use std::sync::Arc;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    // Keep stdout clean for the rendered document
    if matches!(cli.command, Commands::Render { output: None, .. }) {
        logger::set_stderr_only(true);
    }

    let config = SiteConfig::load(&cli)?;
    let loader = ContentLoader::new(&config.content);
    let snapshot = loader.load()?;
    log!("content"; "loaded {} articles, {} notes", snapshot.articles().len(), snapshot.notes().len());

    match cli.command {
        Commands::Serve { .. } => cli::serve::serve(
            Arc::new(config),
            Arc::new(ContentStore::new(snapshot)),
            loader,
        ),
        Commands::Render {
            target,
            host,
            output,
        } => cli::render::render(
            &config,
            &snapshot,
            target,
            host.as_deref(),
            output.as_deref(),
        ),
    }
}
