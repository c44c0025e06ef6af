//! Site configuration management for `blogfeed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── content    # [content]
//! │   ├── feed       # [feed], [feed.articles], [feed.notes]
//! │   ├── serve      # [serve]
//! │   ├── site       # [site]
//! │   └── sitemap    # [sitemap]
//! ├── types/         # ConfigError
//! ├── util.rs        # Config file lookup, URL helpers
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                        |
//! |---------------|------------------------------------------------|
//! | `[site]`      | Site metadata (title, author, url)             |
//! | `[content]`   | Articles and notes directories                 |
//! | `[feed]`      | Atom feeds (entry limit, exclude tag, paths)   |
//! | `[sitemap]`   | Sitemap path and static page list              |
//! | `[serve]`     | HTTP server (interface, port, watch)           |

pub mod section;
pub mod types;
mod util;

pub use section::{
    ContentConfig, FeedChannelConfig, FeedConfig, ServeConfig, SiteInfoConfig, SitemapConfig,
};
pub use types::ConfigError;
pub use util::{find_config_file, url_host};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing blogfeed.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Content directories
    #[serde(default)]
    pub content: ContentConfig,

    /// Feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Sitemap settings
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. A missing file is
    /// not an error: defaults are used with cwd as the project root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                log!("config"; "{} not found, using defaults", cli.config.display());
                Self::default()
            }
        };

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.normalize_paths(&root, cli);
        config.apply_command_options(cli);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    fn from_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        config.feed.fill_default_paths();
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let mut config: Self =
            serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
                ignored.push(path.to_string());
            })
            .map_err(ConfigError::Toml)?;
        config.feed.fill_default_paths();
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Site base URL without trailing slash (e.g. `https://blog.example.com`).
    pub fn base_url(&self) -> &str {
        self.site.url.trim_end_matches('/')
    }

    /// Absolute URL for a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    /// Host of the configured site URL, used when a request carries no `Host`.
    pub fn site_host(&self) -> String {
        url_host(&self.site.url).unwrap_or_default()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        match &cli.command {
            Commands::Serve {
                interface,
                port,
                watch,
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.watch, watch.as_ref());
            }
            Commands::Render { .. } => {
                // Nothing to watch while rendering a single document
                self.serve.watch = false;
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve content directories against the project root.
    ///
    /// `--content DIR` replaces the root the content directories live under.
    fn normalize_paths(&mut self, root: &Path, cli: &Cli) {
        let content_root = match &cli.content {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => std::env::current_dir().unwrap_or_default().join(dir),
            None => root.to_path_buf(),
        };
        self.content.articles = content_root.join(&self.content.articles);
        self.content.notes = content_root.join(&self.content.notes);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting every problem into one error.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        self.site.validate(&mut problems);
        self.feed.validate(&mut problems);
        self.sitemap.validate(&mut problems);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems.join("; ")).into())
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with minimal required `[site]` fields.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\nurl = \"https://example.com\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[site\ntitle = \"My Blog\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.feed.max_entries, 25);
        assert_eq!(config.feed.exclude_tag, "note");
        assert_eq!(config.serve.port, 5277);
        assert_eq!(config.sitemap.path, "/sitemap.xml");
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[site]\ntitle = \"Test\"\n[feed]\nmax_entries = 10";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_absolute_url_joins_single_slash() {
        let mut config = test_parse_config("");
        assert_eq!(
            config.absolute_url("article/a1/hello.html"),
            "https://example.com/article/a1/hello.html"
        );

        config.site.url = "https://example.com/".into();
        assert_eq!(
            config.absolute_url("/atom.xml"),
            "https://example.com/atom.xml"
        );
    }

    #[test]
    fn test_site_host() {
        let config = test_parse_config("");
        assert_eq!(config.site_host(), "example.com");
    }

    #[test]
    fn test_validate_collects_problems() {
        let mut config = test_parse_config("[feed]\nmax_entries = 0");
        config.site.url = "ftp://example.com".into();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_entries"));
        assert!(err.contains("site.url"));
    }

    #[test]
    fn test_serve_flags_override_config() {
        use clap::Parser;

        let cli = Cli::parse_from(["blogfeed", "serve", "-p", "9000", "-w=false"]);
        let mut config = test_parse_config("[serve]\nport = 8000\ninterface = \"0.0.0.0\"");
        config.apply_command_options(&cli);

        assert_eq!(config.serve.port, 9000);
        assert!(!config.serve.watch);
        // not given on the command line
        assert_eq!(config.serve.interface.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_content_root_override() {
        use clap::Parser;

        let cli = Cli::parse_from(["blogfeed", "--content", "/srv/blog", "render", "sitemap"]);
        let mut config = test_parse_config("[content]\nnotes = \"daily\"");
        config.normalize_paths(Path::new("/etc/blogfeed"), &cli);
        config.apply_command_options(&cli);

        assert_eq!(config.content.articles, PathBuf::from("/srv/blog/articles"));
        assert_eq!(config.content.notes, PathBuf::from("/srv/blog/daily"));
        assert!(!config.serve.watch);
    }

    #[test]
    fn test_content_relative_to_root() {
        use clap::Parser;

        let cli = Cli::parse_from(["blogfeed", "serve"]);
        let mut config = test_parse_config("");
        config.normalize_paths(Path::new("/etc/blogfeed"), &cli);

        assert_eq!(config.content.articles, PathBuf::from("/etc/blogfeed/articles"));
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(SiteConfig::default().validate().is_ok());
    }
}
