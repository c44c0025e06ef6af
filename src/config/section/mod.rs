//! Configuration section definitions.
//!
//! Each module corresponds to a section in `blogfeed.toml`:
//!
//! | Module    | TOML Section  | Purpose                              |
//! |-----------|---------------|--------------------------------------|
//! | `content` | `[content]`   | Articles and notes directories       |
//! | `feed`    | `[feed]`      | Atom feed limits and endpoints       |
//! | `serve`   | `[serve]`     | HTTP server                          |
//! | `site`    | `[site]`      | Site metadata                        |
//! | `sitemap` | `[sitemap]`   | Sitemap endpoint and static pages    |

mod content;
mod feed;
mod serve;
mod site;
mod sitemap;

pub use content::ContentConfig;
pub use feed::{FeedChannelConfig, FeedConfig};
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
pub use sitemap::SitemapConfig;
