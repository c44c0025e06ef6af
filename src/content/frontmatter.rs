//! Front matter extraction for articles and notes.
//!
//! Supports YAML-like (`---`) and TOML (`+++`) blocks:
//!
//! ```text
//! ---                         +++
//! id: go-tips                 id = "go-tips"
//! title: Go tips              title = "Go tips"
//! date: 2024-01-01            date = 2024-01-01
//! tags: go, programming       tags = ["go", "programming"]
//! ---                         +++
//! ```

use anyhow::Result;
use serde::{Deserialize, Deserializer};

/// Metadata shared by articles and notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntryMeta {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub draft: bool,
}

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Accept both quoted strings and bare TOML dates.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<toml::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(toml::Value::String(s)) => Some(s),
        Some(toml::Value::Datetime(dt)) => Some(dt.to_string()),
        Some(other) => Some(other.to_string()),
        None => None,
    })
}

/// Split `content` into metadata and body.
///
/// Content without a front matter block yields default metadata and the
/// whole input as body.
pub fn extract(content: &str) -> Result<(EntryMeta, &str)> {
    match detect(content) {
        Some((fm, body, true)) => Ok((parse_toml(fm)?, body)),
        Some((fm, body, false)) => Ok((parse_yaml_like(fm), body)),
        None => Ok((EntryMeta::default(), content)),
    }
}

/// Parse simple YAML-like front matter (key: value).
fn parse_yaml_like(content: &str) -> EntryMeta {
    let mut meta = EntryMeta::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_matches('"');

        match key.trim().to_lowercase().as_str() {
            "id" => meta.id = Some(value.to_string()),
            "title" => meta.title = Some(value.to_string()),
            "date" => meta.date = Some(value.to_string()),
            "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
            "tags" => {
                meta.tags = value
                    .trim_start_matches('[')
                    .trim_end_matches(']')
                    .split(',')
                    .map(|s| s.trim().trim_matches('"').to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            _ => {}
        }
    }

    meta
}

fn parse_toml(content: &str) -> Result<EntryMeta> {
    toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid TOML front matter: {}", e))
}

/// Returns `(front matter, body, is_toml)` if a block is found.
fn detect(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if trimmed.starts_with(fence)
            && let Some(end) = trimmed[3..].find(&format!("\n{fence}"))
        {
            let fm = trimmed[3..3 + end].trim();
            let body = trimmed[3 + end + 4..].trim_start_matches(['\r', '\n']);
            return Some((fm, body, is_toml));
        }
    }

    None
}
