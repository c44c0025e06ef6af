//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = ConfigError::Io(
            PathBuf::from("blogfeed.toml"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(err.to_string(), "IO error when reading `blogfeed.toml`");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_message() {
        let err = ConfigError::Validation("feed.max_entries must be at least 1".into());
        assert!(err.to_string().ends_with("feed.max_entries must be at least 1"));
    }
}
