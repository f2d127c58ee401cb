//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading `siteframe.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("siteframe.toml is not valid TOML or has unknown keys")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_path() {
        let err = ConfigError::Io(
            PathBuf::from("~/ops/siteframe.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("~/ops/siteframe.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_toml_error_from() {
        let toml_err = toml::from_str::<toml::Value>("[output").unwrap_err();
        let err = ConfigError::from(toml_err);
        assert!(format!("{err}").contains("siteframe.toml"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation("[buttons.tokens] is empty".to_string());
        assert!(format!("{err}").contains("[buttons.tokens] is empty"));
    }
}
