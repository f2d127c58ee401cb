//! Tool configuration management for `siteframe.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                      |
//! |-------------|----------------------------------------------|
//! | `[output]`  | JSON formatting and trailing newline         |
//! | `[editor]`  | Round-trip verification of edits             |
//! | `[buttons]` | Shortcode tokens for call-to-action copy     |
//!
//! # Example
//!
//! ```toml
//! [output]
//! pretty = true
//!
//! [editor]
//! verify = true
//!
//! [buttons]
//! tokens = ["login_btn", "register_btn", "bonus_btn"]
//! ```
//!
//! The file is optional. Without `-C` a missing `siteframe.toml` in the
//! working directory means defaults; a path given with `-C` must exist.

mod buttons;
pub mod defaults;
mod editor;
mod error;
mod output;

use buttons::ButtonsConfig;
use editor::EditorConfig;
use error::ConfigError;
use output::OutputConfig;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Shortcode tokens are matched literally inside `[...]`.
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing siteframe.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Path of the loaded config file, if one was read
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,

    /// Structured editing settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Call-to-action shortcodes
    #[serde(default)]
    pub buttons: ButtonsConfig,
}

impl ToolConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: ToolConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolve, load, override with CLI flags, and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                let path = Self::expand_path(path);
                if !path.is_file() {
                    bail!(ConfigError::Io(
                        path,
                        Error::new(ErrorKind::NotFound, "config file not found"),
                    ));
                }
                Self::from_path(&path)?
            }
            None => {
                let path = PathBuf::from(defaults::config_name());
                if path.is_file() {
                    Self::from_path(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if cli.compact {
            self.output.pretty = false;
        }
        if cli.no_verify {
            self.editor.verify = false;
        }
    }

    /// Expand a leading `~` in a user-supplied path
    fn expand_path(path: &Path) -> PathBuf {
        let raw = path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&raw).into_owned())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.buttons.tokens.is_empty() {
            bail!(ConfigError::Validation(
                "[buttons.tokens] must have at least one element".into()
            ));
        }

        if let Some(token) = self
            .buttons
            .tokens
            .iter()
            .find(|token| !RE_TOKEN.is_match(token))
        {
            bail!(ConfigError::Validation(format!(
                "[buttons.tokens] `{token}` may only contain letters, digits and `_`"
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ToolConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.config_path.is_none());
        assert!(config.output.pretty);
        assert!(config.editor.verify);
    }

    #[test]
    fn test_from_str_full() {
        let config = ToolConfig::from_str(
            r#"
            [output]
            pretty = false

            [editor]
            verify = false

            [buttons]
            tokens = ["login_btn"]
        "#,
        )
        .unwrap();

        assert!(!config.output.pretty);
        assert!(config.output.trailing_newline);
        assert!(!config.editor.verify);
        assert_eq!(config.buttons.tokens, ["login_btn"]);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(ToolConfig::from_str("[serve]\nport = 1").is_err());
    }

    #[test]
    fn test_validate_empty_tokens() {
        let config = ToolConfig::from_str("[buttons]\ntokens = []").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[buttons.tokens]"));
    }

    #[test]
    fn test_validate_bad_token() {
        let config = ToolConfig::from_str("[buttons]\ntokens = [\"login btn\"]").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("login btn"));
    }

    #[test]
    fn test_from_path_sets_config_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[editor]\nverify = false").unwrap();

        let config = ToolConfig::from_path(file.path()).unwrap();
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
        assert!(!config.editor.verify);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ToolConfig::from_path(Path::new("/nonexistent/siteframe.toml")).unwrap_err();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let cli = Cli::parse_from(["siteframe", "-C", "/nonexistent/siteframe.toml", "stats"]);
        assert!(ToolConfig::load(&cli).is_err());
    }

    #[test]
    fn test_load_applies_cli_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\npretty = true").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let cli = Cli::parse_from([
            "siteframe",
            "-C",
            path.as_str(),
            "--compact",
            "--no-verify",
            "stats",
        ]);
        let config = ToolConfig::load(&cli).unwrap();
        assert!(!config.output.pretty);
        assert!(!config.editor.verify);
    }
}
