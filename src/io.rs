//! Payload input and command output.
//!
//! Input is a file path or `-` for stdin. Output goes to stdout unless
//! `--output` names a file.

use crate::config::ToolConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::{Read, Write, stdin, stdout},
    path::Path,
};

/// Marker path for stdin.
const STDIN: &str = "-";

/// Read the whole input as UTF-8 text.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new(STDIN) {
        let mut buf = String::new();
        stdin()
            .lock()
            .read_to_string(&mut buf)
            .context("Failed to read payload from stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read `{}`", path.display()))
}

/// Where command results are written.
pub struct Output<'a> {
    target: Option<&'a Path>,
    config: &'a ToolConfig,
}

impl<'a> Output<'a> {
    pub const fn new(target: Option<&'a Path>, config: &'a ToolConfig) -> Self {
        Self { target, config }
    }

    /// Write text, honoring `[output].trailing_newline`.
    pub fn text(&self, text: &str) -> Result<()> {
        let mut text = text.to_owned();
        if self.config.output.trailing_newline && !text.ends_with('\n') {
            text.push('\n');
        }
        self.write(&text)
    }

    /// Write a value as JSON, honoring `[output].pretty`.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.config.output.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .context("Failed to encode JSON output")?;
        self.text(&json)
    }

    fn write(&self, text: &str) -> Result<()> {
        match self.target {
            Some(path) => fs::write(path, text)
                .with_context(|| format!("Failed to write `{}`", path.display())),
            None => {
                let mut stdout = stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|()| stdout.flush())
                    .context("Failed to write to stdout")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.html");
        fs::write(&path, "<!--siteframe:part-->x<!--siteframe:/part-->").unwrap();
        assert_eq!(
            read_input(&path).unwrap(),
            "<!--siteframe:part-->x<!--siteframe:/part-->"
        );
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Path::new("/nonexistent/payload.html")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/payload.html"));
    }

    #[test]
    fn test_text_appends_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let config = ToolConfig::default();

        Output::new(Some(&path), &config).text("abc").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "abc\n");
    }

    #[test]
    fn test_text_without_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let mut config = ToolConfig::default();
        config.output.trailing_newline = false;

        Output::new(Some(&path), &config).text("abc").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "abc");
    }

    #[test]
    fn test_json_compact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut config = ToolConfig::default();
        config.output.pretty = false;

        let value = BTreeMap::from([("a", 1)]);
        Output::new(Some(&path), &config).json(&value).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n");
    }
}
