//! `[output]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[output]` section in siteframe.toml - how command results are written.
///
/// # Example
/// ```toml
/// [output]
/// pretty = false          # single-line JSON
/// trailing_newline = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub pretty: bool,

    /// Terminate text output with a newline.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub trailing_newline: bool,
}
