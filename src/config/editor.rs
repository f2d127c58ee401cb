//! `[editor]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[editor]` section in siteframe.toml - structured editing behaviour.
///
/// # Example
/// ```toml
/// [editor]
/// verify = true   # re-parse every serialization and reject drift
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Check that each serialized payload parses back to the edited document.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub verify: bool,
}
