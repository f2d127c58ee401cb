//! `[buttons]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[buttons]` section in siteframe.toml - call-to-action shortcodes.
///
/// # Example
/// ```toml
/// [buttons]
/// tokens = ["login_btn", "register_btn", "bonus_btn", "app_btn"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ButtonsConfig {
    /// Shortcode names looked up by `siteframe buttons`.
    #[serde(default = "defaults::buttons::tokens")]
    #[educe(Default = defaults::buttons::tokens())]
    pub tokens: Vec<String>,
}
