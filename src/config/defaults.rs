//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// Root Defaults
// ============================================================================

pub fn config_name() -> &'static str {
    "siteframe.toml"
}

// ============================================================================
// [buttons] Section Defaults
// ============================================================================

pub mod buttons {
    use crate::siteframe::buttons::DEFAULT_TOKENS;

    pub fn tokens() -> Vec<String> {
        DEFAULT_TOKENS.iter().map(|&token| token.to_owned()).collect()
    }
}
