//! Call-to-action copy embedded in payloads.
//!
//! Generated sites carry their button labels as shortcodes inside block
//! content, in one of two forms:
//!
//! ```text
//! [login_btn url="/go" text="Sign in"]      attribute form (text|label|copy)
//! [register_btn]Start now[/register_btn]    enclosing form
//! ```
//!
//! Records without explicit button text fall back to what is found here.

use indexmap::IndexMap;
use regex::{Regex, escape};

/// Default shortcode tokens, in display order.
pub const DEFAULT_TOKENS: &[&str] = &["login_btn", "register_btn", "bonus_btn"];

/// Compiled patterns for one shortcode token.
struct Matcher {
    attribute: Regex,
    enclosing: Regex,
}

impl Matcher {
    fn new(token: &str) -> Result<Self, regex::Error> {
        let token = escape(token);
        Ok(Self {
            attribute: Regex::new(&format!(
                r#"(?i)\[{token}[^\]]*(?:text|label|copy)="([^"]+)"[^\]]*\]"#
            ))?,
            enclosing: Regex::new(&format!(r"(?is)\[{token}\](.*?)\[/{token}\]"))?,
        })
    }

    fn find(&self, payload: &str) -> Option<String> {
        if payload.is_empty() {
            return None;
        }
        if let Some(caps) = self.attribute.captures(payload) {
            return Some(caps[1].to_owned());
        }
        self.enclosing
            .captures(payload)
            .map(|caps| caps[1].trim().to_owned())
            .filter(|copy| !copy.is_empty())
    }
}

/// Find the copy for one shortcode token.
///
/// The attribute form wins over the enclosing form. Returns `None` when the
/// token is absent or its copy is empty.
#[allow(unused)]
pub fn extract_button_copy(payload: &str, token: &str) -> Option<String> {
    Matcher::new(token).ok()?.find(payload)
}

/// Copy for every token, keyed in token order.
///
/// Each token's patterns are compiled once and reused for the whole set.
pub fn extract_all<S: AsRef<str>>(payload: &str, tokens: &[S]) -> IndexMap<String, Option<String>> {
    tokens
        .iter()
        .map(|token| {
            let token = token.as_ref();
            let copy = Matcher::new(token)
                .ok()
                .and_then(|matcher| matcher.find(payload));
            (token.to_owned(), copy)
        })
        .collect()
}
