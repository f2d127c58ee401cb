//! Siteframe payload codec.
//!
//! A siteframe payload is the text column stored per website record. It
//! holds reusable parts and pages of blocks, delimited by HTML comments:
//!
//! | Stage         | Function            | Fails? |
//! |---------------|---------------------|--------|
//! | normalize     | [`normalize`]       | never  |
//! | parse         | [`parse`]           | never  |
//! | serialize     | [`serialize`]       | never  |
//! | verified      | [`serialize_verified`] | when a re-parse would differ |
//!
//! Malformed markup is not an error: the parser recognizes fewer entities.

pub mod buttons;
mod error;
mod normalize;
mod parse;
mod patch;
mod serialize;
mod types;

pub use error::SiteframeError;
pub use normalize::{is_escaped, normalize, normalize_opt};
pub use parse::parse;
pub use patch::Patch;
pub use serialize::{serialize, serialize_verified};
pub use types::{Block, Document, Page, Part, Typed};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_payload_end_to_end() {
        let stored = r#"<!--siteframe:part type=\"header\"-->\nHi\n<!--siteframe:/part-->\n\n<!--siteframe:page title=\"Home\" home=\"true\"-->\n    <!--siteframe:block type=\"html\"-->\n<p>x</p>\n    <!--siteframe:/block-->\n<!--siteframe:/page-->"#;
        assert!(is_escaped(stored));

        let doc = parse(stored);
        assert_eq!(doc.parts[0].content, "Hi");
        assert!(doc.pages[0].is_home());

        // Re-serializing yields the unescaped canonical text.
        assert_eq!(serialize(&doc), normalize(stored));
    }
}
