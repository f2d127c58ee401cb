//! Payload parsing.
//!
//! Delimiters are matched with non-greedy, case-insensitive scans:
//!
//! ```text
//! <!--siteframe:part type="header"-->      opening tag + attributes
//! ...content...                            trimmed
//! <!--siteframe:/part-->                   closer (legacy: <!--/siteframe:part-->)
//! ```
//!
//! Parts and pages are scanned over the whole payload; blocks only inside
//! the text of each page. Unterminated tags are not matched and disappear
//! from the document. Nothing here fails.

use super::normalize::normalize;
use super::types::{
    Attributes, Block, DEFAULT_BLOCK_TYPE, DEFAULT_PART_TYPE, Document, Page, Part, TYPE_KEY,
};
use regex::Regex;
use std::sync::LazyLock;

/// Build the scanner for one delimiter kind.
///
/// Group 1 is the raw attribute text, group 2 the inner content.
fn delimited(kind: &str) -> Regex {
    Regex::new(&format!(
        r"(?is)<!--siteframe:{kind}([^>]*)-->(.*?)<!--(?:siteframe:/{kind}|/siteframe:{kind})-->"
    ))
    .unwrap()
}

static RE_PART: LazyLock<Regex> = LazyLock::new(|| delimited("part"));
static RE_PAGE: LazyLock<Regex> = LazyLock::new(|| delimited("page"));
static RE_BLOCK: LazyLock<Regex> = LazyLock::new(|| delimited("block"));

/// `key="value"`, key restricted to ASCII word characters.
static RE_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z0-9_]+)="([^"]*)""#).unwrap());

/// Parse the attribute section of an opening tag.
///
/// Values are taken verbatim; `&quot;` is not decoded. A repeated key keeps
/// its first position and its last value.
pub fn parse_attributes(raw: &str) -> Attributes {
    RE_ATTRIBUTE
        .captures_iter(raw)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .collect()
}

/// Parse a payload into a document. Normalizes first.
pub fn parse(payload: &str) -> Document {
    let source = normalize(payload);

    let parts = RE_PART
        .captures_iter(&source)
        .enumerate()
        .map(|(index, caps)| {
            let attributes = parse_attributes(&caps[1]);
            Part {
                id: format!("part-{index}"),
                kind: kind_of(&attributes, DEFAULT_PART_TYPE),
                attributes,
                content: caps[2].trim().to_owned(),
            }
        })
        .collect();

    let pages = RE_PAGE
        .captures_iter(&source)
        .enumerate()
        .map(|(index, caps)| Page {
            id: format!("page-{index}"),
            attributes: parse_attributes(&caps[1]),
            blocks: parse_blocks(&caps[2], index),
        })
        .collect();

    Document { parts, pages }
}

/// Scan blocks within the inner text of page `page_index`.
fn parse_blocks(inner: &str, page_index: usize) -> Vec<Block> {
    RE_BLOCK
        .captures_iter(inner)
        .enumerate()
        .map(|(index, caps)| {
            let attributes = parse_attributes(&caps[1]);
            Block {
                id: format!("block-{page_index}-{index}"),
                kind: kind_of(&attributes, DEFAULT_BLOCK_TYPE),
                attributes,
                content: caps[2].trim().to_owned(),
            }
        })
        .collect()
}

#[inline]
fn kind_of(attributes: &Attributes, default: &str) -> String {
    attributes
        .get(TYPE_KEY)
        .map_or_else(|| default.to_owned(), Clone::clone)
}
