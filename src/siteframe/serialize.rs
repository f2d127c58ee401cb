//! Payload serialization.
//!
//! Output layout:
//!
//! ```text
//! <!--siteframe:part type="header"-->
//! ...
//! <!--siteframe:/part-->
//!
//! <!--siteframe:page title="Home" slug="/" home="true"-->
//!     <!--siteframe:block type="html"-->
//! ...
//!     <!--siteframe:/block-->
//!
//!     <!--siteframe:block type="text"-->
//! ...
//!     <!--siteframe:/block-->
//! <!--siteframe:/page-->
//! ```
//!
//! Attribute values have `"` written as `&quot;`. The parser does not
//! decode it back, so a value containing a quote changes on re-parse.

use super::error::SiteframeError;
use super::parse::parse;
use super::types::{Attributes, Block, Document, Page, Part, Typed};

/// Indentation of block delimiter lines inside a page.
const BLOCK_INDENT: &str = "    ";

/// Separator between serialized parts, pages and blocks.
const SEPARATOR: &str = "\n\n";

/// Serialize a document to its canonical payload text.
pub fn serialize(doc: &Document) -> String {
    let parts = doc
        .parts
        .iter()
        .map(serialize_part)
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let pages = doc
        .pages
        .iter()
        .map(serialize_page)
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    [parts, pages]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
        .trim()
        .to_owned()
}

/// Serialize, then re-parse and check the result matches what a faithful
/// round trip must produce.
pub fn serialize_verified(doc: &Document) -> Result<String, SiteframeError> {
    let text = serialize(doc);
    let expected = expected_after_roundtrip(doc);
    compare(&expected, &parse(&text)).map_err(SiteframeError::RoundTrip)?;
    Ok(text)
}

fn serialize_part(part: &Part) -> String {
    format!(
        "<!--siteframe:part{}-->\n{}\n<!--siteframe:/part-->",
        attribute_section(&part.effective_attributes()),
        part.content.trim()
    )
}

fn serialize_block(block: &Block) -> String {
    format!(
        "{BLOCK_INDENT}<!--siteframe:block{}-->\n{}\n{BLOCK_INDENT}<!--siteframe:/block-->",
        attribute_section(&block.effective_attributes()),
        block.content.trim()
    )
}

fn serialize_page(page: &Page) -> String {
    let blocks = page
        .blocks
        .iter()
        .map(serialize_block)
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    format!(
        "<!--siteframe:page{}-->\n{blocks}\n<!--siteframe:/page-->",
        attribute_section(&page.attributes)
    )
}

/// ` key="value" key2="value2"`, or empty when there are no attributes.
fn attribute_section(attributes: &Attributes) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!(" {key}=\"{}\"", escape_value(value)))
        .collect()
}

#[inline]
fn escape_value(value: &str) -> String {
    value.replace('"', "&quot;")
}

// ============================================================================
// Round-trip Verification
// ============================================================================

/// The document a re-parse of `serialize(doc)` should yield, ids aside.
fn expected_after_roundtrip(doc: &Document) -> Document {
    let escape_all = |attributes: &Attributes| -> Attributes {
        attributes
            .iter()
            .map(|(k, v)| (k.clone(), escape_value(v)))
            .collect()
    };

    Document {
        parts: doc
            .parts
            .iter()
            .map(|part| Part {
                id: part.id.clone(),
                kind: escape_value(&part.kind),
                attributes: escape_all(&part.effective_attributes()),
                content: part.content.trim().to_owned(),
            })
            .collect(),
        pages: doc
            .pages
            .iter()
            .map(|page| Page {
                id: page.id.clone(),
                attributes: escape_all(&page.attributes),
                blocks: page
                    .blocks
                    .iter()
                    .map(|block| Block {
                        id: block.id.clone(),
                        kind: escape_value(&block.kind),
                        attributes: escape_all(&block.effective_attributes()),
                        content: block.content.trim().to_owned(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Structural comparison ignoring ids. Describes the first difference.
fn compare(expected: &Document, actual: &Document) -> Result<(), String> {
    if expected.parts.len() != actual.parts.len() {
        return Err(format!(
            "expected {} parts, found {}",
            expected.parts.len(),
            actual.parts.len()
        ));
    }
    if expected.pages.len() != actual.pages.len() {
        return Err(format!(
            "expected {} pages, found {}",
            expected.pages.len(),
            actual.pages.len()
        ));
    }

    for (want, got) in expected.parts.iter().zip(&actual.parts) {
        compare_typed(&want.id, want, got)?;
    }

    for (want, got) in expected.pages.iter().zip(&actual.pages) {
        if want.attributes != got.attributes {
            return Err(format!("{} attributes differ", want.id));
        }
        if want.blocks.len() != got.blocks.len() {
            return Err(format!(
                "{} expected {} blocks, found {}",
                want.id,
                want.blocks.len(),
                got.blocks.len()
            ));
        }
        for (want_block, got_block) in want.blocks.iter().zip(&got.blocks) {
            compare_typed(&want_block.id, want_block, got_block)?;
        }
    }

    Ok(())
}

fn compare_typed<T: Typed>(id: &str, want: &T, got: &T) -> Result<(), String> {
    if want.kind() != got.kind() {
        return Err(format!(
            "{id} type `{}` became `{}`",
            want.kind(),
            got.kind()
        ));
    }
    if want.attributes() != got.attributes() {
        return Err(format!("{id} attributes differ"));
    }
    if want.content() != got.content() {
        return Err(format!("{id} content differs"));
    }
    Ok(())
}
