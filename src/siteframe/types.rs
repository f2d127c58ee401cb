//! Siteframe document model.
//!
//! A [`Document`] is rebuilt from the payload text on every parse. The
//! `id` fields are synthetic and only address entities while the document
//! lives in memory; they are never written back into the payload.
//!
//! ```text
//! Document
//! ├── parts: [Part]            <!--siteframe:part ...-->
//! └── pages: [Page]            <!--siteframe:page ...-->
//!                └── blocks: [Block]   <!--siteframe:block ...-->
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute set of a delimiter tag.
///
/// Keeps insertion order so an untouched tag serializes back with its keys
/// in source order. Equality ignores order.
pub type Attributes = IndexMap<String, String>;

/// Attribute key mirrored by the `kind` of parts and blocks.
pub const TYPE_KEY: &str = "type";

/// Page attribute marking the site's homepage.
pub const HOME_KEY: &str = "home";

/// Kind assigned to a part without a `type` attribute.
pub const DEFAULT_PART_TYPE: &str = "custom";

/// Kind assigned to a block without a `type` attribute.
pub const DEFAULT_BLOCK_TYPE: &str = "html";

// ============================================================================
// Document
// ============================================================================

/// Root of a parsed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// True when neither parts nor pages were recognized.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.pages.is_empty()
    }

    pub fn part_mut(&mut self, id: &str) -> Option<&mut Part> {
        self.parts.iter_mut().find(|part| part.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| page.id == id)
    }

    /// The first page flagged with `home="true"`.
    pub fn home_page(&self) -> Option<&Page> {
        self.pages.iter().find(|page| page.is_home())
    }

    /// Total number of blocks across all pages.
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|page| page.blocks.len()).sum()
    }
}

// ============================================================================
// Part / Block
// ============================================================================

/// A reusable global fragment such as a header or footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub content: String,
}

/// A content unit nested inside exactly one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub content: String,
}

/// Shared behaviour of the two typed entities.
///
/// `kind` and `attributes["type"]` are kept equal by every setter here.
pub trait Typed {
    fn kind(&self) -> &str;
    fn attributes(&self) -> &Attributes;
    fn content(&self) -> &str;

    fn kind_mut(&mut self) -> &mut String;
    fn attributes_mut(&mut self) -> &mut Attributes;
    fn content_mut(&mut self) -> &mut String;

    /// Change the kind, cascading into `attributes["type"]`.
    fn set_kind(&mut self, value: &str) {
        *self.kind_mut() = value.to_owned();
        self.attributes_mut()
            .insert(TYPE_KEY.to_owned(), value.to_owned());
    }

    /// Set an attribute; writing `type` also changes the kind.
    fn set_attribute(&mut self, key: &str, value: &str) {
        if key == TYPE_KEY {
            *self.kind_mut() = value.to_owned();
        }
        self.attributes_mut().insert(key.to_owned(), value.to_owned());
    }

    fn set_content(&mut self, value: &str) {
        *self.content_mut() = value.to_owned();
    }

    /// Attributes as they are written out: `type` always present and equal
    /// to the kind, keeping its original position when it already existed.
    fn effective_attributes(&self) -> Attributes {
        let mut attributes = self.attributes().clone();
        attributes.insert(TYPE_KEY.to_owned(), self.kind().to_owned());
        attributes
    }
}

macro_rules! impl_typed {
    ($($ty:ty),*) => {$(
        impl Typed for $ty {
            fn kind(&self) -> &str { &self.kind }
            fn attributes(&self) -> &Attributes { &self.attributes }
            fn content(&self) -> &str { &self.content }
            fn kind_mut(&mut self) -> &mut String { &mut self.kind }
            fn attributes_mut(&mut self) -> &mut Attributes { &mut self.attributes }
            fn content_mut(&mut self) -> &mut String { &mut self.content }
        }
    )*};
}

impl_typed!(Part, Block);

// ============================================================================
// Page
// ============================================================================

/// One site page with its ordered blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.attribute("title")
    }

    pub fn slug(&self) -> Option<&str> {
        self.attribute("slug")
    }

    /// Presence of `home="true"`. Any other value, or absence, is not home.
    pub fn is_home(&self) -> bool {
        self.attribute(HOME_KEY) == Some("true")
    }

    /// Toggle the homepage flag. Clearing removes the key entirely.
    pub fn set_home(&mut self, home: bool) {
        if home {
            self.attributes
                .insert(HOME_KEY.to_owned(), "true".to_owned());
        } else {
            self.attributes.shift_remove(HOME_KEY);
        }
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_owned(), value.to_owned());
    }

    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|block| block.id == id)
    }
}
