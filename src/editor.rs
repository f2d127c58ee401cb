//! Editing session over one website's payload.
//!
//! The session owns both views of the payload: the raw text and the
//! structured [`Document`]. Structured edits re-serialize immediately so the
//! raw text always reflects the last edit that serialized cleanly.
//!
//! ```text
//!   set_raw / apply_patch ──► raw ──(lazy parse)──► document
//!                              ▲                       │
//!                              └──── serialize ◄── Edit::apply
//! ```
//!
//! When a serialization fails verification the raw text keeps its last good
//! value while the document keeps the attempted edit.

use crate::siteframe::{
    Block, Document, Page, Part, Patch, SiteframeError, Typed, normalize_opt, parse, serialize,
    serialize_verified,
};

/// Caller-owned editor state for one payload.
#[derive(Debug, Clone)]
pub struct EditorSession {
    raw: String,
    document: Option<Document>,
    dirty: bool,
    error: Option<SiteframeError>,
    verify: bool,
}

impl EditorSession {
    /// Open a session on a stored payload. `None` is the empty payload.
    pub fn new(payload: Option<&str>, verify: bool) -> Self {
        Self {
            raw: normalize_opt(payload),
            document: None,
            dirty: false,
            error: None,
            verify,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Replace the raw text, as typed in the raw editor.
    pub fn set_raw(&mut self, value: impl Into<String>) {
        self.raw = value.into();
        self.document = None;
        self.error = None;
        self.dirty = true;
    }

    /// Apply a text patch to the raw payload.
    pub fn apply_patch(&mut self, patch: &Patch) -> Result<(), SiteframeError> {
        let patched = patch.apply(&self.raw)?;
        self.set_raw(patched);
        Ok(())
    }

    fn ensure_document(&mut self) -> Result<&mut Document, SiteframeError> {
        if self.raw.trim().is_empty() {
            self.document = None;
            self.error = Some(SiteframeError::EmptyPayload);
            return Err(SiteframeError::EmptyPayload);
        }
        Ok(self.document.get_or_insert_with(|| parse(&self.raw)))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub fn set_part_type(&mut self, part_id: &str, value: &str) -> Result<(), SiteframeError> {
        self.update(|doc| {
            find_part(doc, part_id)?.set_kind(value);
            Ok(())
        })
    }

    pub fn set_part_attribute(
        &mut self,
        part_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), SiteframeError> {
        self.update(|doc| {
            find_part(doc, part_id)?.set_attribute(key, value);
            Ok(())
        })
    }

    pub fn set_part_content(&mut self, part_id: &str, value: &str) -> Result<(), SiteframeError> {
        self.update(|doc| {
            find_part(doc, part_id)?.set_content(value);
            Ok(())
        })
    }

    pub fn set_page_attribute(
        &mut self,
        page_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), SiteframeError> {
        self.update(|doc| {
            find_page(doc, page_id)?.set_attribute(key, value);
            Ok(())
        })
    }

    /// Checking writes `home="true"`; unchecking removes the key.
    pub fn set_page_home(&mut self, page_id: &str, checked: bool) -> Result<(), SiteframeError> {
        self.update(|doc| {
            find_page(doc, page_id)?.set_home(checked);
            Ok(())
        })
    }

    pub fn set_block_content(
        &mut self,
        page_id: &str,
        block_id: &str,
        value: &str,
    ) -> Result<(), SiteframeError> {
        self.update(|doc| {
            find_block(doc, page_id, block_id)?.set_content(value);
            Ok(())
        })
    }

    pub fn set_block_attribute(
        &mut self,
        page_id: &str,
        block_id: &str,
        key: &str,
        value: &str,
    ) -> Result<(), SiteframeError> {
        self.update(|doc| {
            find_block(doc, page_id, block_id)?.set_attribute(key, value);
            Ok(())
        })
    }

    /// Run a structured edit, then bring the raw text in sync.
    ///
    /// A failed lookup leaves everything untouched. A failed verification
    /// keeps the edit in the document and the previous raw text.
    fn update<F>(&mut self, edit: F) -> Result<(), SiteframeError>
    where
        F: FnOnce(&mut Document) -> Result<(), SiteframeError>,
    {
        let verify = self.verify;
        let doc = self.ensure_document()?;
        edit(doc)?;

        let serialized = if verify {
            serialize_verified(doc)
        } else {
            Ok(serialize(doc))
        };

        match serialized {
            Ok(text) => {
                self.raw = text;
                self.error = None;
                self.dirty = true;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }
}

fn find_part<'a>(doc: &'a mut Document, id: &str) -> Result<&'a mut Part, SiteframeError> {
    doc.part_mut(id)
        .ok_or_else(|| SiteframeError::PartNotFound(id.to_owned()))
}

fn find_page<'a>(doc: &'a mut Document, id: &str) -> Result<&'a mut Page, SiteframeError> {
    doc.page_mut(id)
        .ok_or_else(|| SiteframeError::PageNotFound(id.to_owned()))
}

fn find_block<'a>(
    doc: &'a mut Document,
    page_id: &str,
    block_id: &str,
) -> Result<&'a mut Block, SiteframeError> {
    find_page(doc, page_id)?
        .block_mut(block_id)
        .ok_or_else(|| SiteframeError::BlockNotFound {
            page: page_id.to_owned(),
            block: block_id.to_owned(),
        })
}

impl EditorSession {
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after the payload was handed to storage.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[allow(unused)]
impl EditorSession {
    /// Structured view of the raw text, parsed on first access.
    pub fn structured(&mut self) -> Result<&Document, SiteframeError> {
        self.ensure_document()?;
        self.document.as_ref().ok_or(SiteframeError::EmptyPayload)
    }

    /// Error left by the last failed parse or serialization.
    pub const fn error(&self) -> Option<&SiteframeError> {
        self.error.as_ref()
    }
}

// ============================================================================
// Edit Operations
// ============================================================================

/// One addressed mutation, as accepted on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    PartType { part: String, value: String },
    PartAttribute { part: String, key: String, value: String },
    PartContent { part: String, value: String },
    PageAttribute { page: String, key: String, value: String },
    PageHome { page: String, home: bool },
    BlockContent { page: String, block: String, value: String },
    BlockAttribute { page: String, block: String, key: String, value: String },
}

impl Edit {
    pub fn apply(&self, session: &mut EditorSession) -> Result<(), SiteframeError> {
        match self {
            Self::PartType { part, value } => session.set_part_type(part, value),
            Self::PartAttribute { part, key, value } => {
                session.set_part_attribute(part, key, value)
            }
            Self::PartContent { part, value } => session.set_part_content(part, value),
            Self::PageAttribute { page, key, value } => {
                session.set_page_attribute(page, key, value)
            }
            Self::PageHome { page, home } => session.set_page_home(page, *home),
            Self::BlockContent { page, block, value } => {
                session.set_block_content(page, block, value)
            }
            Self::BlockAttribute {
                page,
                block,
                key,
                value,
            } => session.set_block_attribute(page, block, key, value),
        }
    }
}
