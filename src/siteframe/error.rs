//! Codec and editor error types.

use thiserror::Error;

/// Errors raised around the codec.
///
/// Parsing itself never fails; these cover addressing entities that do not
/// exist, serializations that would not survive a re-parse, and patches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteframeError {
    #[error("part `{0}` not found")]
    PartNotFound(String),

    #[error("page `{0}` not found")]
    PageNotFound(String),

    #[error("block `{block}` not found in page `{page}`")]
    BlockNotFound { page: String, block: String },

    #[error("payload is empty, add markup in the raw editor first")]
    EmptyPayload,

    #[error("serialized payload does not round-trip: {0}")]
    RoundTrip(String),

    #[error("search text not found in payload, whitespace and characters must match exactly")]
    SearchNotFound,

    #[error("invalid patch: {0}")]
    InvalidPatch(String),
}
