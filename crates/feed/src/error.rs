// ABOUTME: Error types for RSS parsing operations.
// ABOUTME: Provides RssError with Xml, Malformed, NoChannel, and UnknownEncoding variants.

use std::fmt;
use thiserror::Error;

/// Errors that abort a parse.
///
/// Content-level problems (text interrupted by markup, values that fail
/// coercion, unknown tags) never surface here; they degrade to absent fields.
#[derive(Debug, Error)]
pub enum RssError {
    /// The tokenizer rejected the document (bad syntax, mismatched end tag).
    #[error("failed to read xml: {0}")]
    Xml(String),

    /// A reader did not find the tag it was positioned for.
    #[error("malformed document: expected {expected}, found {found}")]
    Malformed { expected: String, found: String },

    /// The document has no `channel` element.
    #[error("no valid channel tag in the rss feed")]
    NoChannel,

    /// A configured charset label is not a known encoding.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),
}

impl RssError {
    /// Creates an Xml error from an underlying tokenizer error.
    pub fn xml(err: impl fmt::Display) -> Self {
        RssError::Xml(err.to_string())
    }

    /// Creates a Malformed error describing what was expected and what was seen.
    pub fn malformed(expected: impl Into<String>, found: impl Into<String>) -> Self {
        RssError::Malformed {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Returns true if this is a NoChannel error.
    pub fn is_no_channel(&self) -> bool {
        matches!(self, RssError::NoChannel)
    }

    /// Returns true if this is a Malformed error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, RssError::Malformed { .. })
    }
}
