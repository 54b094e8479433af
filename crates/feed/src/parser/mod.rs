// ABOUTME: RSS 2.0 parser entry points: RssParser and the channel assembler.
// ABOUTME: Locates <channel> under the document root and hands it to the element readers.

mod elements;
mod primitives;

pub use elements::{
    read_category, read_channel, read_cloud, read_enclosure, read_guid, read_image, read_item,
    read_skip_days, read_skip_hours, read_source, read_text_input,
};
pub use primitives::{for_each_child, read_attributes, read_text, skip_subtree};

use tracing::debug;

use crate::cursor::{EventKind, EventSource, XmlCursor};
use crate::encoding::decode_document;
use crate::error::RssError;
use crate::models::Channel;
use crate::options::{ParserBuilder, ParserOptions};

/// Parses RSS 2.0 documents into [`Channel`] records.
///
/// Holds configuration only; every call creates its own cursor, so one
/// parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RssParser {
    opts: ParserOptions,
}

impl RssParser {
    pub fn new(opts: ParserOptions) -> Self {
        Self { opts }
    }

    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.opts
    }

    /// Parses a document that is already text.
    pub fn parse_str(&self, xml: &str) -> Result<Channel, RssError> {
        debug!(len = xml.len(), trim_text = self.opts.trim_text, "parsing rss document");
        let mut cursor = XmlCursor::open(xml, self.opts.trim_text)?;
        read_document(&mut cursor)
    }

    /// Decodes raw bytes (see [`decode_document`]) and parses the result.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<Channel, RssError> {
        let xml = decode_document(data, self.opts.charset.as_deref())?;
        self.parse_str(&xml)
    }
}

/// Finds the `channel` element starting from the document root and reads it.
///
/// The cursor must be on the root start tag (or end of document). A root
/// named `channel` is read directly; otherwise the root's children are
/// scanned and every non-channel subtree is skipped.
pub fn read_document<S: EventSource>(source: &mut S) -> Result<Channel, RssError> {
    match source.event() {
        EventKind::StartTag if source.name() == "channel" => return read_channel(source),
        EventKind::StartTag => {}
        _ => return Err(RssError::NoChannel),
    }

    loop {
        match source.next()? {
            EventKind::StartTag if source.name() == "channel" => return read_channel(source),
            EventKind::StartTag => skip_subtree(source)?,
            EventKind::EndTag | EventKind::EndDocument => return Err(RssError::NoChannel),
            _ => {}
        }
    }
}
