// ABOUTME: Tolerant streaming parser for RSS 2.0 documents.
// ABOUTME: Re-exports the data model, parser entry points, options, and coercion helpers.

//! Parses RSS 2.0 feeds into a typed, all-optional data model.
//!
//! Structural problems (a reader not finding the tag it expects, no
//! `channel` element) abort the parse. Content problems degrade to absent
//! fields: text interrupted by markup, numbers that do not parse, and
//! unknown elements (which are skipped along with their subtrees).
//!
//! ```
//! let xml = "<rss><channel><title>T</title><item><title>I1</title></item></channel></rss>";
//! let channel = rsskit_feed::parse_channel(xml).unwrap();
//! assert_eq!(channel.title.as_deref(), Some("T"));
//! assert_eq!(channel.items().len(), 1);
//! ```

pub mod coerce;
pub mod cursor;
pub mod encoding;
pub mod error;
pub mod models;
pub mod options;
pub mod parser;
pub mod time_parse;

pub use coerce::{parse_bool, parse_int, parse_long, parse_strict_bool};
pub use cursor::{EventKind, EventSource, XmlCursor};
pub use encoding::decode_document;
pub use error::RssError;
pub use models::{Category, Channel, Cloud, Enclosure, Guid, Image, Item, Source, TextInput};
pub use options::{ParserBuilder, ParserOptions};
pub use parser::{read_document, RssParser};
pub use time_parse::parse_rfc822_date;

/// Parses an RSS document held as text, with default options.
pub fn parse_channel(xml: &str) -> Result<Channel, RssError> {
    RssParser::default().parse_str(xml)
}

/// Parses raw RSS bytes, detecting the encoding, with default options.
pub fn parse_channel_bytes(data: &[u8]) -> Result<Channel, RssError> {
    RssParser::default().parse_bytes(data)
}
