// ABOUTME: Byte-to-text decoding for raw feed documents.
// ABOUTME: Honors a configured charset, then the XML declaration, then UTF-8; a BOM always wins.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

use crate::error::RssError;

/// Decodes raw document bytes into text.
///
/// `charset` overrides whatever the document declares. Malformed sequences
/// are replaced with U+FFFD rather than failing the parse.
pub fn decode_document<'a>(data: &'a [u8], charset: Option<&str>) -> Result<Cow<'a, str>, RssError> {
    let encoding = match charset {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| RssError::UnknownEncoding(label.to_string()))?,
        None => declared_encoding(data).unwrap_or(UTF_8),
    };

    let (text, used, had_errors) = encoding.decode(data);
    if had_errors {
        warn!(encoding = used.name(), "document contains malformed byte sequences");
    }
    debug!(encoding = used.name(), "decoded document");
    Ok(text)
}

/// Reads the `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(data: &[u8]) -> Option<&'static Encoding> {
    let head = &data[..data.len().min(256)];
    let head = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;

    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    let label = &value[..value.find(quote)?];

    match Encoding::for_label(label.as_bytes()) {
        // The declaration was readable as ASCII, so the bytes cannot be UTF-16.
        Some(enc) => Some(enc.output_encoding()),
        None => {
            warn!(label, "unknown declared encoding, falling back to utf-8");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_utf8() {
        let text = decode_document("<rss>é</rss>".as_bytes(), None).unwrap();
        assert_eq!(text, "<rss>é</rss>");
    }

    #[test]
    fn test_declared_latin1() {
        let mut data = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><t>".to_vec();
        data.push(0xE9);
        data.extend_from_slice(b"</t>");
        let text = decode_document(&data, None).unwrap();
        assert!(text.ends_with("<t>é</t>"));
    }

    #[test]
    fn test_single_quoted_declaration() {
        let data = b"<?xml version='1.0' encoding='windows-1252'?><t>\x93q\x94</t>";
        let text = decode_document(data, None).unwrap();
        assert!(text.ends_with("<t>\u{201C}q\u{201D}</t>"));
    }

    #[test]
    fn test_charset_overrides_declaration() {
        let mut data = b"<?xml version=\"1.0\" encoding=\"utf-8\"?><t>".to_vec();
        data.push(0xE9);
        data.extend_from_slice(b"</t>");
        let text = decode_document(&data, Some("latin1")).unwrap();
        assert!(text.ends_with("<t>é</t>"));
    }

    #[test]
    fn test_bom_wins() {
        let mut data = vec![0xFF, 0xFE];
        for unit in "<t>ok</t>".encode_utf16() {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        let text = decode_document(&data, None).unwrap();
        assert_eq!(text, "<t>ok</t>");
    }

    #[test]
    fn test_unknown_charset_is_error() {
        let err = decode_document(b"<t/>", Some("no-such-charset")).unwrap_err();
        assert!(matches!(err, RssError::UnknownEncoding(ref l) if l == "no-such-charset"));
    }

    #[test]
    fn test_unknown_declared_falls_back() {
        let data = b"<?xml version=\"1.0\" encoding=\"bogus\"?><t>a</t>";
        let text = decode_document(data, None).unwrap();
        assert!(text.ends_with("<t>a</t>"));
    }
}
