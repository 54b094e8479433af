// ABOUTME: Pull-style event source consumed by the element readers.
// ABOUTME: XmlCursor adapts quick-xml into start/end/text events with coalesced text.

use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::RssError;

/// Kind of the event the cursor is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    StartDocument,
    StartTag,
    EndTag,
    Text,
    EndDocument,
}

/// Cursor over a stream of XML events.
///
/// Tag names are qualified names taken verbatim (`itunes:summary` and
/// `summary` are different tags). Adjacent text is reported as one event.
pub trait EventSource {
    /// The event the cursor is currently on.
    fn event(&self) -> EventKind;

    /// Advances to the next event and returns its kind.
    fn next(&mut self) -> Result<EventKind, RssError>;

    /// Tag name of the current start or end tag, empty otherwise.
    fn name(&self) -> &str;

    /// Content of the current text event, empty otherwise.
    fn text(&self) -> &str;

    /// Value of the named attribute on the current start tag.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Human-readable description of the current event, for error messages.
    fn describe(&self) -> String {
        match self.event() {
            EventKind::StartDocument => "start of document".to_string(),
            EventKind::StartTag => format!("start tag <{}>", self.name()),
            EventKind::EndTag => format!("end tag </{}>", self.name()),
            EventKind::Text => "text".to_string(),
            EventKind::EndDocument => "end of document".to_string(),
        }
    }
}

/// quick-xml backed [`EventSource`] over an in-memory document.
pub struct XmlCursor<'a> {
    reader: Reader<&'a [u8]>,
    pending: Option<Event<'a>>,
    trim_text: bool,
    kind: EventKind,
    name: String,
    text: String,
    attributes: Vec<(String, String)>,
}

impl<'a> XmlCursor<'a> {
    pub fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().expand_empty_elements = true;

        Self {
            reader,
            pending: None,
            trim_text: false,
            kind: EventKind::StartDocument,
            name: String::new(),
            text: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Trims text events and drops whitespace-only ones.
    pub fn with_trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    /// Creates a cursor positioned on the first start tag of the document,
    /// or on the end of the document if it has no elements.
    pub fn open(xml: &'a str, trim_text: bool) -> Result<Self, RssError> {
        let mut cursor = Self::new(xml).with_trim_text(trim_text);
        loop {
            match cursor.next()? {
                EventKind::StartTag | EventKind::EndDocument => return Ok(cursor),
                _ => {}
            }
        }
    }

    fn read(&mut self) -> Result<Event<'a>, RssError> {
        match self.pending.take() {
            Some(event) => Ok(event),
            None => self.reader.read_event().map_err(|e| {
                RssError::xml(format!("{} at byte {}", e, self.reader.error_position()))
            }),
        }
    }

    fn set_tag(&mut self, kind: EventKind, name: &[u8]) -> EventKind {
        self.kind = kind;
        self.name = String::from_utf8_lossy(name).into_owned();
        self.text.clear();
        kind
    }

    fn capture_attributes(&mut self, start: &BytesStart<'_>) {
        self.attributes.clear();
        for attr in start.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value);
            let value = match unescape(&raw) {
                Ok(v) => v.into_owned(),
                Err(_) => raw.to_string(),
            };
            self.attributes.push((key, value));
        }
    }

    /// Emits accumulated text, or returns None if there is nothing to report.
    fn flush_text(&mut self, buf: String) -> Option<EventKind> {
        let text = if self.trim_text {
            buf.trim().to_string()
        } else {
            buf
        };
        if text.is_empty() {
            return None;
        }
        self.kind = EventKind::Text;
        self.name.clear();
        self.attributes.clear();
        self.text = text;
        Some(EventKind::Text)
    }
}

impl EventSource for XmlCursor<'_> {
    fn event(&self) -> EventKind {
        self.kind
    }

    fn next(&mut self) -> Result<EventKind, RssError> {
        let mut buf = String::new();
        let mut saw_text = false;

        loop {
            let event = self.read()?;
            match event {
                Event::Text(t) => {
                    let raw = String::from_utf8_lossy(&t);
                    match unescape(&raw) {
                        Ok(v) => buf.push_str(&v),
                        Err(_) => buf.push_str(&raw),
                    }
                    saw_text = true;
                }
                Event::CData(c) => {
                    buf.push_str(&String::from_utf8_lossy(&c));
                    saw_text = true;
                }
                Event::GeneralRef(r) => {
                    let entity = String::from_utf8_lossy(&r);
                    push_reference(&mut buf, &entity);
                    saw_text = true;
                }
                Event::Start(e) => {
                    if saw_text {
                        self.pending = Some(Event::Start(e));
                        if let Some(kind) = self.flush_text(std::mem::take(&mut buf)) {
                            return Ok(kind);
                        }
                        saw_text = false;
                        continue;
                    }
                    self.capture_attributes(&e);
                    return Ok(self.set_tag(EventKind::StartTag, e.name().as_ref()));
                }
                Event::End(e) => {
                    if saw_text {
                        self.pending = Some(Event::End(e));
                        if let Some(kind) = self.flush_text(std::mem::take(&mut buf)) {
                            return Ok(kind);
                        }
                        saw_text = false;
                        continue;
                    }
                    self.attributes.clear();
                    return Ok(self.set_tag(EventKind::EndTag, e.name().as_ref()));
                }
                Event::Empty(e) => {
                    // Only reachable if empty-element expansion is off.
                    let end = e.to_end().into_owned();
                    self.pending = Some(Event::End(end));
                    self.capture_attributes(&e);
                    return Ok(self.set_tag(EventKind::StartTag, e.name().as_ref()));
                }
                Event::Eof => {
                    if saw_text {
                        self.pending = Some(Event::Eof);
                        if let Some(kind) = self.flush_text(std::mem::take(&mut buf)) {
                            return Ok(kind);
                        }
                        saw_text = false;
                        continue;
                    }
                    self.attributes.clear();
                    self.name.clear();
                    self.text.clear();
                    self.kind = EventKind::EndDocument;
                    return Ok(EventKind::EndDocument);
                }
                // Comments, processing instructions, declarations and doctypes.
                _ => {}
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Appends the replacement for `&entity;`. Unknown entities are kept verbatim.
fn push_reference(buf: &mut String, entity: &str) {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse::<u32>().ok(),
        };
        if let Some(ch) = code.and_then(char::from_u32) {
            buf.push(ch);
            return;
        }
    } else if let Some(resolved) = resolve_predefined_entity(entity) {
        buf.push_str(resolved);
        return;
    }
    buf.push('&');
    buf.push_str(entity);
    buf.push(';');
}
