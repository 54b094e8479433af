// ABOUTME: Generic readers shared by all element readers: text, attributes, skip, child loop.
// ABOUTME: Structural mismatches are fatal; nested markup inside text only drops the field.

use tracing::{trace, warn};

use crate::cursor::{EventKind, EventSource};
use crate::error::RssError;

/// Fails unless the cursor is on a `kind` event for `tag`.
pub fn require<S: EventSource>(source: &S, kind: EventKind, tag: &str) -> Result<(), RssError> {
    if source.event() == kind && source.name() == tag {
        return Ok(());
    }
    let expected = match kind {
        EventKind::StartTag => format!("start tag <{}>", tag),
        EventKind::EndTag => format!("end tag </{}>", tag),
        _ => tag.to_string(),
    };
    Err(RssError::malformed(expected, source.describe()))
}

/// Reads the text content of `tag`, leaving the cursor on its end tag.
///
/// Returns None for an empty element. If the content is interrupted by
/// child elements, those subtrees are skipped and the text is discarded.
pub fn read_text<S: EventSource>(source: &mut S, tag: &str) -> Result<Option<String>, RssError> {
    require(source, EventKind::StartTag, tag)?;

    let mut content: Option<String> = None;
    let mut interrupted = false;
    loop {
        match source.next()? {
            EventKind::Text => {
                if !interrupted {
                    content.get_or_insert_with(String::new).push_str(source.text());
                }
            }
            EventKind::StartTag => {
                warn!(tag, nested = source.name(), "unexpected tag inside text element, dropping value");
                skip_subtree(source)?;
                interrupted = true;
            }
            EventKind::EndTag => break,
            EventKind::EndDocument => {
                return Err(RssError::malformed(format!("end tag </{}>", tag), source.describe()))
            }
            EventKind::StartDocument => {}
        }
    }

    require(source, EventKind::EndTag, tag)?;
    Ok(if interrupted { None } else { content })
}

/// Hands each declared attribute of `tag` to `visit`, then moves to the end tag.
///
/// Only whitespace may sit between the start and end tag.
pub fn read_attributes<S, F>(
    source: &mut S,
    tag: &str,
    names: &[&str],
    mut visit: F,
) -> Result<(), RssError>
where
    S: EventSource,
    F: FnMut(&str, Option<&str>),
{
    require(source, EventKind::StartTag, tag)?;
    for &name in names {
        visit(name, source.attribute(name));
    }

    loop {
        match source.next()? {
            EventKind::Text if source.text().trim().is_empty() => continue,
            _ => break,
        }
    }
    require(source, EventKind::EndTag, tag)
}

/// Consumes the element the cursor is on, including all descendants.
pub fn skip_subtree<S: EventSource>(source: &mut S) -> Result<(), RssError> {
    if source.event() != EventKind::StartTag {
        return Err(RssError::malformed("start tag", source.describe()));
    }
    let tag = source.name().to_string();

    let mut depth = 1usize;
    while depth != 0 {
        match source.next()? {
            EventKind::StartTag => depth += 1,
            EventKind::EndTag => depth -= 1,
            EventKind::EndDocument => {
                return Err(RssError::malformed(format!("end tag </{}>", tag), source.describe()))
            }
            _ => {}
        }
    }
    trace!(tag = tag.as_str(), "skipped element");
    Ok(())
}

/// Runs `visit` for every child start tag of `tag`, then checks the end tag.
///
/// `visit` receives the child's name and must leave the cursor on the
/// child's end tag.
pub fn for_each_child<S, F>(source: &mut S, tag: &str, mut visit: F) -> Result<(), RssError>
where
    S: EventSource,
    F: FnMut(&mut S, &str) -> Result<(), RssError>,
{
    require(source, EventKind::StartTag, tag)?;
    loop {
        match source.next()? {
            EventKind::StartTag => {
                let child = source.name().to_string();
                visit(source, child.as_str())?;
            }
            EventKind::EndTag => break,
            EventKind::EndDocument => {
                return Err(RssError::malformed(format!("end tag </{}>", tag), source.describe()))
            }
            _ => {}
        }
    }
    require(source, EventKind::EndTag, tag)
}

/// None for an empty collection.
pub fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
