// ABOUTME: One reader per RSS 2.0 element kind, from <channel> down to <enclosure>.
// ABOUTME: Each reader dispatches children by tag name and skips anything it does not know.

use tracing::debug;

use super::primitives::{for_each_child, non_empty, read_attributes, read_text, skip_subtree};
use crate::coerce::{parse_int, parse_long, parse_strict_bool};
use crate::cursor::EventSource;
use crate::error::RssError;
use crate::models::{Category, Channel, Cloud, Enclosure, Guid, Image, Item, Source, TextInput};

pub fn read_channel<S: EventSource>(source: &mut S) -> Result<Channel, RssError> {
    let mut channel = Channel::default();
    let mut categories = Vec::new();
    let mut items = Vec::new();

    for_each_child(source, "channel", |source, child| {
        match child {
            "title" => channel.title = read_text(source, child)?,
            "description" => channel.description = read_text(source, child)?,
            "link" => channel.link = read_text(source, child)?,
            "image" => channel.image = Some(read_image(source)?),
            "language" => channel.language = read_text(source, child)?,
            "category" => categories.push(read_category(source)?),
            "copyright" => channel.copyright = read_text(source, child)?,
            "managingEditor" => channel.managing_editor = read_text(source, child)?,
            "webMaster" => channel.web_master = read_text(source, child)?,
            "pubDate" => channel.pub_date = read_text(source, child)?,
            "lastBuildDate" => channel.last_build_date = read_text(source, child)?,
            "generator" => channel.generator = read_text(source, child)?,
            "docs" => channel.docs = read_text(source, child)?,
            "cloud" => channel.cloud = Some(read_cloud(source)?),
            "ttl" => channel.ttl = read_text(source, child)?.as_deref().and_then(parse_int),
            "rating" => channel.rating = read_text(source, child)?,
            "textInput" => channel.text_input = Some(read_text_input(source)?),
            "skipHours" => channel.skip_hours = read_skip_hours(source)?,
            "skipDays" => channel.skip_days = read_skip_days(source)?,
            "item" => items.push(read_item(source)?),
            _ => skip_subtree(source)?,
        }
        Ok(())
    })?;

    channel.categories = non_empty(categories);
    channel.items = non_empty(items);
    debug!(
        title = channel.title.as_deref().unwrap_or_default(),
        items = channel.items().len(),
        "read channel"
    );
    Ok(channel)
}

pub fn read_item<S: EventSource>(source: &mut S) -> Result<Item, RssError> {
    let mut item = Item::default();
    let mut categories = Vec::new();

    for_each_child(source, "item", |source, child| {
        match child {
            "title" => item.title = read_text(source, child)?,
            "enclosure" => item.enclosure = Some(read_enclosure(source)?),
            "guid" => item.guid = Some(read_guid(source)?),
            "pubDate" => item.pub_date = read_text(source, child)?,
            "description" => item.description = read_text(source, child)?,
            "link" => item.link = read_text(source, child)?,
            "author" => item.author = read_text(source, child)?,
            "category" => categories.push(read_category(source)?),
            "comments" => item.comments = read_text(source, child)?,
            "source" => item.source = Some(read_source(source)?),
            _ => skip_subtree(source)?,
        }
        Ok(())
    })?;

    item.categories = non_empty(categories);
    debug!(title = item.title.as_deref().unwrap_or_default(), "read item");
    Ok(item)
}

pub fn read_image<S: EventSource>(source: &mut S) -> Result<Image, RssError> {
    let mut image = Image::default();

    for_each_child(source, "image", |source, child| {
        match child {
            "link" => image.link = read_text(source, child)?,
            "title" => image.title = read_text(source, child)?,
            "url" => image.url = read_text(source, child)?,
            "description" => image.description = read_text(source, child)?,
            "height" => image.height = read_text(source, child)?.as_deref().and_then(parse_int),
            "width" => image.width = read_text(source, child)?.as_deref().and_then(parse_int),
            _ => skip_subtree(source)?,
        }
        Ok(())
    })?;

    debug!(?image, "read image");
    Ok(image)
}

pub fn read_text_input<S: EventSource>(source: &mut S) -> Result<TextInput, RssError> {
    let mut input = TextInput::default();

    for_each_child(source, "textInput", |source, child| {
        match child {
            "title" => input.title = read_text(source, child)?,
            "description" => input.description = read_text(source, child)?,
            "name" => input.name = read_text(source, child)?,
            "link" => input.link = read_text(source, child)?,
            _ => skip_subtree(source)?,
        }
        Ok(())
    })?;

    debug!(?input, "read textInput");
    Ok(input)
}

/// Hours that fail to parse are dropped; None when no hour survived.
pub fn read_skip_hours<S: EventSource>(source: &mut S) -> Result<Option<Vec<i32>>, RssError> {
    let mut hours = Vec::new();

    for_each_child(source, "skipHours", |source, child| {
        match child {
            "hour" => hours.extend(read_text(source, child)?.as_deref().and_then(parse_int)),
            _ => skip_subtree(source)?,
        }
        Ok(())
    })?;

    debug!(?hours, "read skipHours");
    Ok(non_empty(hours))
}

pub fn read_skip_days<S: EventSource>(source: &mut S) -> Result<Option<Vec<String>>, RssError> {
    let mut days = Vec::new();

    for_each_child(source, "skipDays", |source, child| {
        match child {
            "day" => days.extend(read_text(source, child)?),
            _ => skip_subtree(source)?,
        }
        Ok(())
    })?;

    debug!(?days, "read skipDays");
    Ok(non_empty(days))
}

pub fn read_category<S: EventSource>(source: &mut S) -> Result<Category, RssError> {
    let domain = source.attribute("domain").map(str::to_string);
    let name = read_text(source, "category")?;
    Ok(Category { name, domain })
}

pub fn read_guid<S: EventSource>(source: &mut S) -> Result<Guid, RssError> {
    let is_perma_link = source.attribute("isPermaLink").map(parse_strict_bool);
    let value = read_text(source, "guid")?;
    Ok(Guid {
        value,
        is_perma_link,
    })
}

pub fn read_source<S: EventSource>(source: &mut S) -> Result<Source, RssError> {
    let url = source.attribute("url").map(str::to_string);
    let title = read_text(source, "source")?;
    Ok(Source { title, url })
}

pub fn read_enclosure<S: EventSource>(source: &mut S) -> Result<Enclosure, RssError> {
    let mut enclosure = Enclosure::default();
    read_attributes(source, "enclosure", &["url", "length", "type"], |attr, value| {
        match attr {
            "url" => enclosure.url = value.map(str::to_string),
            "length" => enclosure.length = value.and_then(parse_long),
            "type" => enclosure.mime_type = value.map(str::to_string),
            _ => {}
        }
    })?;
    Ok(enclosure)
}

pub fn read_cloud<S: EventSource>(source: &mut S) -> Result<Cloud, RssError> {
    let mut cloud = Cloud::default();
    read_attributes(
        source,
        "cloud",
        &["domain", "port", "path", "registerProcedure", "protocol"],
        |attr, value| match attr {
            "domain" => cloud.domain = value.map(str::to_string),
            "port" => cloud.port = value.and_then(parse_int),
            "path" => cloud.path = value.map(str::to_string),
            "registerProcedure" => cloud.register_procedure = value.map(str::to_string),
            "protocol" => cloud.protocol = value.map(str::to_string),
            _ => {}
        },
    )?;
    debug!(?cloud, "read cloud");
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::super::primitives::script::Script;
    use super::*;
    use crate::cursor::EventKind;

    #[test]
    fn test_read_guid_permalink_strict() {
        let mut src = Script::new()
            .start_with("guid", &[("isPermaLink", "yes")])
            .text("abc")
            .end("guid")
            .begin();
        let guid = read_guid(&mut src).unwrap();
        assert_eq!(guid.value.as_deref(), Some("abc"));
        assert_eq!(guid.is_perma_link, Some(false));
    }

    #[test]
    fn test_read_category_attribute_and_text() {
        let mut src = Script::new()
            .start_with("category", &[("domain", "http://www.fool.com/cusips")])
            .text("MSFT")
            .end("category")
            .begin();
        let category = read_category(&mut src).unwrap();
        assert_eq!(
            category,
            Category {
                name: Some("MSFT".to_string()),
                domain: Some("http://www.fool.com/cusips".to_string()),
            }
        );
        assert_eq!(src.event(), EventKind::EndTag);
    }

    #[test]
    fn test_read_skip_hours_drops_bad_values() {
        let mut src = Script::new()
            .start("skipHours")
            .start("hour")
            .text("0")
            .end("hour")
            .start("hour")
            .text("noon")
            .end("hour")
            .start("hour")
            .text("23")
            .end("hour")
            .end("skipHours")
            .begin();
        assert_eq!(read_skip_hours(&mut src).unwrap(), Some(vec![0, 23]));
    }

    #[test]
    fn test_read_skip_days_empty_is_none() {
        let mut src = Script::new()
            .start("skipDays")
            .start("day")
            .end("day")
            .end("skipDays")
            .begin();
        assert_eq!(read_skip_days(&mut src).unwrap(), None);
    }

    #[test]
    fn test_read_cloud_attributes() {
        let mut src = Script::new()
            .start_with(
                "cloud",
                &[
                    ("domain", "rpc.sys.com"),
                    ("port", "80"),
                    ("path", "/RPC2"),
                    ("registerProcedure", "pingMe"),
                    ("protocol", "soap"),
                ],
            )
            .end("cloud")
            .begin();
        let cloud = read_cloud(&mut src).unwrap();
        assert_eq!(
            cloud,
            Cloud {
                domain: Some("rpc.sys.com".to_string()),
                port: Some(80),
                path: Some("/RPC2".to_string()),
                register_procedure: Some("pingMe".to_string()),
                protocol: Some("soap".to_string()),
            }
        );
    }

    #[test]
    fn test_read_image_skips_unknown_children() {
        let mut src = Script::new()
            .start("image")
            .start("url")
            .text("http://x/logo.png")
            .end("url")
            .start("extra")
            .start("nested")
            .end("nested")
            .end("extra")
            .start("width")
            .text("wide")
            .end("width")
            .start("height")
            .text("32")
            .end("height")
            .end("image")
            .begin();
        let image = read_image(&mut src).unwrap();
        assert_eq!(image.url.as_deref(), Some("http://x/logo.png"));
        assert_eq!(image.width, None);
        assert_eq!(image.height, Some(32));
    }

    #[test]
    fn test_read_item_wrong_entry_tag() {
        let mut src = Script::new().start("entry").end("entry").begin();
        let err = read_item(&mut src).unwrap_err();
        assert!(err.is_malformed());
    }
}
