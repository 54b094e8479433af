// ABOUTME: Data model for parsed RSS 2.0 channels.
// ABOUTME: Every field is optional; repeated elements collapse to None when none were found.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time_parse::parse_rfc822_date;

/// Channel image (`<image>`), described by child elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub link: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub height: Option<i32>,
    pub width: Option<i32>,
}

/// A `<category>`: text content plus optional `domain` attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: Option<String>,
    pub domain: Option<String>,
}

/// `<cloud>` subscription endpoint. All fields come from attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub domain: Option<String>,
    pub port: Option<i32>,
    pub path: Option<String>,
    pub register_procedure: Option<String>,
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub link: Option<String>,
}

/// Item identifier. `is_perma_link` is None when the attribute is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Guid {
    pub value: Option<String>,
    pub is_perma_link: Option<bool>,
}

/// The channel an item was republished from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Represents a media enclosure (audio, video, or image attachment).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: Option<String>,
    pub length: Option<i64>,
    pub mime_type: Option<String>,
}

/// Represents a single `<item>` within a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub title: Option<String>,
    pub enclosure: Option<Enclosure>,
    pub guid: Option<Guid>,
    pub pub_date: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub author: Option<String>,
    pub categories: Option<Vec<Category>>,
    pub comments: Option<String>,
    pub source: Option<Source>,
}

impl Item {
    /// Parses `pub_date` into a UTC timestamp, if present and well formed.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_rfc822_date)
    }
}

/// Represents a parsed `<channel>` with its metadata and items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<Image>,
    pub language: Option<String>,
    pub categories: Option<Vec<Category>>,
    pub link: Option<String>,
    pub copyright: Option<String>,
    pub managing_editor: Option<String>,
    pub web_master: Option<String>,
    pub pub_date: Option<String>,
    pub last_build_date: Option<String>,
    pub generator: Option<String>,
    pub docs: Option<String>,
    pub cloud: Option<Cloud>,
    pub ttl: Option<i32>,
    pub rating: Option<String>,
    pub text_input: Option<TextInput>,
    pub skip_hours: Option<Vec<i32>>,
    pub skip_days: Option<Vec<String>>,
    pub items: Option<Vec<Item>>,
}

impl Channel {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_rfc822_date)
    }

    pub fn last_built_at(&self) -> Option<DateTime<Utc>> {
        self.last_build_date.as_deref().and_then(parse_rfc822_date)
    }

    /// Items in document order; empty when the channel had none.
    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }
}
