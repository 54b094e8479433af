// ABOUTME: Configuration options for RssParser and the ParserBuilder fluent API.
// ABOUTME: Options cover charset override and text trimming; they carry no per-parse state.

use crate::parser::RssParser;

/// Configuration options for the RSS parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Encoding label (e.g. "ISO-8859-1") that overrides detection.
    pub charset: Option<String>,
    /// Trim leading and trailing whitespace from text content.
    pub trim_text: bool,
}

/// Builder for constructing RssParser instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    opts: ParserOptions,
}

impl ParserBuilder {
    /// Create a new ParserBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode input bytes with this charset instead of the declared one.
    pub fn charset(mut self, label: impl Into<String>) -> Self {
        self.opts.charset = Some(label.into());
        self
    }

    pub fn trim_text(mut self, trim: bool) -> Self {
        self.opts.trim_text = trim;
        self
    }

    /// Build the RssParser with the configured options.
    pub fn build(self) -> RssParser {
        RssParser::new(self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_options() {
        let parser = ParserBuilder::new().charset("latin1").trim_text(true).build();
        assert_eq!(
            parser.options(),
            &ParserOptions {
                charset: Some("latin1".to_string()),
                trim_text: true,
            }
        );
    }

    #[test]
    fn test_defaults() {
        let opts = ParserOptions::default();
        assert!(opts.charset.is_none());
        assert!(!opts.trim_text);
    }
}
