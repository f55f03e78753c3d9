//! Markdown text source

use super::TextSource;
use crate::error::ParseError;
use crate::text::clean_whitespace;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::io::Read;

/// Reads Markdown, keeping headings, paragraphs and emphasis markers
#[derive(Debug, Default)]
pub struct MarkdownSource;

impl MarkdownSource {
    pub fn new() -> Self {
        Self
    }

    fn to_text(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);

        let mut out = String::new();
        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::Heading { .. }) => out.push_str("\n\n## "),
                Event::End(TagEnd::Heading(_)) => out.push_str("\n\n"),
                Event::Start(Tag::Paragraph)
                | Event::End(TagEnd::Paragraph)
                | Event::Start(Tag::Item)
                | Event::End(TagEnd::Item)
                | Event::Start(Tag::CodeBlock(_))
                | Event::End(TagEnd::CodeBlock)
                | Event::Rule => out.push_str("\n\n"),
                Event::Start(Tag::Emphasis) | Event::End(TagEnd::Emphasis) => out.push('*'),
                Event::Start(Tag::Strong) | Event::End(TagEnd::Strong) => out.push_str("**"),
                Event::Text(text) | Event::Code(text) => out.push_str(&text),
                Event::SoftBreak | Event::HardBreak => out.push('\n'),
                _ => {}
            }
        }

        clean_whitespace(&out)
    }
}

impl TextSource for MarkdownSource {
    fn extract_text(&self, reader: &mut dyn Read) -> Result<String, ParseError> {
        let mut markdown = String::new();
        reader
            .read_to_string(&mut markdown)
            .map_err(|e| ParseError::InvalidMarkup(e.to_string()))?;
        Ok(self.to_text(&markdown))
    }

    fn format_name(&self) -> &str {
        "Markdown"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkd"]
    }
}
