//! Text sources: turn a document into raw text for the chunker
//!
//! Sources mark paragraph breaks with a blank line and headings with a
//! leading `## `. They do not normalize; callers run [`crate::text::normalize`].

mod epub;
mod html;
mod markdown;
mod pdf;
mod plain;

pub use self::epub::EpubSource;
pub use self::html::{html_to_text, HtmlSource};
pub use self::markdown::MarkdownSource;
pub use self::pdf::PdfSource;
pub use self::plain::PlainTextSource;

use crate::error::ParseError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Trait for extracting readable text from a document format
pub trait TextSource: Send + Sync {
    /// Extract text from a reader
    fn extract_text(&self, reader: &mut dyn Read) -> Result<String, ParseError>;

    /// Short format name for messages
    fn format_name(&self) -> &str;

    /// File extensions this source supports
    fn supported_extensions(&self) -> &[&str];
}

/// Get the text source for a file extension
pub fn source_for_extension(ext: &str) -> Option<Box<dyn TextSource>> {
    match ext.to_lowercase().as_str() {
        "txt" | "text" => Some(Box::new(PlainTextSource::new())),
        "epub" => Some(Box::new(EpubSource::new())),
        "html" | "htm" | "xhtml" => Some(Box::new(HtmlSource::new())),
        "md" | "markdown" | "mdown" | "mkd" => Some(Box::new(MarkdownSource::new())),
        "pdf" => Some(Box::new(PdfSource::new())),
        _ => None,
    }
}

/// Get the text source for a path; anything unrecognized is read as plain text
pub fn source_for_path(path: &Path) -> Box<dyn TextSource> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(source_for_extension)
        .unwrap_or_else(|| Box::new(PlainTextSource::new()))
}

/// True when the extension names a format with a dedicated source
pub fn is_supported_extension(ext: &str) -> bool {
    source_for_extension(ext).is_some()
}

/// Open `path` and extract its text with the matching source
pub fn extract_text(path: &Path) -> Result<String, ParseError> {
    let source = source_for_path(path);
    tracing::debug!(path = %path.display(), format = source.format_name(), "extracting text");
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    source.extract_text(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_for_extension() {
        assert_eq!(source_for_extension("EPUB").unwrap().format_name(), "EPUB");
        assert_eq!(source_for_extension("md").unwrap().format_name(), "Markdown");
        assert!(source_for_extension("docx").is_none());
    }

    #[test]
    fn test_unknown_extension_falls_back_to_plain_text() {
        let source = source_for_path(Path::new("notes.rst"));
        assert_eq!(source.format_name(), "text");
        let source = source_for_path(Path::new("README"));
        assert_eq!(source.format_name(), "text");
    }
}
