//! Plain text source

use super::TextSource;
use crate::error::ParseError;
use std::io::Read;

/// Reads text files as UTF-8, falling back to Latin-1 for other encodings
#[derive(Debug, Default)]
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PlainTextSource {
    fn extract_text(&self, reader: &mut dyn Read) -> Result<String, ParseError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        match String::from_utf8(data) {
            Ok(text) => Ok(match text.strip_prefix('\u{feff}') {
                Some(rest) => rest.to_string(),
                None => text,
            }),
            Err(e) => {
                tracing::debug!("input is not UTF-8, decoding as Latin-1");
                // Every byte is a valid Latin-1 code point
                Ok(e.into_bytes().iter().map(|&b| char::from(b)).collect())
            }
        }
    }

    fn format_name(&self) -> &str {
        "text"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }
}
