//! EPUB text source

use super::html::html_to_text;
use super::TextSource;
use crate::error::ParseError;
use crate::text::PARAGRAPH_SEPARATOR;
use epub::doc::EpubDoc;
use std::io::{Cursor, Read};

/// Spine items with one of these as an id token are front matter, not reading
const SKIPPED_ITEMS: &[&str] = &["toc", "nav", "cover", "copyright", "style"];

/// Extracts the text of an EPUB 2/3 book in spine (reading) order
pub struct EpubSource {
    skip_front_matter: bool,
}

impl EpubSource {
    pub fn new() -> Self {
        Self {
            skip_front_matter: true,
        }
    }

    /// Keep table of contents, cover and copyright pages
    pub fn with_front_matter(mut self, keep: bool) -> Self {
        self.skip_front_matter = !keep;
        self
    }

    /// Matches whole id tokens, so `nav` skips `nav.xhtml` but not `canvas`
    fn is_skipped(&self, item_id: &str) -> bool {
        self.skip_front_matter
            && item_id
                .to_lowercase()
                .split(['-', '_', '.'])
                .any(|token| SKIPPED_ITEMS.contains(&token))
    }
}

impl Default for EpubSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for EpubSource {
    fn extract_text(&self, reader: &mut dyn Read) -> Result<String, ParseError> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| ParseError::InvalidEpub(e.to_string()))?;

        let mut epub = EpubDoc::from_reader(Cursor::new(data))
            .map_err(|e| ParseError::InvalidEpub(e.to_string()))?;

        let spine: Vec<String> = epub.spine.iter().map(|item| item.idref.clone()).collect();
        let mut parts = Vec::new();

        for item_id in &spine {
            if self.is_skipped(item_id) {
                tracing::debug!(item = %item_id, "skipping front matter");
                continue;
            }

            match epub.get_resource_str(item_id) {
                Some((content, _mime)) => {
                    let text = html_to_text(&content);
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
                None => tracing::warn!(item = %item_id, "spine item could not be read"),
            }
        }

        tracing::debug!(sections = parts.len(), "extracted EPUB text");
        Ok(parts.join(PARAGRAPH_SEPARATOR))
    }

    fn format_name(&self) -> &str {
        "EPUB"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["epub"]
    }
}
