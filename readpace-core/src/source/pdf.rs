//! PDF text source

use super::TextSource;
use crate::error::ParseError;
use std::io::Read;

/// Extracts the text layer of a PDF
///
/// Scanned pages without a text layer yield no text.
#[derive(Debug, Default)]
pub struct PdfSource;

impl PdfSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PdfSource {
    fn extract_text(&self, reader: &mut dyn Read) -> Result<String, ParseError> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| ParseError::InvalidPdf(e.to_string()))?;

        pdf_extract::extract_text_from_mem(&data).map_err(|e| ParseError::InvalidPdf(e.to_string()))
    }

    fn format_name(&self) -> &str {
        "PDF"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }
}
