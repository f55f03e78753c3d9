//! Paragraph-preserving chunker
//!
//! Splits normalized text into reading units sized to a word budget. Units
//! always end on a paragraph boundary; a paragraph longer than the budget is
//! kept whole as its own unit.

use crate::text::{count_words, paragraphs, PARAGRAPH_SEPARATOR};
use crate::types::{ChunkSequence, ChunkSettings, ReadingUnit};

/// Splits text into daily reading units
#[derive(Debug, Clone, Copy, Default)]
pub struct Chunker {
    settings: ChunkSettings,
}

impl Chunker {
    pub fn new(settings: ChunkSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ChunkSettings {
        &self.settings
    }

    /// Chunk `text` into an ordered sequence of reading units.
    ///
    /// Empty or whitespace-only text yields an empty sequence.
    pub fn chunk(&self, text: &str) -> ChunkSequence {
        if text.trim().is_empty() {
            return ChunkSequence::default();
        }

        let target_words = self.settings.target_words();
        let mut units = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        let mut running = 0usize;

        for paragraph in paragraphs(text) {
            let words = count_words(paragraph);

            if running + words > target_words && !buffer.is_empty() {
                units.push(self.close_unit(units.len(), &buffer));
                buffer.clear();
                running = 0;
            }

            buffer.push(paragraph);
            running += words;
        }

        if !buffer.is_empty() {
            units.push(self.close_unit(units.len(), &buffer));
        }

        tracing::debug!(
            units = units.len(),
            target_words,
            "chunked text into reading units"
        );

        ChunkSequence::from_units(units)
    }

    fn close_unit(&self, index: usize, buffer: &[&str]) -> ReadingUnit {
        let content = buffer.join(PARAGRAPH_SEPARATOR);
        let word_count = count_words(&content);
        let minutes = self.settings.minutes_for(word_count);
        ReadingUnit::new(index, content, word_count, minutes)
    }
}

/// Chunk `text` with the given pace
pub fn chunk(text: &str, target_minutes: f64, words_per_minute: u32) -> ChunkSequence {
    Chunker::new(ChunkSettings::new(target_minutes, words_per_minute)).chunk(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize, word: &str) -> String {
        vec![word; n].join(" ")
    }

    #[test]
    fn test_two_paragraphs_over_budget_split() {
        let text = format!("{}\n\n{}", words(120, "alpha"), words(90, "beta"));
        let seq = chunk(&text, 1.0, 200);

        assert_eq!(seq.len(), 2);
        assert_eq!(seq.units()[0].word_count(), 120);
        assert_eq!(seq.units()[1].word_count(), 90);
        assert!(seq.units()[0].content().starts_with("alpha"));
        assert!(seq.units()[1].content().starts_with("beta"));
        assert_eq!(seq.total_words(), 210);
    }

    #[test]
    fn test_paragraphs_within_budget_share_a_unit() {
        let text = format!("{}\n\n{}", words(100, "a"), words(100, "b"));
        let seq = chunk(&text, 1.0, 200);

        assert_eq!(seq.len(), 1);
        assert_eq!(seq.units()[0].word_count(), 200);
        assert_eq!(
            seq.units()[0].content(),
            format!("{}\n\n{}", words(100, "a"), words(100, "b"))
        );
        assert_eq!(seq.units()[0].estimated_minutes(), 1.0);
    }

    #[test]
    fn test_oversized_paragraph_is_not_split() {
        let text = format!("{}\n\n{}\n\n{}", words(10, "x"), words(500, "y"), words(10, "z"));
        let seq = chunk(&text, 1.0, 100);

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.units()[1].word_count(), 500);
        assert_eq!(seq.units()[1].content(), words(500, "y"));
    }

    #[test]
    fn test_single_oversized_paragraph() {
        let seq = chunk(&words(50, "w"), 0.1, 100);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.units()[0].word_count(), 50);
    }

    #[test]
    fn test_empty_input() {
        for text in ["", "   \n\n  "] {
            let seq = chunk(text, 10.0, 200);
            assert!(seq.is_empty());
            assert_eq!(seq.total_words(), 0);
            assert_eq!(seq.total_minutes(), 0.0);
        }
    }

    #[test]
    fn test_indices_are_contiguous() {
        let text = (0..25)
            .map(|i| words(7 + i % 5, "p"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let seq = chunk(&text, 0.2, 100);

        assert!(seq.len() > 1);
        for (i, unit) in seq.units().iter().enumerate() {
            assert_eq!(unit.index(), i);
            assert!(unit.word_count() <= 20);
        }
    }

    #[test]
    fn test_total_minutes_is_sum_of_units() {
        let text = format!("{}\n\n{}\n\n{}", words(33, "a"), words(41, "b"), words(29, "c"));
        let seq = chunk(&text, 0.25, 180);
        let sum: f64 = seq.units().iter().map(|u| u.estimated_minutes()).sum();
        assert_eq!(seq.total_minutes(), sum);
    }

    #[test]
    fn test_zero_budget_gives_one_unit_per_paragraph() {
        let seq = chunk("a b\n\nc\n\nd e f", 0.0, 200);
        assert_eq!(seq.len(), 3);
    }
}
