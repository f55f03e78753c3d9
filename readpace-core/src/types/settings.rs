//! Chunking settings

use serde::{Deserialize, Serialize};

/// Reading pace used to size reading units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChunkSettings {
    /// Desired length of one reading session, in minutes
    pub target_minutes: f64,

    /// Reading speed in words per minute
    pub words_per_minute: u32,
}

impl ChunkSettings {
    pub fn new(target_minutes: f64, words_per_minute: u32) -> Self {
        Self {
            target_minutes,
            words_per_minute,
        }
    }

    /// Word budget for one reading unit: `floor(target_minutes * words_per_minute)`.
    ///
    /// Negative or NaN products saturate to zero.
    pub fn target_words(&self) -> usize {
        (self.target_minutes * f64::from(self.words_per_minute)).floor() as usize
    }

    /// Reading time for `words` words at this pace
    pub fn minutes_for(&self, words: usize) -> f64 {
        if self.words_per_minute == 0 {
            return 0.0;
        }
        words as f64 / f64::from(self.words_per_minute)
    }
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self::new(10.0, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_words_floors() {
        assert_eq!(ChunkSettings::new(1.0, 200).target_words(), 200);
        assert_eq!(ChunkSettings::new(2.5, 150).target_words(), 375);
        assert_eq!(ChunkSettings::new(0.333, 100).target_words(), 33);
    }

    #[test]
    fn test_target_words_saturates() {
        assert_eq!(ChunkSettings::new(-3.0, 200).target_words(), 0);
        assert_eq!(ChunkSettings::new(f64::NAN, 200).target_words(), 0);
    }

    #[test]
    fn test_minutes_for_zero_speed() {
        assert_eq!(ChunkSettings::new(10.0, 0).minutes_for(500), 0.0);
        assert_eq!(ChunkSettings::new(10.0, 200).minutes_for(50), 0.25);
    }
}
