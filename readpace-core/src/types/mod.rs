//! Core types shared by the chunker, the progress tracker and persistence

mod progress;
mod settings;
mod unit;

pub use progress::{BookProgress, ProgressState};
pub use settings::ChunkSettings;
pub use unit::{ChunkSequence, ReadingUnit};
