use std::fmt;
use crate::types::Polarity;
use crate::Result;

/// Maps a piece of text to a bounded compound polarity score.
pub trait TextScorer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Score a text. Implementations should return a compound in `[-1, 1]`;
    /// the aggregator rejects anything else.
    fn polarity(&self, text: &str) -> Result<Polarity>;
}
