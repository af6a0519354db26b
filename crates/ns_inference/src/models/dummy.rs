use std::fmt;
use ns_core::{Polarity, Result, TextScorer};

const BULLISH: &[&str] = &[
    "beat", "beats", "gain", "gains", "growth", "profit", "rally", "rallies", "record",
    "soar", "soars", "strong", "surge", "surges", "upgrade", "win",
];

const BEARISH: &[&str] = &[
    "crash", "crashes", "cut", "decline", "downgrade", "fall", "falls", "fraud", "lawsuit",
    "loss", "losses", "miss", "misses", "plunge", "plunges", "weak",
];

/// Normalisation constant, same as VADER's.
const ALPHA: f64 = 15.0;

/// Offline scorer that counts a handful of market keywords. Deterministic and
/// free of any lexicon data, handy for tests and for running without VADER.
#[derive(Default)]
pub struct DummyScorer;

impl fmt::Debug for DummyScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyScorer").finish()
    }
}

impl DummyScorer {
    pub fn new() -> Self {
        Self
    }
}

impl TextScorer for DummyScorer {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn polarity(&self, text: &str) -> Result<Polarity> {
        let raw: f64 = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| {
                let w = w.to_lowercase();
                if BULLISH.contains(&w.as_str()) {
                    1.0
                } else if BEARISH.contains(&w.as_str()) {
                    -1.0
                } else {
                    0.0
                }
            })
            .sum();

        let compound = raw / (raw * raw + ALPHA).sqrt();
        Ok(Polarity { compound })
    }
}
