use std::fmt;
use ns_core::{Error, Polarity, Result, TextScorer};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Lexicon and rule based scorer tuned for short news and social text.
pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VaderScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaderScorer")
            .field("analyzer", &"<SentimentIntensityAnalyzer>")
            .finish()
    }
}

impl TextScorer for VaderScorer {
    fn name(&self) -> &str {
        "VADER"
    }

    fn polarity(&self, text: &str) -> Result<Polarity> {
        // An article with neither title nor description scores as the bare ". " joiner.
        if text.trim().trim_matches('.').trim().is_empty() {
            return Ok(Polarity { compound: 0.0 });
        }

        let scores = self.analyzer.polarity_scores(text);
        let compound = scores
            .get("compound")
            .copied()
            .ok_or_else(|| Error::External(anyhow::anyhow!("VADER returned no compound score")))?;
        Ok(Polarity { compound })
    }
}
