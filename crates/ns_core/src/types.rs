use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compound score at or above which a text counts as positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which a text counts as negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// An article as handed over by a news provider. Nothing here is validated;
/// missing fields are tolerated until the aggregator needs them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// The trading recommendation derived from a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Signal {
    /// Threshold on the average first; when the average sits in the neutral
    /// band (or disagrees with the counts) the label counts break the tie.
    pub fn from_aggregate(avg_compound: f64, positive: usize, negative: usize) -> Self {
        if avg_compound >= POSITIVE_THRESHOLD && positive >= negative {
            return Signal::Buy;
        }
        if avg_compound <= NEGATIVE_THRESHOLD && negative >= positive {
            return Signal::Sell;
        }
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Signal::Buy,
            std::cmp::Ordering::Less => Signal::Sell,
            std::cmp::Ordering::Equal => Signal::Neutral,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "buy"),
            Signal::Sell => write!(f, "sell"),
            Signal::Neutral => write!(f, "neutral"),
        }
    }
}

/// Output of a [`crate::TextScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polarity {
    pub compound: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: RawArticle,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl Breakdown {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSummary {
    pub label: Signal,
    pub confidence: u8,
    pub avg_compound: f64,
}

impl AggregateSummary {
    pub fn neutral() -> Self {
        Self {
            label: Signal::Neutral,
            confidence: 0,
            avg_compound: 0.0,
        }
    }
}

/// Cumulative average of all scores published up to and including `t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesPoint {
    pub t: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub summary: AggregateSummary,
    pub breakdown: Breakdown,
    pub timeseries: Vec<TimeseriesPoint>,
    pub articles: Vec<ScoredArticle>,
}

impl AggregationResult {
    /// The successful result for a batch with no articles.
    pub fn empty() -> Self {
        Self {
            summary: AggregateSummary::neutral(),
            breakdown: Breakdown::default(),
            timeseries: Vec::new(),
            articles: Vec::new(),
        }
    }
}
