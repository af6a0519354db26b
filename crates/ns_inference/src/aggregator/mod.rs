//! Turns a batch of raw articles into scored articles, a directional signal
//! with a confidence, a label breakdown and a cumulative sentiment series.

use std::fmt;
use std::sync::Arc;
use ns_core::{
    AggregateSummary, AggregationResult, Breakdown, Error, RawArticle, Result, ScoredArticle,
    SentimentLabel, Signal, TextScorer, TimeseriesPoint,
};
use tracing::debug;

/// Weight of the average compound magnitude in the confidence score.
const MAGNITUDE_WEIGHT: f64 = 0.7;
/// Weight of the positive/negative distribution skew in the confidence score.
const SKEW_WEIGHT: f64 = 0.3;

/// Text handed to the scorer: title and description joined by ". ".
pub fn article_text(article: &RawArticle) -> String {
    [
        article.title.as_deref().unwrap_or(""),
        article.description.as_deref().unwrap_or(""),
    ]
    .join(". ")
}

/// Scores a single article. `index` is its position in the batch and only
/// used for error reporting.
pub fn score_article(
    index: usize,
    article: &RawArticle,
    scorer: &dyn TextScorer,
) -> Result<ScoredArticle> {
    let polarity = scorer
        .polarity(&article_text(article))
        .map_err(|e| Error::Scorer {
            index,
            message: e.to_string(),
        })?;

    let compound = polarity.compound;
    if !compound.is_finite() || !(-1.0..=1.0).contains(&compound) {
        return Err(Error::ScoreOutOfRange {
            index,
            value: compound,
        });
    }

    Ok(ScoredArticle {
        article: article.clone(),
        sentiment_score: compound,
        sentiment_label: SentimentLabel::from_compound(compound),
    })
}

/// Integer confidence in `[0, 100]` rewarding both a strong average and a
/// lopsided positive/negative split.
pub fn to_confidence(avg_compound: f64, pos_pct: f64, neg_pct: f64) -> u8 {
    let mag = avg_compound.abs().min(1.0);
    let skew = (pos_pct - neg_pct).abs();
    let raw = (MAGNITUDE_WEIGHT * mag + SKEW_WEIGHT * skew) * 100.0;
    raw.round().clamp(0.0, 100.0) as u8
}

pub fn breakdown(articles: &[ScoredArticle]) -> Breakdown {
    let positive = articles
        .iter()
        .filter(|a| a.sentiment_label == SentimentLabel::Positive)
        .count();
    let negative = articles
        .iter()
        .filter(|a| a.sentiment_label == SentimentLabel::Negative)
        .count();
    Breakdown {
        positive,
        neutral: articles.len() - positive - negative,
        negative,
    }
}

/// Cumulative running mean of scores in publish order. Works on a sorted copy;
/// the sort is stable so equal timestamps keep batch order.
pub fn rolling_average(articles: &[ScoredArticle]) -> Result<Vec<TimeseriesPoint>> {
    let mut points = articles
        .iter()
        .enumerate()
        .map(|(index, a)| {
            a.article
                .published_at
                .map(|t| (t, a.sentiment_score))
                .ok_or_else(|| missing_timestamp(index))
        })
        .collect::<Result<Vec<_>>>()?;
    points.sort_by_key(|(t, _)| *t);

    let mut sum = 0.0;
    Ok(points
        .into_iter()
        .enumerate()
        .map(|(i, (t, score))| {
            sum += score;
            TimeseriesPoint {
                t,
                value: sum / (i + 1) as f64,
            }
        })
        .collect())
}

fn missing_timestamp(index: usize) -> Error {
    Error::MalformedArticle {
        index,
        reason: "missing publishedAt timestamp".to_string(),
    }
}

/// Runs the whole pipeline over one batch. An empty batch is a successful
/// neutral result; a missing timestamp or a failing scorer fails the call.
pub fn aggregate(articles: &[RawArticle], scorer: &dyn TextScorer) -> Result<AggregationResult> {
    if articles.is_empty() {
        return Ok(AggregationResult::empty());
    }

    if let Some(index) = articles.iter().position(|a| a.published_at.is_none()) {
        return Err(missing_timestamp(index));
    }

    let scored = articles
        .iter()
        .enumerate()
        .map(|(i, a)| score_article(i, a, scorer))
        .collect::<Result<Vec<_>>>()?;

    let total = scored.len() as f64;
    let breakdown = breakdown(&scored);
    let avg_compound = scored.iter().map(|a| a.sentiment_score).sum::<f64>() / total;
    let label = Signal::from_aggregate(avg_compound, breakdown.positive, breakdown.negative);
    let confidence = to_confidence(
        avg_compound,
        breakdown.positive as f64 / total,
        breakdown.negative as f64 / total,
    );
    let timeseries = rolling_average(&scored)?;

    Ok(AggregationResult {
        summary: AggregateSummary {
            label,
            confidence,
            avg_compound,
        },
        breakdown,
        timeseries,
        articles: scored,
    })
}

/// Holds the injected scorer so transports can share one instance.
#[derive(Clone)]
pub struct SentimentAggregator {
    scorer: Arc<dyn TextScorer>,
}

impl fmt::Debug for SentimentAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentAggregator")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl SentimentAggregator {
    pub fn new(scorer: Arc<dyn TextScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &dyn TextScorer {
        self.scorer.as_ref()
    }

    pub fn aggregate(&self, articles: &[RawArticle]) -> Result<AggregationResult> {
        debug!("🧮 Aggregating {} articles with {}", articles.len(), self.scorer.name());
        let result = aggregate(articles, self.scorer.as_ref())?;
        debug!(
            "📈 Signal {} (confidence {}, avg {:.3})",
            result.summary.label, result.summary.confidence, result.summary.avg_compound
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_core::Polarity;

    #[derive(Debug)]
    struct Fixed(f64);

    impl TextScorer for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn polarity(&self, _text: &str) -> Result<Polarity> {
            Ok(Polarity { compound: self.0 })
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl TextScorer for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn polarity(&self, _text: &str) -> Result<Polarity> {
            Err(Error::External(anyhow::anyhow!("model offline")))
        }
    }

    fn article(title: Option<&str>, description: Option<&str>) -> RawArticle {
        RawArticle {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            published_at: "2024-01-01T00:00:00Z".parse().ok(),
            ..Default::default()
        }
    }

    #[test]
    fn test_article_text() {
        assert_eq!(article_text(&article(Some("T"), Some("D"))), "T. D");
        assert_eq!(article_text(&article(Some("T"), None)), "T. ");
        assert_eq!(article_text(&article(None, Some("D"))), ". D");
        assert_eq!(article_text(&article(None, None)), ". ");
    }

    #[test]
    fn test_score_article_labels() {
        let a = article(Some("x"), None);
        assert_eq!(score_article(0, &a, &Fixed(0.05)).unwrap().sentiment_label, SentimentLabel::Positive);
        assert_eq!(score_article(0, &a, &Fixed(-0.05)).unwrap().sentiment_label, SentimentLabel::Negative);
        assert_eq!(score_article(0, &a, &Fixed(0.049)).unwrap().sentiment_label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_score_article_rejects_out_of_range() {
        let a = article(Some("x"), None);
        assert!(matches!(
            score_article(3, &a, &Fixed(1.5)),
            Err(Error::ScoreOutOfRange { index: 3, .. })
        ));
        assert!(matches!(
            score_article(0, &a, &Fixed(f64::NAN)),
            Err(Error::ScoreOutOfRange { .. })
        ));
        assert!(score_article(0, &a, &Fixed(-1.0)).is_ok());
    }

    #[test]
    fn test_scorer_failure_is_wrapped() {
        let err = aggregate(&[article(Some("x"), None)], &Failing).unwrap_err();
        match err {
            Error::Scorer { index, message } => {
                assert_eq!(index, 0);
                assert!(message.contains("model offline"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_to_confidence() {
        assert_eq!(to_confidence(0.7, 1.0, 0.0), 79);
        assert_eq!(to_confidence(0.0, 0.5, 0.5), 0);
        assert_eq!(to_confidence(-1.0, 0.0, 1.0), 100);
        // Magnitude is capped at 1.
        assert_eq!(to_confidence(3.0, 0.0, 0.0), 70);
    }

    #[test]
    fn test_missing_timestamp_fails_fast() {
        let mut bad = article(Some("x"), None);
        bad.published_at = None;
        let err = aggregate(&[article(Some("y"), None), bad], &Fixed(0.2)).unwrap_err();
        assert!(matches!(err, Error::MalformedArticle { index: 1, .. }));
        assert!(err.is_bad_input());
    }

    #[test]
    fn test_aggregator_wrapper() {
        let aggregator = SentimentAggregator::new(Arc::new(Fixed(-0.4)));
        let result = aggregator.aggregate(&[article(Some("x"), None)]).unwrap();
        assert_eq!(result.summary.label, Signal::Sell);
        assert_eq!(result.summary.confidence, 58);
        assert_eq!(aggregator.scorer().name(), "fixed");
    }
}
