use ns_core::Result;

pub mod aggregator;
pub mod models;

pub const DEFAULT_MODEL: &str = "vader";

#[derive(Debug, Clone)]
pub struct Config {
    pub model_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_name: Some(DEFAULT_MODEL.to_string()),
        }
    }
}

impl Config {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: Some(model_name.into()),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::aggregator::{aggregate, score_article, SentimentAggregator};
    pub use super::models::create_scorer;
    pub use ns_core::{AggregationResult, Error, RawArticle, Result, TextScorer};
}

pub use aggregator::{aggregate, score_article, SentimentAggregator};
pub use models::create_scorer;

/// Builds a scorer and wraps it in an aggregator in one go.
pub fn create_aggregator(config: Option<Config>) -> Result<SentimentAggregator> {
    Ok(SentimentAggregator::new(create_scorer(config)?))
}
