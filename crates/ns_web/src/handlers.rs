use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use ns_core::{logging::Logger, AggregationResult, RawArticle};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::{error::ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct SentimentParams {
    pub ticker: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SentimentResponse {
    pub ticker: String,
    pub company: String,
    #[serde(flatten)]
    pub result: AggregationResult,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub async fn sentiment(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SentimentParams>,
) -> Result<Json<SentimentResponse>, ApiError> {
    let ticker = params
        .ticker
        .filter(|t| !t.trim().is_empty())
        .ok_or(ApiError::MissingTicker)?;
    let news = state.news.as_ref().ok_or(ApiError::NewsNotConfigured)?;

    let query = state.query(&ticker, params.company);
    let logger = Logger::new().with_prefix("📊").with_prefix(query.ticker.clone());

    let articles = news.fetch_articles(&query).await.map_err(|e| {
        logger.warn(&format!("{} fetch failed: {}", news.name(), e));
        ApiError::from(e)
    })?;
    logger.info(&format!("📰 {} articles from {}", articles.len(), news.name()));

    let result = state.aggregator.aggregate(&articles)?;
    logger.info(&format!(
        "signal {} with confidence {}",
        result.summary.label, result.summary.confidence
    ));

    Ok(Json(SentimentResponse {
        company: query.display_name().to_string(),
        ticker: query.ticker,
        result,
    }))
}

pub async fn aggregate(
    State(state): State<Arc<AppState>>,
    Json(articles): Json<Vec<RawArticle>>,
) -> Result<Json<AggregationResult>, ApiError> {
    state
        .aggregator
        .aggregate(&articles)
        .map(Json)
        .map_err(|e| {
            if e.is_bad_input() {
                ApiError::InvalidArticles(e.to_string())
            } else {
                ApiError::from(e)
            }
        })
}
