use std::fmt;
use std::sync::Arc;
use ns_core::{NewsProvider, NewsQuery, DEFAULT_PAGE_SIZE};
use ns_inference::SentimentAggregator;

pub struct AppState {
    pub aggregator: SentimentAggregator,
    /// `None` when no NewsAPI key was configured.
    pub news: Option<Arc<dyn NewsProvider>>,
    pub page_size: u32,
}

impl AppState {
    pub fn new(aggregator: SentimentAggregator, news: Option<Arc<dyn NewsProvider>>) -> Self {
        Self {
            aggregator,
            news,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn query(&self, ticker: &str, company: Option<String>) -> NewsQuery {
        NewsQuery::new(ticker)
            .with_company(company)
            .with_page_size(self.page_size)
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("aggregator", &self.aggregator)
            .field("news", &self.news.as_ref().map(|n| n.name()))
            .field("page_size", &self.page_size)
            .finish()
    }
}
