use async_trait::async_trait;
use std::fmt;
use crate::types::RawArticle;
use crate::Result;

pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    pub ticker: String,
    /// Caller supplied company name used to widen the search.
    pub company: Option<String>,
    pub page_size: u32,
    pub language: String,
}

impl NewsQuery {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into().trim().to_uppercase(),
            company: None,
            page_size: DEFAULT_PAGE_SIZE,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_company(mut self, company: Option<String>) -> Self {
        self.company = company
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Full text search expression for the provider.
    pub fn search_terms(&self) -> String {
        match &self.company {
            Some(company) => format!("\"{}\" OR {}", company, self.ticker),
            None => self.ticker.clone(),
        }
    }

    /// Name shown next to the ticker in responses.
    pub fn display_name(&self) -> &str {
        self.company.as_deref().unwrap_or(&self.ticker)
    }
}

#[async_trait]
pub trait NewsProvider: Send + Sync + fmt::Debug {
    /// Returns the name of the news provider
    fn name(&self) -> &str;

    /// Fetches recent articles matching the query, in provider order
    async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<RawArticle>>;
}
