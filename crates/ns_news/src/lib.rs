pub mod newsapi;

pub use newsapi::{NewsApiClient, NewsApiConfig};

pub mod prelude {
    pub use super::newsapi::{NewsApiClient, NewsApiConfig};
    pub use ns_core::{NewsProvider, NewsQuery, RawArticle, Result, Error};
}
