pub mod error;
pub mod logging;
pub mod models;
pub mod news;
pub mod types;

pub use error::{Error, Result};
pub use models::TextScorer;
pub use news::{NewsProvider, NewsQuery, DEFAULT_LANGUAGE, DEFAULT_PAGE_SIZE};
pub use types::*;
