use std::sync::Arc;
use ns_core::{Error, Result, TextScorer};
use crate::Config;

pub mod dummy;
pub mod vader;

pub use dummy::DummyScorer;
pub use vader::VaderScorer;

/// Picks a scorer by model name, defaulting to VADER.
pub fn create_scorer(config: Option<Config>) -> Result<Arc<dyn TextScorer>> {
    let config = config.unwrap_or_default();
    match config.model_name().to_lowercase().as_str() {
        "vader" => Ok(Arc::new(VaderScorer::new())),
        "dummy" => Ok(Arc::new(DummyScorer::new())),
        other => Err(Error::Config(format!(
            "Unknown model '{}'. Available models: vader (default), dummy",
            other
        ))),
    }
}
