use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scorer failed on article {index}: {message}")]
    Scorer { index: usize, message: String },

    #[error("Scorer returned out-of-range compound {value} for article {index}")]
    ScoreOutOfRange { index: usize, value: f64 },

    #[error("Malformed article {index}: {reason}")]
    MalformedArticle { index: usize, reason: String },

    #[error("News provider returned {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for failures caused by the article batch itself rather than by a
    /// collaborator (scorer, news provider, transport).
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Error::MalformedArticle { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
