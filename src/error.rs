// src/error.rs
use thiserror::Error;

/// Failures surfaced by the answer client. Extraction itself never fails.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed upstream response: {0}")]
    Decode(String),
}

impl SearchError {
    pub fn is_config(&self) -> bool {
        matches!(self, SearchError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
