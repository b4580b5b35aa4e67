use thiserror::Error;

/// Errors raised while fetching or parsing a dataset resource.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GET {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("origin cannot carry a path: {0}")]
    InvalidOrigin(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// `line` is the 1-based line in the source file.
    #[error("line {line}: missing column {column}")]
    MissingColumn { line: u64, column: usize },

    #[error("line {line}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        line: u64,
        column: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
