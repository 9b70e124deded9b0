use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("file is not valid UTF-8 text: {path}")]
    NonUtf8 { path: String },

    #[error("file too large: {path} ({size} bytes, limit {limit})")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("invalid marker table: {detail}")]
    InvalidMarkers { detail: String },

    #[error("malformed segment #{index}: {reason}")]
    MalformedSegment { index: usize, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;
