use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("invalid delimiter '{value}': use one character or keywords: tab, space, comma, pipe")]
    InvalidDelimiter { value: String },

    #[error(
        "could not auto-detect required columns, found header: {header:?}; \
         pass --audio-column and --text-column explicitly"
    )]
    ColumnDetection { header: Vec<String> },

    #[error("column '{column}' not found in header: {header:?}")]
    ColumnNotFound { column: String, header: Vec<String> },

    #[error(
        "input appears to have no header; \
         a header row naming the audio and text columns is required"
    )]
    NoHeader,

    #[error("prefix map must be in OLD=NEW format, got '{0}'")]
    InvalidPrefixRule(String),

    #[error("prefix map has empty OLD in '{0}'")]
    EmptyPrefixOld(String),

    #[error("csv failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("json failure: {0}")]
    Json(#[from] serde_json::Error),
}
