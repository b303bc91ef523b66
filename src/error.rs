use thiserror::Error;

/// Failures of the rating engine itself. None of these are transient, so callers
/// should reject the request rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("cannot estimate a tier without any votes")]
    EmptyVoteSet,

    #[error("rating {rating} is not covered by any tier bucket")]
    RatingOutOfRange { rating: i32 },

    #[error("{field} must not be negative (got {value})")]
    InvalidCountArgument { field: &'static str, value: i64 },

    #[error("invalid tier table: {0}")]
    TierTableConfiguration(String),

    #[error("invalid rating context: {0}")]
    InvalidContext(String),
}

/// Failures while reading configuration or input fixtures from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Rating(#[from] RatingError),
}

impl LoadError {
    pub fn exit_code(&self) -> u8 {
        match self {
            LoadError::Io { .. } => 2,
            LoadError::Csv(_) | LoadError::Json(_) => 3,
            LoadError::Rating(_) => 4,
        }
    }
}
