use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Request Validation Error: {0}")]
    Validation(String),

    #[error("Invalid clock time '{0}' (expected HH:MM, 24h)")]
    InvalidTime(String),
}

pub type PlanResult<T> = Result<T, PlannerError>;
