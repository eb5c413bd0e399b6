use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoringError>;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Invalid score weights: {0}")]
    InvalidWeights(String),

    #[error("Weights JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
