// Error types shared by the analysis modules.
// Command handlers in main.rs wrap these in anyhow with extra context.
use thiserror::Error;

use crate::nlp::summarization::SummarizeError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("pipeline '{0}' is not available")]
    PipelineUnavailable(String),

    #[error(transparent)]
    Summarize(#[from] SummarizeError),

    #[error("preview percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(u32),

    #[error("unsupported file format: {0}")]
    UnsupportedFile(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
