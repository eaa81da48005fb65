//! Error types for extraction and validation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("extracted payload is not a JSON object (found {found})")]
    NotAnObject { found: &'static str },
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("empty response received from the extraction model")]
    EmptyResponse,

    /// The response had no brace-delimited span. `raw` is kept for diagnostics.
    #[error("extraction model response did not contain a JSON object")]
    Unstructured { raw: String },

    #[error("extraction model returned malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("extraction service error: {0}")]
    Service(String),
}

impl ExtractionError {
    /// Raw model text, when the failure kept it.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ExtractionError::Unstructured { raw } => Some(raw),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
