//! Error taxonomy surfaced by both video operations.

use super::text::truncate_chars;
use crate::ports::extractor::ExtractError;
use thiserror::Error;

/// Collaborator-originated text is cut to this many characters before it reaches a client.
pub const MAX_ERROR_DETAIL_CHARS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VideoError {
    #[error("URL parameter is required")]
    Validation,

    #[error("URL not supported")]
    UnsupportedSource,

    #[error("Download error: {0}")]
    Extraction(String),

    /// The collaborator completed but reported nothing.
    #[error("{0}")]
    EmptyResult(&'static str),

    #[error("Downloaded file not found")]
    ArtifactMissing,

    #[error("Error: {0}")]
    Internal(String),
}

impl VideoError {
    pub fn extraction(detail: impl AsRef<str>) -> Self {
        VideoError::Extraction(truncate_chars(detail.as_ref(), MAX_ERROR_DETAIL_CHARS).to_string())
    }

    pub fn internal(detail: impl AsRef<str>) -> Self {
        VideoError::Internal(truncate_chars(detail.as_ref(), MAX_ERROR_DETAIL_CHARS).to_string())
    }

    /// Whether the failure is attributable to the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            VideoError::Validation
            | VideoError::UnsupportedSource
            | VideoError::Extraction(_)
            | VideoError::EmptyResult(_) => true,
            VideoError::ArtifactMissing | VideoError::Internal(_) => false,
        }
    }
}

impl From<ExtractError> for VideoError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedSource(_) => VideoError::UnsupportedSource,
            ExtractError::Failed(detail) => VideoError::extraction(detail),
            ExtractError::Internal(detail) => VideoError::internal(detail),
        }
    }
}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        VideoError::internal(err.to_string())
    }
}
