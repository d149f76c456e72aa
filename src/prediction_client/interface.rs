use crate::prediction_client::form::FormPayload;
use crate::prediction_client::response::PredictionResponse;

/// Failures of the submission path itself. The `Display` text is what the
/// result region shows after `Error: `.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Encode(String),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Capture(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(error: reqwest::Error) -> Self {
        SubmitError::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(error: serde_json::Error) -> Self {
        SubmitError::Decode(error.to_string())
    }
}

impl From<image::ImageError> for SubmitError {
    fn from(error: image::ImageError) -> Self {
        SubmitError::Encode(error.to_string())
    }
}

impl From<std::io::Error> for SubmitError {
    fn from(error: std::io::Error) -> Self {
        SubmitError::Io(error.to_string())
    }
}

pub trait PredictionClient: Send + Sync {
    /// One POST to the prediction endpoint, decoded as JSON. HTTP status is
    /// not inspected; any JSON body is handed back.
    fn submit(&self, payload: FormPayload) -> Result<PredictionResponse, SubmitError>;
}
