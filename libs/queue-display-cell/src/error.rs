use thiserror::Error;

use shared_api_client::ApiError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueueDisplayError {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Decode failure: {0}")]
    Decode(String),

    #[error("Command failure: {0}")]
    Command(String),
}

impl QueueDisplayError {
    /// Title of the transient notice shown for this failure.
    pub fn notice_title(&self) -> &'static str {
        match self {
            QueueDisplayError::Network(_) => "Connection problem",
            QueueDisplayError::Decode(_) => "Unexpected response",
            QueueDisplayError::Command(_) => "Call next failed",
        }
    }
}

impl From<ApiError> for QueueDisplayError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Decode(e) => QueueDisplayError::Decode(e.to_string()),
            ApiError::Transport(e) if e.is_decode() => QueueDisplayError::Decode(e.to_string()),
            other => QueueDisplayError::Network(other.to_string()),
        }
    }
}
