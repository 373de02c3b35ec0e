use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a record exchange that never produced an envelope.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {}", .message.as_deref().unwrap_or("server error"))]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Human-readable message for logs and toasts.
    ///
    /// The message carried in the service's response body wins over the
    /// error's own description.
    pub fn message(&self) -> String {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}
