use cartotrace_core::route_service::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The service answered `success: false`, or an error body
    #[error("Request rejected: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}

impl From<ClientError> for ServiceError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Request(_) | ClientError::Deserialize(_) | ClientError::InvalidUrl(_) => {
                ServiceError::Transport(error.to_string())
            }
            ClientError::Api { .. } => ServiceError::Rejected(None),
            ClientError::Rejected(message) => ServiceError::Rejected(message),
        }
    }
}
