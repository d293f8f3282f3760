use thiserror::Error;

use crate::{operation::Superseded, point::InvalidPoint, route_service::ServiceError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperationError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Superseded(#[from] Superseded),

    #[error("Invalid point: {0}")]
    InvalidPoint(#[from] InvalidPoint),
}

impl OperationError {
    /// Alert text, or `None` when nothing should be shown to the user.
    pub fn user_message(&self) -> Option<String> {
        match self {
            OperationError::Service(error) => Some(error.user_message()),
            OperationError::Superseded(_) => None,
            OperationError::InvalidPoint(error) => Some(error.to_string()),
        }
    }
}
