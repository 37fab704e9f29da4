use crate::errors::{repository::RepositoryError, service::ServiceError};
use serde::{Deserialize, Serialize};

/// Wire-level error payload replied on the bus: `{ message, status }`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl From<ServiceError> for ErrorBody {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => ErrorBody::new(message, 400),
            ServiceError::Validation(errors) => {
                ErrorBody::new(format!("Validation failed: {errors:?}"), 400)
            }
            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => ErrorBody::new("Not found", 400),
                RepositoryError::Sqlx(_) => ErrorBody::new("Database error", 500),
                RepositoryError::Custom(message) => ErrorBody::new(message, 500),
            },
            ServiceError::Internal(message) => ErrorBody::new(message, 500),
            ServiceError::Custom(message) => ErrorBody::new(message, 500),
        }
    }
}
