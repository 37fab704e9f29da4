mod error;
mod repository;
mod service;

pub use self::error::ErrorBody;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
