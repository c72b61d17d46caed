use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("not found")]
    NotFound,

    #[error("external service error: {0}")]
    ExternalServiceError(String),

    #[error("object storage error: {0}")]
    ObjectStorageError(String),

    #[error("cache error: {0}")]
    CacheError(String),

    #[error("internal server error")]
    InternalServerError,
}
