use thiserror::Error;

/// Failure of a catalog workflow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The addressed category or item does not exist.
    #[error("record not found")]
    NotFound,
    /// The store failed; details are logged where the failure happened.
    #[error("store unavailable")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
