//! Error conversion glue between the domain and persistence layers.
//!
//! The domain layer must not depend on repository error types, so stored rows
//! that fail domain construction are mapped here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
