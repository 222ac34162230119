//! Catalog workflows.
//!
//! Services are plain functions generic over the repository traits so the
//! HTTP routes stay thin wrappers and the workflows can be exercised against
//! the in-memory test repository.

pub use errors::{ServiceError, ServiceResult};

use crate::repository::RepositoryError;

pub mod categories;
pub mod errors;
pub mod items;
pub mod main;

/// Run two independent reads concurrently and wait for both results.
pub(crate) fn join_reads<A, B, FA, FB>(first: FA, second: FB) -> (A, B)
where
    FA: FnOnce() -> A + Send,
    FB: FnOnce() -> B + Send,
    A: Send,
    B: Send,
{
    std::thread::scope(|scope| {
        let second = scope.spawn(second);
        let first = first();
        let second = second
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        (first, second)
    })
}

/// Log a repository failure with `context` and map it to
/// [`ServiceError::Internal`].
pub(crate) fn store_failure(context: &'static str) -> impl FnOnce(RepositoryError) -> ServiceError {
    move |e| {
        log::error!("{context}: {e}");
        ServiceError::Internal
    }
}
