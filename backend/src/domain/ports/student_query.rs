//! Driving port for read-only student lookups.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId};

/// Read-only use-cases over the record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentQuery: Send + Sync {
    /// Every record in insertion order.
    async fn list(&self) -> Result<Vec<Student>, Error>;

    /// A single record; not-found [`Error`] when `id` does not resolve.
    async fn get(&self, id: StudentId) -> Result<Student, Error>;
}
