//! Driving port for student writes: create, edit and delete.

use async_trait::async_trait;

use crate::domain::student_form::{FormErrors, StudentSubmission};
use crate::domain::{Error, Student, StudentId};

/// Result of processing a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The record was written.
    Saved(Student),
    /// Validation failed; nothing was written.
    Rejected(FormErrors),
}

/// Use-cases that change the record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentCommand: Send + Sync {
    /// Validate a submission and insert a new record.
    async fn create(&self, submission: StudentSubmission) -> Result<FormOutcome, Error>;

    /// Validate a submission and replace the fields of record `id`.
    ///
    /// Returns a not-found [`Error`] when `id` does not resolve.
    async fn update(
        &self,
        id: StudentId,
        submission: StudentSubmission,
    ) -> Result<FormOutcome, Error>;

    /// Permanently remove record `id`.
    ///
    /// Returns a not-found [`Error`] when `id` does not resolve.
    async fn delete(&self, id: StudentId) -> Result<(), Error>;
}
