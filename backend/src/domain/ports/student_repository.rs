//! Port abstraction for the student record store and its errors.

use async_trait::async_trait;

use crate::domain::{Email, Student, StudentDetails, StudentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
        /// The store's uniqueness constraint on email rejected the write.
        DuplicateEmail { email: String } => "a student with email {email} already exists",
        /// An update targeted a record that no longer exists.
        NotFound { id: i32 } => "student {id} not found",
    }
}

/// Record store holding every student.
///
/// Implementations keep email addresses unique and return records in
/// insertion order from [`StudentRepository::list`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a new record and return it with its assigned identifier.
    async fn insert(&self, details: &StudentDetails) -> Result<Student, StudentRepositoryError>;

    /// Replace every field of an existing record.
    async fn update(&self, student: &Student) -> Result<(), StudentRepositoryError>;

    /// Remove a record. Returns `false` when no record had the identifier.
    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError>;

    /// Fetch the record using an email address, if any.
    async fn find_by_email(&self, email: &Email)
    -> Result<Option<Student>, StudentRepositoryError>;

    /// Every record in insertion order.
    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError>;
}
