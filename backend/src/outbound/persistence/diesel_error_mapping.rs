//! Diesel and pool error mapping for the student record store.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::StudentRepositoryError;

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub(crate) fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    StudentRepositoryError::connection(error.message())
}

/// Map Diesel errors to record store errors.
///
/// A unique-index violation can only come from `students.email`, so it is
/// reported as [`StudentRepositoryError::DuplicateEmail`] carrying `email`.
pub(crate) fn map_diesel_error(error: DieselError, email: Option<&str>) -> StudentRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            StudentRepositoryError::duplicate_email(email.unwrap_or_default())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StudentRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => StudentRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => StudentRepositoryError::query("database query error"),
        _ => StudentRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug)]
    struct Info(&'static str);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some("students_email_key")
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom")))
    }

    #[rstest]
    fn unique_violation_becomes_duplicate_email() {
        let error = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation),
            Some("ada@example.com"),
        );
        assert_eq!(error, StudentRepositoryError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        StudentRepositoryError::connection("database connection error")
    )]
    #[case(DieselError::NotFound, StudentRepositoryError::query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation),
        StudentRepositoryError::query("database error")
    )]
    fn other_failures_map_to_connection_or_query(
        #[case] error: DieselError,
        #[case] expected: StudentRepositoryError,
    ) {
        assert_eq!(map_diesel_error(error, None), expected);
    }

    #[rstest]
    fn pool_failures_are_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, StudentRepositoryError::connection("timed out"));
    }
}
