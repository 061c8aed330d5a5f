//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.
//!
//! The unique index on `students.email` backs the uniqueness check done by the
//! service, so two concurrent writes with the same address cannot both land.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Age, Email, PhotoRef, Student, StudentDetails, StudentId, StudentName};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewStudentRow, StudentChangeset, StudentRow};
use super::pool::DbPool;
use super::schema::students;

/// Diesel-backed implementation of the [`StudentRepository`] port.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain record.
///
/// Rows written by this adapter always satisfy the domain rules; a row that
/// does not was edited out of band and is reported as a query failure.
fn row_to_student(row: StudentRow) -> Result<Student, StudentRepositoryError> {
    let id = row.id;
    let convert = || -> Result<Student, crate::domain::StudentValidationError> {
        Ok(Student::new(
            StudentId::new(row.id)?,
            StudentDetails {
                name: StudentName::new(&row.name)?,
                age: Age::new(i64::from(row.age))?,
                email: Email::new(&row.email)?,
                photo: PhotoRef::new(row.photo)?,
            },
        ))
    };
    convert().map_err(|error| {
        warn!(student_id = id, %error, "stored student row failed validation");
        StudentRepositoryError::query(format!("student {id} holds invalid data: {error}"))
    })
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn insert(&self, details: &StudentDetails) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewStudentRow {
            name: details.name.as_ref(),
            age: i32::from(details.age.get()),
            email: details.email.as_ref(),
            photo: details.photo.as_ref(),
        };

        let id: i32 = diesel::insert_into(students::table)
            .values(&row)
            .returning(students::id)
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, Some(row.email)))?;
        debug!(student_id = id, "student row inserted");

        let id = StudentId::new(id).map_err(|error| {
            StudentRepositoryError::query(format!("sequence returned invalid id: {error}"))
        })?;
        Ok(Student::new(id, details.clone()))
    }

    async fn update(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = StudentChangeset {
            name: student.name().as_ref(),
            age: i32::from(student.age().get()),
            email: student.email().as_ref(),
            photo: student.photo().as_ref(),
        };

        let updated = diesel::update(students::table.find(student.id().get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, Some(changes.email)))?;

        if updated == 0 {
            return Err(StudentRepositoryError::not_found(student.id().get()));
        }
        debug!(student_id = %student.id(), "student row updated");
        Ok(())
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(students::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, None))?;
        debug!(student_id = %id, deleted, "student delete executed");
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .find(id.get())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, None))?;

        row.map(row_to_student).transpose()
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .filter(students::email.eq(email.as_ref()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, None))?;

        row.map(row_to_student).transpose()
    }

    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .order(students::id.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, None))?;

        rows.into_iter().map(row_to_student).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion checks; query behaviour is covered by the
    //! database-backed integration suite.

    use super::*;
    use rstest::rstest;

    fn row(age: i32, email: &str) -> StudentRow {
        StudentRow {
            id: 7,
            name: "Ada Lovelace".to_owned(),
            age,
            email: email.to_owned(),
            photo: "students/photos/ada.png".to_owned(),
        }
    }

    #[rstest]
    fn valid_row_converts_to_student() {
        let student = row_to_student(row(36, "ada@example.com")).expect("valid row");
        assert_eq!(student.id().get(), 7);
        assert_eq!(student.age().get(), 36);
        assert_eq!(student.photo().as_ref(), "students/photos/ada.png");
    }

    #[rstest]
    #[case(row(0, "ada@example.com"))]
    #[case(row(36, "not-an-email"))]
    fn invalid_row_is_a_query_error(#[case] invalid: StudentRow) {
        let error = row_to_student(invalid).expect_err("invalid row");
        assert!(matches!(error, StudentRepositoryError::Query { .. }));
    }
}
