//! Process-local record store used when no database is configured.
//!
//! Records live in a `BTreeMap` keyed by identifier, so iteration order is
//! insertion order. Identifiers are never reused after a delete, matching a
//! `serial` column. Contents are lost when the process exits.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{Email, Student, StudentDetails, StudentId};

#[derive(Debug)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<StudentId, Student>,
}

impl MemoryState {
    fn email_taken(&self, email: &Email, except: Option<StudentId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email() == email && Some(row.id()) != except)
    }
}

/// In-memory implementation of the [`StudentRepository`] port.
#[derive(Debug)]
pub struct InMemoryStudentRepository {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryStudentRepository {
    fn default() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                last_id: 0,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl InMemoryStudentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StudentRepositoryError> {
        self.state
            .lock()
            .map_err(|_| StudentRepositoryError::query("student store lock poisoned"))
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(&self, details: &StudentDetails) -> Result<Student, StudentRepositoryError> {
        let mut state = self.lock()?;
        if state.email_taken(&details.email, None) {
            return Err(StudentRepositoryError::duplicate_email(details.email.as_ref()));
        }
        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| StudentRepositoryError::query("student id sequence exhausted"))?;
        let id = StudentId::new(next)
            .map_err(|error| StudentRepositoryError::query(error.to_string()))?;
        state.last_id = next;
        let student = Student::new(id, details.clone());
        state.rows.insert(id, student.clone());
        debug!(student_id = %id, "student stored in memory");
        Ok(student)
    }

    async fn update(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut state = self.lock()?;
        if !state.rows.contains_key(&student.id()) {
            return Err(StudentRepositoryError::not_found(student.id().get()));
        }
        if state.email_taken(student.email(), Some(student.id())) {
            return Err(StudentRepositoryError::duplicate_email(student.email().as_ref()));
        }
        state.rows.insert(student.id(), student.clone());
        Ok(())
    }

    async fn delete(&self, id: StudentId) -> Result<bool, StudentRepositoryError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|row| row.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }
}
