//! Student use-cases: the form, listing and delete controllers.
//!
//! The service runs the form schema, checks email uniqueness against the
//! store, stores uploaded photos and writes records. Field failures come back
//! as [`FormOutcome::Rejected`]; only not-found and infrastructure failures
//! surface as [`Error`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    FormOutcome, PhotoStore, PhotoStoreError, StudentCommand, StudentQuery, StudentRepository,
    StudentRepositoryError,
};
use crate::domain::student_form::{
    EMAIL_FIELD, FormErrors, StudentSubmission, ValidatedSubmission, validate_submission,
};
use crate::domain::{
    Email, Error, PhotoRef, PhotoUpload, Student, StudentDetails, StudentId,
    StudentValidationError, validate_email_unique,
};

/// Student service implementing the driving ports.
pub struct StudentService<R: ?Sized, P: ?Sized> {
    repository: Arc<R>,
    photos: Arc<P>,
}

impl<R: ?Sized, P: ?Sized> Clone for StudentService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            photos: Arc::clone(&self.photos),
        }
    }
}

impl<R: ?Sized, P: ?Sized> StudentService<R, P> {
    /// Create a new service over the given record and photo stores.
    pub fn new(repository: Arc<R>, photos: Arc<P>) -> Self {
        Self { repository, photos }
    }
}

fn duplicate_email_errors() -> FormErrors {
    FormErrors::single(EMAIL_FIELD, &StudentValidationError::DuplicateEmail)
}

fn not_found(id: StudentId) -> Error {
    Error::not_found(format!("student {id} not found"))
}

impl<R, P> StudentService<R, P>
where
    R: StudentRepository + ?Sized,
    P: PhotoStore + ?Sized,
{
    fn map_repository_error(error: StudentRepositoryError) -> Error {
        match error {
            StudentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("student repository unavailable: {message}"))
            }
            StudentRepositoryError::Query { message } => {
                Error::internal(format!("student repository error: {message}"))
            }
            StudentRepositoryError::DuplicateEmail { email } => {
                Error::internal(format!("unexpected duplicate email: {email}"))
            }
            StudentRepositoryError::NotFound { id } => {
                Error::not_found(format!("student {id} not found"))
            }
        }
    }

    fn map_photo_error(error: PhotoStoreError) -> Error {
        match error {
            PhotoStoreError::Io { message } => {
                Error::service_unavailable(format!("photo store unavailable: {message}"))
            }
            PhotoStoreError::InvalidPath { path } => {
                Error::internal(format!("photo store rejected path: {path}"))
            }
        }
    }

    async fn require(&self, id: StudentId) -> Result<Student, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn email_errors(
        &self,
        email: &Email,
        editing: Option<StudentId>,
    ) -> Result<Option<FormErrors>, Error> {
        let existing = self
            .repository
            .find_by_email(email)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(validate_email_unique(email, &existing, editing)
            .err()
            .map(|error| FormErrors::single(EMAIL_FIELD, &error)))
    }

    async fn store_photo(&self, upload: Option<&PhotoUpload>) -> Result<Option<PhotoRef>, Error> {
        let Some(upload) = upload else {
            return Ok(None);
        };
        let photo = self
            .photos
            .save(upload)
            .await
            .map_err(Self::map_photo_error)?;
        debug!(photo = %photo, "photo stored");
        Ok(Some(photo))
    }

    /// Remove a photo written for a write that did not go through.
    async fn discard_photo(&self, photo: Option<&PhotoRef>) {
        let Some(photo) = photo else {
            return;
        };
        if let Err(error) = self.photos.remove(photo).await {
            warn!(%error, photo = %photo, "failed to discard orphaned photo");
        }
    }

    /// Validate, check uniqueness and store the photo.
    ///
    /// Returns the validated fields plus the newly stored photo, or the form
    /// errors to show.
    async fn prepare(
        &self,
        submission: StudentSubmission,
        editing: Option<StudentId>,
    ) -> Result<Result<(ValidatedSubmission, Option<PhotoRef>), FormErrors>, Error> {
        let fields = match validate_submission(submission) {
            Ok(fields) => fields,
            Err(errors) => {
                debug!(failures = errors.entries().len(), "student form rejected");
                return Ok(Err(errors));
            }
        };
        if let Some(errors) = self.email_errors(&fields.email, editing).await? {
            debug!("student form rejected: duplicate email");
            return Ok(Err(errors));
        }
        let stored = self.store_photo(fields.photo.as_ref()).await?;
        Ok(Ok((fields, stored)))
    }
}

#[async_trait]
impl<R, P> StudentCommand for StudentService<R, P>
where
    R: StudentRepository + ?Sized,
    P: PhotoStore + ?Sized,
{
    async fn create(&self, submission: StudentSubmission) -> Result<FormOutcome, Error> {
        let (fields, stored) = match self.prepare(submission, None).await? {
            Ok(prepared) => prepared,
            Err(errors) => return Ok(FormOutcome::Rejected(errors)),
        };
        let details = StudentDetails {
            name: fields.name,
            age: fields.age,
            email: fields.email,
            photo: stored.clone().unwrap_or_default(),
        };

        match self.repository.insert(&details).await {
            Ok(student) => {
                info!(student_id = %student.id(), "student created");
                Ok(FormOutcome::Saved(student))
            }
            Err(StudentRepositoryError::DuplicateEmail { .. }) => {
                self.discard_photo(stored.as_ref()).await;
                Ok(FormOutcome::Rejected(duplicate_email_errors()))
            }
            Err(error) => {
                self.discard_photo(stored.as_ref()).await;
                Err(Self::map_repository_error(error))
            }
        }
    }

    async fn update(
        &self,
        id: StudentId,
        submission: StudentSubmission,
    ) -> Result<FormOutcome, Error> {
        let existing = self.require(id).await?;
        let (fields, stored) = match self.prepare(submission, Some(id)).await? {
            Ok(prepared) => prepared,
            Err(errors) => return Ok(FormOutcome::Rejected(errors)),
        };
        let photo = stored
            .clone()
            .unwrap_or_else(|| existing.photo().clone());
        let updated = Student::new(
            id,
            StudentDetails {
                name: fields.name,
                age: fields.age,
                email: fields.email,
                photo,
            },
        );

        match self.repository.update(&updated).await {
            Ok(()) => {
                info!(student_id = %id, "student updated");
                Ok(FormOutcome::Saved(updated))
            }
            Err(StudentRepositoryError::DuplicateEmail { .. }) => {
                self.discard_photo(stored.as_ref()).await;
                Ok(FormOutcome::Rejected(duplicate_email_errors()))
            }
            Err(error) => {
                self.discard_photo(stored.as_ref()).await;
                Err(Self::map_repository_error(error))
            }
        }
    }

    async fn delete(&self, id: StudentId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if removed {
            info!(student_id = %id, "student deleted");
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

#[async_trait]
impl<R, P> StudentQuery for StudentService<R, P>
where
    R: StudentRepository + ?Sized,
    P: PhotoStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Student>, Error> {
        self.repository
            .list()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get(&self, id: StudentId) -> Result<Student, Error> {
        self.require(id).await
    }
}

#[cfg(test)]
#[path = "student_service_tests.rs"]
mod tests;
