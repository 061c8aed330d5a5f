//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod photo_store;
mod student_command;
mod student_query;
mod student_repository;

#[cfg(test)]
pub use photo_store::MockPhotoStore;
pub use photo_store::{FixturePhotoStore, PHOTO_DIR, PhotoStore, PhotoStoreError};
#[cfg(test)]
pub use student_command::MockStudentCommand;
pub use student_command::{FormOutcome, StudentCommand};
#[cfg(test)]
pub use student_query::MockStudentQuery;
pub use student_query::StudentQuery;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
