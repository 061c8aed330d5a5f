//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The record store is backed by PostgreSQL via `diesel-async` with `bb8`
//! connection pooling. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; adapters translate them into
//! domain types and map every database failure into
//! [`StudentRepositoryError`](crate::domain::ports::StudentRepositoryError).
//!
//! # Example
//!
//! ```no_run
//! use roster::outbound::persistence::{
//!     DbPool, DieselStudentRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://roster@localhost/roster";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repo = DieselStudentRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
