//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed record store using Diesel ORM
//! - **memory**: process-local record store used without a database
//! - **media**: filesystem photo store under the media root
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod media;
pub mod memory;
pub mod persistence;
