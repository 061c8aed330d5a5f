//! HTTP inbound adapter serving the student pages.

pub mod error;
pub mod health;
pub mod media;
pub mod multipart;
pub mod pages;
pub mod routes;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
