//! Port for the managed upload location holding student photos.

use async_trait::async_trait;

use crate::domain::{PhotoRef, PhotoUpload};

use super::define_port_error;

/// Directory, relative to the media root, that receives student photos.
pub const PHOTO_DIR: &str = "students/photos";

define_port_error! {
    /// Errors raised by photo store adapters.
    pub enum PhotoStoreError {
        /// Reading or writing the media directory failed.
        Io { message: String } => "photo store i/o failed: {message}",
        /// A requested path escapes the media root or is otherwise unusable.
        InvalidPath { path: String } => "invalid media path: {path}",
    }
}

/// Storage for uploaded photo files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Persist an upload and return its stored reference.
    async fn save(&self, upload: &PhotoUpload) -> Result<PhotoRef, PhotoStoreError>;

    /// Delete a stored photo. Missing files are not an error.
    async fn remove(&self, photo: &PhotoRef) -> Result<(), PhotoStoreError>;

    /// Read a file below the media root, `None` when it does not exist.
    async fn open(&self, path: &str) -> Result<Option<Vec<u8>>, PhotoStoreError>;
}

/// Fixture implementation that accepts uploads without writing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePhotoStore;

#[async_trait]
impl PhotoStore for FixturePhotoStore {
    async fn save(&self, upload: &PhotoUpload) -> Result<PhotoRef, PhotoStoreError> {
        PhotoRef::new(format!("{PHOTO_DIR}/{}", upload.file_name()))
            .map_err(|err| PhotoStoreError::invalid_path(err.to_string()))
    }

    async fn remove(&self, _photo: &PhotoRef) -> Result<(), PhotoStoreError> {
        Ok(())
    }

    async fn open(&self, _path: &str) -> Result<Option<Vec<u8>>, PhotoStoreError> {
        Ok(None)
    }
}
