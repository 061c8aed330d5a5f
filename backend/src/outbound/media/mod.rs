//! Filesystem photo store rooted at the configured media directory.
//!
//! All access goes through a capability-scoped `cap_std` directory handle, so
//! no request path can reach outside the media root. Uploads land under
//! [`PHOTO_DIR`]; a name already taken gets a random suffix rather than
//! overwriting the earlier file.

use std::io::{self, Write};
use std::path::{Component, Path};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::fs::{Dir, OpenOptions};
use cap_std::ambient_authority;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{PHOTO_DIR, PhotoStore, PhotoStoreError};
use crate::domain::{PhotoRef, PhotoUpload};

const FALLBACK_STEM: &str = "photo";
const CLAIM_ATTEMPTS: usize = 8;
const STEM_MAX: usize = 100;
const EXT_MAX: usize = 16;

/// [`PhotoStore`] writing files below a media root directory.
#[derive(Debug, Clone)]
pub struct LocalPhotoStore {
    root: Arc<Dir>,
}

fn io_error(error: &io::Error) -> PhotoStoreError {
    PhotoStoreError::io(error.to_string())
}

impl LocalPhotoStore {
    /// Open (creating when missing) the media root and its photo directory.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoStoreError::Io`] when the directories cannot be created
    /// or opened.
    pub fn open_root(media_root: impl AsRef<Path>) -> Result<Self, PhotoStoreError> {
        let media_root = media_root.as_ref();
        Dir::create_ambient_dir_all(media_root, ambient_authority())
            .map_err(|error| io_error(&error))?;
        let root = Dir::open_ambient_dir(media_root, ambient_authority())
            .map_err(|error| io_error(&error))?;
        root.create_dir_all(PHOTO_DIR)
            .map_err(|error| io_error(&error))?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    async fn blocking<T, F>(&self, work: F) -> Result<T, PhotoStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, PhotoStoreError> + Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || work(&*root))
            .await
            .map_err(|error| PhotoStoreError::io(format!("photo store task failed: {error}")))?
    }
}

/// Reduce a client file name to a portable `stem.ext` form.
///
/// The stem is cut to [`STEM_MAX`] characters and the extension, dot
/// included, to [`EXT_MAX`], so a stored reference with a collision suffix
/// always fits the `photo` column.
fn sanitise_file_name(file_name: &str) -> (String, String) {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let (stem, ext) = match cleaned.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (cleaned, String::new()),
    };
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    (
        stem.chars().take(STEM_MAX).collect(),
        ext.chars().take(EXT_MAX).collect(),
    )
}

/// Validate a path relative to the media root.
///
/// Only plain descending components are accepted.
fn checked_relative(path: &str) -> Result<&Path, PhotoStoreError> {
    let candidate = Path::new(path);
    let plain = !path.is_empty()
        && !path.contains('\\')
        && candidate
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
    if plain {
        Ok(candidate)
    } else {
        Err(PhotoStoreError::invalid_path(path))
    }
}

fn write_new(root: &Dir, relative: &str, content: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = root.open_with(relative, &options)?;
    file.write_all(content)?;
    file.sync_all()
}

fn claim_and_write(root: &Dir, file_name: &str, content: &[u8]) -> Result<String, PhotoStoreError> {
    let (stem, ext) = sanitise_file_name(file_name);
    let mut candidate = format!("{PHOTO_DIR}/{stem}{ext}");
    for _ in 0..CLAIM_ATTEMPTS {
        match write_new(root, &candidate, content) {
            Ok(()) => return Ok(candidate),
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
                let suffix = Uuid::new_v4().simple().to_string();
                candidate = format!("{PHOTO_DIR}/{stem}_{}{ext}", &suffix[..7]);
            }
            Err(error) => return Err(io_error(&error)),
        }
    }
    Err(PhotoStoreError::io(format!(
        "no free file name for {file_name} after {CLAIM_ATTEMPTS} attempts"
    )))
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn save(&self, upload: &PhotoUpload) -> Result<PhotoRef, PhotoStoreError> {
        let file_name = upload.file_name().to_owned();
        let content = upload.content().to_vec();
        let stored = self
            .blocking(move |root| claim_and_write(root, &file_name, &content))
            .await?;
        debug!(path = %stored, "photo written");
        PhotoRef::new(stored.clone()).map_err(|_| PhotoStoreError::invalid_path(stored))
    }

    async fn remove(&self, photo: &PhotoRef) -> Result<(), PhotoStoreError> {
        if photo.is_placeholder() {
            return Ok(());
        }
        let path = checked_relative(photo.as_ref())?.to_path_buf();
        self.blocking(move |root| match root.remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error(&error)),
        })
        .await
    }

    async fn open(&self, path: &str) -> Result<Option<Vec<u8>>, PhotoStoreError> {
        let path = checked_relative(path)?.to_path_buf();
        self.blocking(move |root| {
            let metadata = match root.metadata(&path) {
                Ok(metadata) => metadata,
                Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(error) => return Err(io_error(&error)),
            };
            if !metadata.is_file() {
                return Ok(None);
            }
            root.read(&path).map(Some).map_err(|error| io_error(&error))
        })
        .await
    }
}
