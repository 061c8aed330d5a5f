//! Multipart form decoding into a [`StudentSubmission`].
//!
//! Text parts are collected by field name. The `photo` part becomes the upload
//! when it carries a non-empty file name; browsers send an empty part with a
//! blank file name when the file input is left untouched.

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;
use tracing::debug;

use crate::domain::student_form::{PHOTO_FIELD, StudentSubmission};
use crate::domain::{Error, PhotoUpload};

/// Largest accepted photo upload.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;
/// Largest accepted text part.
pub const MAX_TEXT_BYTES: usize = 16 * 1024;

fn malformed(detail: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed form submission: {detail}"))
}

async fn read_limited(field: &mut Field, limit: usize, what: &str) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        if buf.len() + chunk.len() > limit {
            return Err(Error::invalid_request(format!(
                "{what} exceeds the {limit} byte limit"
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

/// Drain a multipart payload into a submission.
///
/// # Errors
///
/// Returns an invalid-request [`Error`] when the payload is malformed, a text
/// part is not UTF-8, or a part exceeds its size limit.
pub async fn read_submission(mut payload: Multipart) -> Result<StudentSubmission, Error> {
    let mut submission = StudentSubmission::new();
    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_owned) else {
            read_limited(&mut field, MAX_TEXT_BYTES, "unnamed part").await?;
            continue;
        };
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);

        match file_name {
            Some(file_name) => {
                let content = read_limited(&mut field, MAX_PHOTO_BYTES, "photo").await?;
                if name == PHOTO_FIELD && !file_name.trim().is_empty() {
                    debug!(file_name = %file_name, bytes = content.len(), "photo received");
                    submission.set_photo(PhotoUpload::new(file_name, content));
                }
            }
            None => {
                let raw = read_limited(&mut field, MAX_TEXT_BYTES, "form field").await?;
                let value = String::from_utf8(raw)
                    .map_err(|_| Error::invalid_request(format!("field {name} is not UTF-8")))?;
                submission.insert_text(name, value);
            }
        }
    }
    Ok(submission)
}
