//! Development-mode serving of uploaded files.

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use crate::domain::Error;
use crate::domain::ports::PhotoStoreError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Serve a file below the media root.
///
/// Registered at `{media_url}{path:.*}` when media serving is enabled.
pub async fn serve_media(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let path = path.into_inner();
    let bytes = match state.photos.open(&path).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) | Err(PhotoStoreError::InvalidPath { .. }) => {
            return Err(Error::not_found(format!("media file {path} not found")));
        }
        Err(error) => return Err(Error::service_unavailable(error.to_string())),
    };
    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&path))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .body(bytes))
}
