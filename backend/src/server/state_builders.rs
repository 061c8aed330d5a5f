//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use roster::domain::StudentService;
use roster::domain::ports::StudentRepository;
use roster::inbound::http::state::HttpState;
use roster::outbound::media::LocalPhotoStore;
use roster::outbound::memory::InMemoryStudentRepository;
use roster::outbound::persistence::DieselStudentRepository;

use super::ServerConfig;

/// Pick the record store: PostgreSQL when a pool is configured, memory
/// otherwise.
fn build_repository(config: &ServerConfig) -> Arc<dyn StudentRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselStudentRepository::new(pool.clone())),
        None => {
            info!("no database configured; student records are kept in memory");
            Arc::new(InMemoryStudentRepository::new())
        }
    }
}

/// Assemble handler state from the configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the media root cannot be created or opened.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let photos = Arc::new(
        LocalPhotoStore::open_root(&config.media_root).map_err(std::io::Error::other)?,
    );
    let service = Arc::new(StudentService::new(
        build_repository(config),
        Arc::clone(&photos),
    ));
    Ok(web::Data::new(HttpState::new(
        service.clone(),
        service,
        photos,
        config.media_url.clone(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::domain::ports::{PHOTO_DIR, StudentQuery};
    use roster::settings::RosterSettings;
    use rstest::rstest;

    #[rstest]
    #[actix_rt::test]
    async fn state_without_pool_uses_memory_and_prepares_media_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let media_root = dir.path().join("media");
        let settings = RosterSettings {
            bind_addr: None,
            database_url: None,
            media_root: Some(media_root.clone()),
            media_url: None,
            serve_media: None,
            pool_max_size: None,
        };
        let state = build_http_state(&ServerConfig::from_settings(&settings)).expect("state");

        assert!(media_root.join(PHOTO_DIR).is_dir());
        assert_eq!(state.media_url, "/media/");
        assert!(
            state
                .students_query
                .list()
                .await
                .expect("list")
                .is_empty()
        );
    }
}
