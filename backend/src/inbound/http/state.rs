//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PhotoStore, StudentCommand, StudentQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentCommand>,
    pub students_query: Arc<dyn StudentQuery>,
    pub photos: Arc<dyn PhotoStore>,
    /// URL prefix for links to stored photos, with leading and trailing `/`.
    pub media_url: String,
}

impl HttpState {
    /// Construct state from the port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use roster::domain::StudentService;
    /// use roster::domain::ports::FixturePhotoStore;
    /// use roster::inbound::http::state::HttpState;
    /// use roster::outbound::memory::InMemoryStudentRepository;
    ///
    /// let service = Arc::new(StudentService::new(
    ///     Arc::new(InMemoryStudentRepository::new()),
    ///     Arc::new(FixturePhotoStore),
    /// ));
    /// let state = HttpState::new(service.clone(), service, Arc::new(FixturePhotoStore), "/media/");
    /// assert_eq!(state.media_url, "/media/");
    /// ```
    pub fn new(
        students: Arc<dyn StudentCommand>,
        students_query: Arc<dyn StudentQuery>,
        photos: Arc<dyn PhotoStore>,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            students,
            students_query,
            photos,
            media_url: media_url.into(),
        }
    }
}
