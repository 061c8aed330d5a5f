//! Routing table for the HTTP adapter.
//!
//! ```text
//! GET       /                     landing page
//! GET|POST  /students/            create form
//! GET       /students_list/       listing
//! GET|POST  /edit_student/{id}    edit form
//! GET       /delete_stud/{id}     delete then redirect
//! GET       {media_url}{path}     uploaded files (when enabled)
//! GET       /health/live          liveness check
//! GET       /health/ready         readiness check
//! ```
//!
//! `{id}` only matches integers; any other segment is a 404.

use actix_web::web;

use super::health::{live, ready};
use super::media::serve_media;
use super::students::{
    create_student, delete_student, edit_student, landing, list_students, new_student,
    update_student,
};

/// Register every route.
///
/// `media_url` enables file serving under that prefix; pass `None` when a
/// front proxy serves the media root instead. Media is registered last so an
/// overlapping prefix never shadows the page routes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use roster::inbound::http::routes::configure;
///
/// let _app = App::new().configure(|cfg| configure(cfg, Some("/media/")));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig, media_url: Option<&str>) {
    cfg.service(landing)
        .service(new_student)
        .service(create_student)
        .service(list_students)
        .service(edit_student)
        .service(update_student)
        .service(delete_student)
        .service(live)
        .service(ready);

    if let Some(prefix) = media_url {
        cfg.route(&format!("{prefix}{{path:.*}}"), web::get().to(serve_media));
    }
}
