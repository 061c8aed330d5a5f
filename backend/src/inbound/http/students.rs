//! Student pages: landing, create, list, edit and delete.
//!
//! ```text
//! GET  /                    landing page
//! GET  /students/           empty create form
//! POST /students/           create; 303 to the list or the form with errors
//! GET  /students_list/      every record
//! GET  /edit_student/{id}   pre-filled edit form
//! POST /edit_student/{id}   update; 303 to the list or the form with errors
//! GET  /delete_stud/{id}    delete; 303 to the list
//! ```

use actix_multipart::Multipart;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::FormOutcome;
use crate::domain::student_form::{FormErrors, FormValues};
use crate::domain::{Error, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::multipart::read_submission;
use crate::inbound::http::pages::{self, FormPage};
use crate::inbound::http::state::HttpState;

/// Where successful writes send the browser.
pub const LIST_PATH: &str = "/students_list/";
const CREATE_PATH: &str = "/students/";

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Identifiers below one can never exist, so they are simply not found.
fn student_id(raw: i32) -> Result<StudentId, Error> {
    StudentId::new(raw).map_err(|_| Error::not_found(format!("student {raw} not found")))
}

fn edit_path(id: StudentId) -> String {
    format!("/edit_student/{id}")
}

fn create_page(values: &FormValues, errors: Option<&FormErrors>) -> String {
    pages::student_form(&FormPage {
        heading: "Add student",
        action: CREATE_PATH,
        values,
        errors,
        current_photo: None,
    })
}

/// Landing page.
#[get("/")]
pub async fn landing() -> HttpResponse {
    html(pages::landing())
}

/// Empty create form.
#[get("/students/")]
pub async fn new_student() -> HttpResponse {
    html(create_page(&FormValues::default(), None))
}

/// Validate and store a new student.
#[post("/students/")]
pub async fn create_student(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let submission = read_submission(payload).await?;
    let values = FormValues::from_submission(&submission);
    match state.students.create(submission).await? {
        FormOutcome::Saved(_) => Ok(see_other(LIST_PATH)),
        FormOutcome::Rejected(errors) => Ok(html(create_page(&values, Some(&errors)))),
    }
}

/// Every student in insertion order.
#[get("/students_list/")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let students = state.students_query.list().await?;
    Ok(html(pages::student_list(&students, &state.media_url)))
}

/// Edit form pre-filled with the stored values.
#[get("/edit_student/{id}")]
pub async fn edit_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = student_id(path.into_inner())?;
    let student = state.students_query.get(id).await?;
    let action = edit_path(id);
    let photo = format!("{}{}", state.media_url, student.photo());
    Ok(html(pages::student_form(&FormPage {
        heading: "Edit student",
        action: &action,
        values: &FormValues::from_student(&student),
        errors: None,
        current_photo: Some(&photo),
    })))
}

/// Validate and replace the fields of an existing student.
#[post("/edit_student/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let id = student_id(path.into_inner())?;
    let submission = read_submission(payload).await?;
    let values = FormValues::from_submission(&submission);
    match state.students.update(id, submission).await? {
        FormOutcome::Saved(_) => Ok(see_other(LIST_PATH)),
        FormOutcome::Rejected(errors) => {
            let current = state.students_query.get(id).await?;
            let action = edit_path(id);
            let photo = format!("{}{}", state.media_url, current.photo());
            Ok(html(pages::student_form(&FormPage {
                heading: "Edit student",
                action: &action,
                values: &values,
                errors: Some(&errors),
                current_photo: Some(&photo),
            })))
        }
    }
}

/// Remove a student and return to the list.
#[get("/delete_stud/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = student_id(path.into_inner())?;
    state.students.delete(id).await?;
    Ok(see_other(LIST_PATH))
}

#[cfg(test)]
#[path = "students_tests.rs"]
mod tests;
