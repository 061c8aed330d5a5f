//! Domain primitives, validation rules and use-case services.
//!
//! Purpose: Define the strongly typed student record, the form schema that
//! validates submissions, and the service that drives the record and photo
//! stores through the ports in [`ports`]. Nothing in this module knows about
//! HTTP or SQL.
//!
//! Public surface:
//! - Error (alias to `error::Error`): failure surfaced to inbound adapters.
//! - Student and its value types: validated record fields.
//! - StudentService: implements the driving ports over driven ports.

pub mod error;
pub mod ports;
pub mod student;
pub mod student_form;
mod student_service;
mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::student::{
    AGE_LIMIT, AGE_MIN, Age, DEFAULT_PHOTO, EMAIL_MAX, Email, NAME_MAX, PHOTO_NAME_MAX,
    PHOTO_REF_MAX, PhotoRef, PhotoUpload, Student, StudentDetails, StudentId, StudentName,
    StudentValidationError, validate_age, validate_email_unique, validate_photo,
    validate_photo_name_length,
};
pub use self::student_service::StudentService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
