//! Student form schema and submission validation.
//!
//! The form is a fixed, ordered list of fields, each pairing a name and input
//! kind with the validator that turns raw input into a typed value. Every
//! field is checked and all failures are collected, so a rejected submission
//! reports each offending field at once.

use std::collections::BTreeMap;

use crate::domain::{
    Age, Email, PhotoUpload, Student, StudentName, StudentValidationError, validate_photo,
    validate_photo_name_length,
};

/// Input widget expected for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Integer,
    File,
}

impl FieldKind {
    /// HTML `input` type used when rendering the field.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Integer => "number",
            Self::File => "file",
        }
    }
}

/// Raw value handed to a field validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(Option<String>),
    File(Option<PhotoUpload>),
}

/// Typed value produced by a successful field validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Name(StudentName),
    Email(Email),
    Age(Age),
    Photo(Option<PhotoUpload>),
}

type Validator = fn(FieldInput) -> Result<FieldValue, StudentValidationError>;

/// One entry of the form schema.
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    validator: Validator,
}

impl FormField {
    /// Run this field's validator.
    pub fn validate(&self, input: FieldInput) -> Result<FieldValue, StudentValidationError> {
        (self.validator)(input)
    }
}

/// Form field name of the student name.
pub const NAME_FIELD: &str = "name";
/// Form field name of the email address.
pub const EMAIL_FIELD: &str = "email";
/// Form field name of the age.
pub const AGE_FIELD: &str = "age";
/// Form field name of the photo upload.
pub const PHOTO_FIELD: &str = "photo";

/// Student form schema, in display and validation order.
pub const STUDENT_FORM: [FormField; 4] = [
    FormField {
        name: NAME_FIELD,
        label: "Name",
        kind: FieldKind::Text,
        required: true,
        validator: validate_name_input,
    },
    FormField {
        name: EMAIL_FIELD,
        label: "Email",
        kind: FieldKind::Email,
        required: true,
        validator: validate_email_input,
    },
    FormField {
        name: AGE_FIELD,
        label: "Age",
        kind: FieldKind::Integer,
        required: true,
        validator: validate_age_input,
    },
    FormField {
        name: PHOTO_FIELD,
        label: "Photo",
        kind: FieldKind::File,
        required: false,
        validator: validate_photo_input,
    },
];

fn required_text(input: FieldInput) -> Result<String, StudentValidationError> {
    match input {
        FieldInput::Text(Some(value)) if !value.trim().is_empty() => Ok(value),
        _ => Err(StudentValidationError::Required),
    }
}

fn validate_name_input(input: FieldInput) -> Result<FieldValue, StudentValidationError> {
    StudentName::new(required_text(input)?).map(FieldValue::Name)
}

fn validate_email_input(input: FieldInput) -> Result<FieldValue, StudentValidationError> {
    Email::new(required_text(input)?).map(FieldValue::Email)
}

fn validate_age_input(input: FieldInput) -> Result<FieldValue, StudentValidationError> {
    let raw = required_text(input)?;
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| StudentValidationError::NotANumber)?;
    Age::new(value).map(FieldValue::Age)
}

fn validate_photo_input(input: FieldInput) -> Result<FieldValue, StudentValidationError> {
    let upload = match input {
        FieldInput::File(upload) => upload,
        FieldInput::Text(_) => None,
    };
    if let Some(photo) = &upload {
        validate_photo(photo.file_name())?;
        validate_photo_name_length(photo.file_name())?;
        if photo.content().is_empty() {
            return Err(StudentValidationError::EmptyPhoto);
        }
    }
    Ok(FieldValue::Photo(upload))
}

/// Raw form submission as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentSubmission {
    text: BTreeMap<String, String>,
    photo: Option<PhotoUpload>,
}

impl StudentSubmission {
    /// Empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style text value setter.
    #[must_use]
    pub fn with_text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_text(field, value);
        self
    }

    /// Builder-style photo setter.
    #[must_use]
    pub fn with_photo(mut self, photo: PhotoUpload) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Record a text value. A repeated field keeps its last value.
    pub fn insert_text(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.text.insert(field.into(), value.into());
    }

    /// Record the uploaded photo.
    pub fn set_photo(&mut self, photo: PhotoUpload) {
        self.photo = Some(photo);
    }

    /// Text value for `field`, if submitted.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.text.get(field).map(String::as_str)
    }

    /// Uploaded photo, if any.
    pub fn photo(&self) -> Option<&PhotoUpload> {
        self.photo.as_ref()
    }

    fn take(&mut self, field: &FormField) -> FieldInput {
        match field.kind {
            FieldKind::File => FieldInput::File(self.photo.take()),
            FieldKind::Text | FieldKind::Email | FieldKind::Integer => {
                FieldInput::Text(self.text.remove(field.name))
            }
        }
    }
}

/// Values echoed back into a re-rendered form.
///
/// The photo input is never echoed; browsers cannot pre-fill file inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub age: String,
}

impl FormValues {
    /// Capture the text values of a submission.
    pub fn from_submission(submission: &StudentSubmission) -> Self {
        let value = |field: &str| submission.text(field).unwrap_or_default().to_owned();
        Self {
            name: value(NAME_FIELD),
            email: value(EMAIL_FIELD),
            age: value(AGE_FIELD),
        }
    }

    /// Pre-fill values from a stored record.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name().to_string(),
            email: student.email().to_string(),
            age: student.age().to_string(),
        }
    }

    /// Value for a schema field name; file fields have none.
    pub fn get(&self, field: &str) -> &str {
        match field {
            NAME_FIELD => &self.name,
            EMAIL_FIELD => &self.email,
            AGE_FIELD => &self.age,
            _ => "",
        }
    }
}

/// A validation message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation messages collected for a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: Vec<FieldError>,
}

impl FormErrors {
    /// Collection holding a single message.
    pub fn single(field: &'static str, error: &StudentValidationError) -> Self {
        let mut errors = Self::default();
        errors.push(field, error);
        errors
    }

    /// Append a message for `field`.
    pub fn push(&mut self, field: &'static str, error: &StudentValidationError) {
        self.entries.push(FieldError {
            field,
            message: error.to_string(),
        });
    }

    /// Messages recorded for `field`, in insertion order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.field == field)
            .map(|entry| entry.message.as_str())
    }

    /// All recorded messages.
    pub fn entries(&self) -> &[FieldError] {
        &self.entries
    }

    /// Whether no message was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Submission whose fields all passed their validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub name: StudentName,
    pub email: Email,
    pub age: Age,
    pub photo: Option<PhotoUpload>,
}

#[derive(Default)]
struct ValidatedBuilder {
    name: Option<StudentName>,
    email: Option<Email>,
    age: Option<Age>,
    photo: Option<PhotoUpload>,
}

impl ValidatedBuilder {
    fn accept(&mut self, value: FieldValue) {
        match value {
            FieldValue::Name(name) => self.name = Some(name),
            FieldValue::Email(email) => self.email = Some(email),
            FieldValue::Age(age) => self.age = Some(age),
            FieldValue::Photo(photo) => self.photo = photo,
        }
    }

    fn build(self) -> Result<ValidatedSubmission, FormErrors> {
        let mut errors = FormErrors::default();
        let required = StudentValidationError::Required;
        if self.name.is_none() {
            errors.push(NAME_FIELD, &required);
        }
        if self.email.is_none() {
            errors.push(EMAIL_FIELD, &required);
        }
        if self.age.is_none() {
            errors.push(AGE_FIELD, &required);
        }
        match (self.name, self.email, self.age) {
            (Some(name), Some(email), Some(age)) => Ok(ValidatedSubmission {
                name,
                email,
                age,
                photo: self.photo,
            }),
            _ => Err(errors),
        }
    }
}

/// Validate every schema field of `submission`.
///
/// # Examples
/// ```
/// use roster::domain::student_form::{validate_submission, StudentSubmission};
///
/// let submission = StudentSubmission::new()
///     .with_text("name", "Ada")
///     .with_text("email", "ada@example.com")
///     .with_text("age", "0");
/// let errors = validate_submission(submission).expect_err("age 0 is rejected");
/// let messages: Vec<_> = errors.for_field("age").collect();
/// assert_eq!(messages, ["Age must be greater than 0"]);
/// ```
pub fn validate_submission(
    mut submission: StudentSubmission,
) -> Result<ValidatedSubmission, FormErrors> {
    let mut errors = FormErrors::default();
    let mut builder = ValidatedBuilder::default();
    for field in &STUDENT_FORM {
        match field.validate(submission.take(field)) {
            Ok(value) => builder.accept(value),
            Err(error) => errors.push(field.name, &error),
        }
    }
    if errors.is_empty() {
        builder.build()
    } else {
        Err(errors)
    }
}
