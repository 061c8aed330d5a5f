//! Student record model and the field-level validation rules applied before a
//! record is written.
//!
//! Every value type here is constructed through a validating constructor, so a
//! [`StudentDetails`] in hand is known to satisfy the per-field rules. Email
//! uniqueness depends on the store and is checked separately through
//! [`validate_email_unique`].

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Photo reference assigned when no photo was uploaded.
pub const DEFAULT_PHOTO: &str = "sad.jpg";
/// Maximum number of characters in a student name.
pub const NAME_MAX: usize = 100;
/// Maximum number of characters in an email address.
pub const EMAIL_MAX: usize = 254;
/// Smallest accepted age.
pub const AGE_MIN: i64 = 1;
/// First rejected age above the accepted range.
pub const AGE_LIMIT: i64 = 130;
/// Maximum number of characters in an uploaded photo's file name.
pub const PHOTO_NAME_MAX: usize = 100;
/// Maximum length of a stored photo reference; matches the `photo` column.
pub const PHOTO_REF_MAX: usize = 255;

/// Field-level validation failures.
///
/// The display strings are the messages shown next to the offending form
/// field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// A required field was missing or blank.
    #[error("This field is required.")]
    Required,
    /// A text field exceeded its maximum length.
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },
    /// The age field did not contain an integer.
    #[error("Enter a whole number.")]
    NotANumber,
    /// Age below [`AGE_MIN`].
    #[error("Age must be greater than 0")]
    AgeTooLow,
    /// Age at or above [`AGE_LIMIT`].
    #[error("Age can not be more than 130")]
    AgeTooHigh,
    /// The email address is not syntactically valid.
    #[error("Enter a valid email address.")]
    InvalidEmail,
    /// Another record already uses the email address.
    #[error("Student with this Email already exists.")]
    DuplicateEmail,
    /// The uploaded photo carries the placeholder file name.
    #[error("Photo rejected: upload a real photo")]
    PlaceholderPhoto,
    /// The uploaded photo's file name exceeds [`PHOTO_NAME_MAX`].
    #[error("Ensure this filename has at most {max} characters (it has {actual}).")]
    PhotoNameTooLong { max: usize, actual: usize },
    /// The uploaded photo has no content.
    #[error("The submitted file is empty.")]
    EmptyPhoto,
    /// A record identifier was zero or negative.
    #[error("student id must be a positive integer")]
    InvalidId,
    /// A stored photo reference was blank.
    #[error("photo reference must not be empty")]
    EmptyPhotoRef,
}

/// Store-assigned student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentId(i32);

impl StudentId {
    /// Validate and construct an identifier.
    pub fn new(value: i32) -> Result<Self, StudentValidationError> {
        if value < 1 {
            return Err(StudentValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    /// Raw integer value as stored.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Student display name: non-blank, at most [`NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentName(String);

impl StudentName {
    /// Validate and construct a name. Surrounding whitespace is stripped.
    pub fn new(value: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::Required);
        }
        let actual = trimmed.chars().count();
        if actual > NAME_MAX {
            return Err(StudentValidationError::TooLong {
                max: NAME_MAX,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for StudentName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check an age against the accepted range `AGE_MIN..AGE_LIMIT`.
///
/// # Examples
/// ```
/// use roster::domain::{validate_age, StudentValidationError};
///
/// assert!(validate_age(1).is_ok());
/// assert!(validate_age(129).is_ok());
/// assert_eq!(validate_age(0), Err(StudentValidationError::AgeTooLow));
/// assert_eq!(validate_age(130), Err(StudentValidationError::AgeTooHigh));
/// ```
pub fn validate_age(value: i64) -> Result<(), StudentValidationError> {
    if value < AGE_MIN {
        Err(StudentValidationError::AgeTooLow)
    } else if value >= AGE_LIMIT {
        Err(StudentValidationError::AgeTooHigh)
    } else {
        Ok(())
    }
}

/// Student age in whole years, always within `1..=129`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(u8);

impl Age {
    /// Validate and construct an age.
    pub fn new(value: i64) -> Result<Self, StudentValidationError> {
        validate_age(value)?;
        u8::try_from(value)
            .map(Self)
            .map_err(|_| StudentValidationError::AgeTooHigh)
    }

    /// Age in years.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot-atom local part; the domain needs at least one dot.
        let pattern = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address. Surrounding whitespace is
    /// stripped; the address is otherwise kept as entered.
    pub fn new(value: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StudentValidationError::Required);
        }
        let actual = trimmed.chars().count();
        if actual > EMAIL_MAX {
            return Err(StudentValidationError::TooLong {
                max: EMAIL_MAX,
                actual,
            });
        }
        if !email_regex().is_match(trimmed) || trimmed.contains("..") {
            return Err(StudentValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reject `email` when a record other than `editing` already uses it.
///
/// `existing` is every stored record that could share the address; passing
/// the result of an email lookup is sufficient.
///
/// # Examples
/// ```
/// use roster::domain::{validate_email_unique, Email, Student, StudentValidationError};
///
/// let email = Email::new("ada@example.com").expect("valid email");
/// let none: Vec<Student> = Vec::new();
/// assert!(validate_email_unique(&email, &none, None).is_ok());
/// ```
pub fn validate_email_unique<'a, I>(
    email: &Email,
    existing: I,
    editing: Option<StudentId>,
) -> Result<(), StudentValidationError>
where
    I: IntoIterator<Item = &'a Student>,
{
    let clash = existing
        .into_iter()
        .filter(|student| Some(student.id()) != editing)
        .any(|student| student.email() == email);
    if clash {
        Err(StudentValidationError::DuplicateEmail)
    } else {
        Ok(())
    }
}

/// Check an uploaded photo's file name.
///
/// The placeholder name is refused in any letter case even though it is also
/// the value stored when no photo is uploaded.
///
/// # Examples
/// ```
/// use roster::domain::validate_photo;
///
/// assert!(validate_photo("SAD.JPG").is_err());
/// assert!(validate_photo("happy.jpg").is_ok());
/// ```
pub fn validate_photo(file_name: &str) -> Result<(), StudentValidationError> {
    if file_name.eq_ignore_ascii_case(DEFAULT_PHOTO) {
        Err(StudentValidationError::PlaceholderPhoto)
    } else {
        Ok(())
    }
}

/// Check an uploaded photo's file name against [`PHOTO_NAME_MAX`].
///
/// # Examples
/// ```
/// use roster::domain::{PHOTO_NAME_MAX, validate_photo_name_length};
///
/// assert!(validate_photo_name_length("portrait.png").is_ok());
/// let long = format!("{}.png", "a".repeat(PHOTO_NAME_MAX));
/// assert!(validate_photo_name_length(&long).is_err());
/// ```
pub fn validate_photo_name_length(file_name: &str) -> Result<(), StudentValidationError> {
    let actual = file_name.chars().count();
    if actual > PHOTO_NAME_MAX {
        Err(StudentValidationError::PhotoNameTooLong {
            max: PHOTO_NAME_MAX,
            actual,
        })
    } else {
        Ok(())
    }
}

/// Location of a stored photo relative to the media root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Wrap a stored photo path.
    pub fn new(path: impl Into<String>) -> Result<Self, StudentValidationError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(StudentValidationError::EmptyPhotoRef);
        }
        let actual = path.chars().count();
        if actual > PHOTO_REF_MAX {
            return Err(StudentValidationError::TooLong {
                max: PHOTO_REF_MAX,
                actual,
            });
        }
        Ok(Self(path))
    }

    /// Reference used when no photo was uploaded.
    pub fn placeholder() -> Self {
        Self(DEFAULT_PHOTO.to_owned())
    }

    /// Whether this is the placeholder reference.
    pub fn is_placeholder(&self) -> bool {
        self.0 == DEFAULT_PHOTO
    }
}

impl Default for PhotoRef {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl AsRef<str> for PhotoRef {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Photo file received with a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    file_name: String,
    content: Vec<u8>,
}

impl PhotoUpload {
    /// Build an upload. Client-side directory components are dropped from
    /// the file name so only the base name is kept.
    pub fn new(file_name: impl AsRef<str>, content: Vec<u8>) -> Self {
        let raw = file_name.as_ref();
        let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
        Self {
            file_name: base.to_owned(),
            content,
        }
    }

    /// Base file name supplied by the client.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Raw file bytes.
    pub fn content(&self) -> &[u8] {
        self.content.as_slice()
    }
}

/// Validated field values of a student record, without its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub name: StudentName,
    pub age: Age,
    pub email: Email,
    pub photo: PhotoRef,
}

/// Stored student record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    details: StudentDetails,
}

impl Student {
    /// Combine an identifier with validated details.
    pub fn new(id: StudentId, details: StudentDetails) -> Self {
        Self { id, details }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> StudentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &StudentName {
        &self.details.name
    }

    /// Age in years.
    pub fn age(&self) -> Age {
        self.details.age
    }

    /// Unique email address.
    pub fn email(&self) -> &Email {
        &self.details.email
    }

    /// Stored photo reference.
    pub fn photo(&self) -> &PhotoRef {
        &self.details.photo
    }

    /// All field values.
    pub fn details(&self) -> &StudentDetails {
        &self.details
    }
}

#[cfg(test)]
mod tests;
