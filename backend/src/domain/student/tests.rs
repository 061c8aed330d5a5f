//! Regression coverage for student value types and validators.

use super::*;
use rstest::rstest;

fn student(id: i32, email: &str) -> Student {
    Student::new(
        StudentId::new(id).expect("valid id"),
        StudentDetails {
            name: StudentName::new("Ada Lovelace").expect("valid name"),
            age: Age::new(36).expect("valid age"),
            email: Email::new(email).expect("valid email"),
            photo: PhotoRef::placeholder(),
        },
    )
}

#[rstest]
#[case(i64::MIN, Err(StudentValidationError::AgeTooLow))]
#[case(-1, Err(StudentValidationError::AgeTooLow))]
#[case(0, Err(StudentValidationError::AgeTooLow))]
#[case(1, Ok(()))]
#[case(64, Ok(()))]
#[case(129, Ok(()))]
#[case(130, Err(StudentValidationError::AgeTooHigh))]
#[case(i64::MAX, Err(StudentValidationError::AgeTooHigh))]
fn validate_age_accepts_only_one_to_one_twenty_nine(
    #[case] value: i64,
    #[case] expected: Result<(), StudentValidationError>,
) {
    assert_eq!(validate_age(value), expected);
}

#[test]
fn age_passes_iff_within_bounds() {
    for value in -5..=140 {
        assert_eq!(
            validate_age(value).is_ok(),
            (1..=129).contains(&value),
            "age {value}"
        );
        assert_eq!(Age::new(value).is_ok(), (1..=129).contains(&value));
    }
}

#[rstest]
#[case(StudentValidationError::AgeTooLow, "Age must be greater than 0")]
#[case(StudentValidationError::AgeTooHigh, "Age can not be more than 130")]
#[case(StudentValidationError::Required, "This field is required.")]
fn age_messages_match_form_copy(#[case] error: StudentValidationError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
#[case("sad.jpg")]
#[case("SAD.JPG")]
#[case("Sad.Jpg")]
fn validate_photo_rejects_placeholder_name_in_any_case(#[case] name: &str) {
    assert_eq!(
        validate_photo(name),
        Err(StudentValidationError::PlaceholderPhoto)
    );
}

#[rstest]
#[case("happy.jpg")]
#[case("sad.jpeg")]
#[case("sad.jpg.png")]
#[case("my sad.jpg")]
fn validate_photo_accepts_other_names(#[case] name: &str) {
    assert!(validate_photo(name).is_ok());
}

#[rstest]
#[case(PHOTO_NAME_MAX, Ok(()))]
#[case(PHOTO_NAME_MAX + 1, Err(StudentValidationError::PhotoNameTooLong { max: PHOTO_NAME_MAX, actual: PHOTO_NAME_MAX + 1 }))]
fn photo_names_are_bounded(
    #[case] length: usize,
    #[case] expected: Result<(), StudentValidationError>,
) {
    assert_eq!(validate_photo_name_length(&"p".repeat(length)), expected);
}

#[rstest]
fn photo_ref_longer_than_the_column_is_refused() {
    let err = PhotoRef::new("p".repeat(PHOTO_REF_MAX + 1)).expect_err("too long");
    assert_eq!(
        err,
        StudentValidationError::TooLong {
            max: PHOTO_REF_MAX,
            actual: PHOTO_REF_MAX + 1
        }
    );
    assert!(PhotoRef::new("p".repeat(PHOTO_REF_MAX)).is_ok());
}

#[rstest]
fn upload_keeps_only_the_base_file_name() {
    let upload = PhotoUpload::new(r"C:\Users\ada\sad.jpg", vec![1]);
    assert_eq!(upload.file_name(), "sad.jpg");
    let upload = PhotoUpload::new("photos/portrait.png", vec![1]);
    assert_eq!(upload.file_name(), "portrait.png");
}

#[rstest]
#[case("ada@example.com")]
#[case("first.last+tag@mail.example.org")]
#[case("  padded@example.com  ")]
fn email_accepts_valid_addresses(#[case] value: &str) {
    let email = Email::new(value).expect("valid email");
    assert_eq!(email.as_ref(), value.trim());
}

#[rstest]
#[case("plainaddress", StudentValidationError::InvalidEmail)]
#[case("missing-domain@", StudentValidationError::InvalidEmail)]
#[case("no-dot@localhost", StudentValidationError::InvalidEmail)]
#[case("two@@example.com", StudentValidationError::InvalidEmail)]
#[case("dots..here@example.com", StudentValidationError::InvalidEmail)]
#[case("   ", StudentValidationError::Required)]
fn email_rejects_invalid_addresses(
    #[case] value: &str,
    #[case] expected: StudentValidationError,
) {
    assert_eq!(Email::new(value), Err(expected));
}

#[rstest]
fn email_rejects_overlong_addresses() {
    let value = format!("{}@example.com", "a".repeat(250));
    assert!(matches!(
        Email::new(value),
        Err(StudentValidationError::TooLong { max: EMAIL_MAX, .. })
    ));
}

#[rstest]
fn name_is_trimmed_and_bounded() {
    assert_eq!(
        StudentName::new("  Grace  ").expect("valid name").as_ref(),
        "Grace"
    );
    assert_eq!(StudentName::new(""), Err(StudentValidationError::Required));
    assert_eq!(
        StudentName::new("x".repeat(NAME_MAX + 1)),
        Err(StudentValidationError::TooLong {
            max: NAME_MAX,
            actual: NAME_MAX + 1
        })
    );
    assert!(StudentName::new("x".repeat(NAME_MAX)).is_ok());
}

#[rstest]
fn unique_email_rejects_other_records() {
    let records = vec![student(1, "ada@example.com"), student(2, "grace@example.com")];
    let email = Email::new("grace@example.com").expect("valid email");

    assert_eq!(
        validate_email_unique(&email, &records, None),
        Err(StudentValidationError::DuplicateEmail)
    );
    assert_eq!(
        validate_email_unique(&email, &records, StudentId::new(1).ok()),
        Err(StudentValidationError::DuplicateEmail)
    );
}

#[rstest]
fn unique_email_excludes_the_record_being_edited() {
    let records = vec![student(1, "ada@example.com")];
    let email = Email::new("ada@example.com").expect("valid email");

    assert!(validate_email_unique(&email, &records, StudentId::new(1).ok()).is_ok());
}

#[rstest]
#[case(0)]
#[case(-3)]
fn student_id_must_be_positive(#[case] value: i32) {
    assert_eq!(StudentId::new(value), Err(StudentValidationError::InvalidId));
}

#[rstest]
fn photo_ref_defaults_to_placeholder() {
    let photo = PhotoRef::default();
    assert!(photo.is_placeholder());
    assert_eq!(photo.as_ref(), DEFAULT_PHOTO);
    assert_eq!(PhotoRef::new(" "), Err(StudentValidationError::EmptyPhotoRef));
}
