//! HTML page rendering.
//!
//! Pages are assembled from the form schema and domain records. Every
//! interpolated value passes through [`escape`].

use crate::domain::Student;
use crate::domain::student_form::{FieldKind, FormErrors, FormField, FormValues, STUDENT_FORM};

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<nav>\
         <a href=\"/\">Home</a> | <a href=\"/students/\">Add student</a> | \
         <a href=\"/students_list/\">Students</a></nav>\n<main>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Landing page.
pub fn landing() -> String {
    layout(
        "Students",
        "<h1>Students</h1>\n<p>Keep track of students and their photos.</p>\n\
         <p><a href=\"/students/\">Add a student</a> or \
         <a href=\"/students_list/\">browse the list</a>.</p>\n",
    )
}

/// Everything needed to render the create or edit form.
#[derive(Debug, Clone, Copy)]
pub struct FormPage<'a> {
    pub heading: &'a str,
    pub action: &'a str,
    pub values: &'a FormValues,
    pub errors: Option<&'a FormErrors>,
    /// Link to the stored photo shown above the file input when editing.
    pub current_photo: Option<&'a str>,
}

fn render_field(out: &mut String, field: &FormField, page: &FormPage<'_>) {
    let name = field.name;
    out.push_str(&format!(
        "<p>\n<label for=\"id_{name}\">{label}:</label>\n",
        label = escape(field.label)
    ));
    if let Some(errors) = page.errors {
        let messages: Vec<_> = errors.for_field(name).collect();
        if !messages.is_empty() {
            out.push_str("<ul class=\"errorlist\">");
            for message in messages {
                out.push_str(&format!("<li>{}</li>", escape(message)));
            }
            out.push_str("</ul>\n");
        }
    }
    let required = if field.required { " required" } else { "" };
    match field.kind {
        FieldKind::File => {
            if let Some(photo) = page.current_photo {
                out.push_str(&format!(
                    "Currently: <a href=\"{href}\">{href}</a><br>\n",
                    href = escape(photo)
                ));
            }
            out.push_str(&format!(
                "<input type=\"file\" name=\"{name}\" id=\"id_{name}\" accept=\"image/*\"{required}>\n"
            ));
        }
        FieldKind::Text | FieldKind::Email | FieldKind::Integer => {
            out.push_str(&format!(
                "<input type=\"{kind}\" name=\"{name}\" id=\"id_{name}\" value=\"{value}\"{required}>\n",
                kind = field.kind.input_type(),
                value = escape(page.values.get(name)),
            ));
        }
    }
    out.push_str("</p>\n");
}

/// Create or edit form, with any validation messages next to their fields.
pub fn student_form(page: &FormPage<'_>) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(page.heading));
    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\" enctype=\"multipart/form-data\">\n",
        escape(page.action)
    ));
    for field in &STUDENT_FORM {
        render_field(&mut body, field, page);
    }
    body.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    layout(page.heading, &body)
}

/// Table of every record with edit and delete links.
pub fn student_list(students: &[Student], media_url: &str) -> String {
    let mut body = String::from("<h1>Students</h1>\n");
    if students.is_empty() {
        body.push_str("<p>No students yet.</p>\n");
        return layout("Students", &body);
    }
    body.push_str(
        "<table>\n<thead><tr><th>Photo</th><th>Name</th><th>Email</th><th>Age</th>\
         <th></th></tr></thead>\n<tbody>\n",
    );
    for student in students {
        let id = student.id();
        body.push_str(&format!(
            "<tr><td><img src=\"{src}\" alt=\"{name}\" width=\"64\"></td>\
             <td>{name}</td><td>{email}</td><td>{age}</td>\
             <td><a href=\"/edit_student/{id}\">Edit</a> \
             <a href=\"/delete_stud/{id}\">Delete</a></td></tr>\n",
            src = escape(&format!("{media_url}{}", student.photo())),
            name = escape(student.name().as_ref()),
            email = escape(student.email().as_ref()),
            age = student.age(),
        ));
    }
    body.push_str("</tbody>\n</table>\n");
    layout("Students", &body)
}

/// Error page shown for not-found and infrastructure failures.
pub fn error_page(status: u16, reason: &str, message: &str, trace_id: Option<&str>) -> String {
    let mut body = format!(
        "<h1>{status} {reason}</h1>\n<p>{message}</p>\n",
        reason = escape(reason),
        message = escape(message),
    );
    if let Some(trace_id) = trace_id {
        body.push_str(&format!("<p><small>Trace id: {}</small></p>\n", escape(trace_id)));
    }
    layout(reason, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student_form::{AGE_FIELD, EMAIL_FIELD};
    use crate::domain::{
        Age, Email, PhotoRef, StudentDetails, StudentId, StudentName, StudentValidationError,
    };
    use rstest::rstest;

    fn values() -> FormValues {
        FormValues {
            name: "<b>Ada</b>".to_owned(),
            email: "ada@example.com".to_owned(),
            age: "0".to_owned(),
        }
    }

    #[rstest]
    #[case("a&b", "a&amp;b")]
    #[case("<script>\"x\"</script>", "&lt;script&gt;&quot;x&quot;&lt;/script&gt;")]
    #[case("it's", "it&#x27;s")]
    fn escape_replaces_markup(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape(raw), expected);
    }

    #[rstest]
    fn form_echoes_escaped_values_and_errors() {
        let values = values();
        let errors = FormErrors::single(AGE_FIELD, &StudentValidationError::AgeTooLow);
        let html = student_form(&FormPage {
            heading: "Add student",
            action: "/students/",
            values: &values,
            errors: Some(&errors),
            current_photo: None,
        });

        assert!(html.contains("value=\"&lt;b&gt;Ada&lt;/b&gt;\""));
        assert!(html.contains("<li>Age must be greater than 0</li>"));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("type=\"file\" name=\"photo\""));
        assert!(!html.contains("<b>Ada</b>"));
    }

    #[rstest]
    fn fields_render_in_schema_order() {
        let html = student_form(&FormPage {
            heading: "Add student",
            action: "/students/",
            values: &FormValues::default(),
            errors: None,
            current_photo: None,
        });
        let position = |needle: &str| html.find(needle).expect("field rendered");
        assert!(position("name=\"name\"") < position(&format!("name=\"{EMAIL_FIELD}\"")));
        assert!(position("name=\"email\"") < position("name=\"age\""));
        assert!(position("name=\"age\"") < position("name=\"photo\""));
        assert!(!html.contains("errorlist"));
    }

    #[rstest]
    fn list_links_photos_and_actions() {
        let student = Student::new(
            StudentId::new(3).expect("id"),
            StudentDetails {
                name: StudentName::new("Ada").expect("name"),
                age: Age::new(36).expect("age"),
                email: Email::new("ada@example.com").expect("email"),
                photo: PhotoRef::new("students/photos/ada.png").expect("photo"),
            },
        );
        let html = student_list(&[student], "/media/");

        assert!(html.contains("src=\"/media/students/photos/ada.png\""));
        assert!(html.contains("href=\"/edit_student/3\""));
        assert!(html.contains("href=\"/delete_stud/3\""));
        assert!(html.contains("<td>36</td>"));
    }

    #[rstest]
    fn empty_list_says_so() {
        assert!(student_list(&[], "/media/").contains("No students yet."));
    }

    #[rstest]
    fn edit_form_links_the_current_photo() {
        let html = student_form(&FormPage {
            heading: "Edit student",
            action: "/edit_student/3",
            values: &FormValues::default(),
            errors: None,
            current_photo: Some("/media/students/photos/a&b.png"),
        });

        assert!(html.contains(
            "Currently: <a href=\"/media/students/photos/a&amp;b.png\">/media/students/photos/a&amp;b.png</a>"
        ));
        assert!(html.contains("action=\"/edit_student/3\""));
    }

    #[rstest]
    #[case(Some("abc-123"), true)]
    #[case(None, false)]
    fn error_page_shows_the_trace_id_when_present(
        #[case] trace_id: Option<&str>,
        #[case] shown: bool,
    ) {
        let html = error_page(503, "Service Unavailable", "<down>", trace_id);

        assert!(html.contains("<h1>503 Service Unavailable</h1>"));
        assert!(html.contains("<p>&lt;down&gt;</p>"));
        assert_eq!(html.contains("<p><small>Trace id: abc-123</small></p>"), shown);
    }
}
