//! Shared helpers for roster integration tests.
//!
//! Integration tests compile as separate crates, so the multipart builder
//! and the database gate live here rather than in the library.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use actix_web::http::header;
use actix_web::test::TestRequest;

/// Environment variable naming the PostgreSQL database used by adapter tests.
pub const TEST_DATABASE_URL: &str = "ROSTER_TEST_DATABASE_URL";

const BOUNDARY: &str = "roster-integration-boundary";

/// Database URL for adapter tests, or `None` after printing a skip marker.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL} is not set");
            None
        }
    }
}

/// Hand-built `multipart/form-data` request body.
#[derive(Debug, Default)]
pub struct FormBody {
    bytes: Vec<u8>,
}

impl FormBody {
    /// Student form text parts.
    pub fn student(name: &str, email: &str, age: &str) -> Self {
        Self::default()
            .text("name", name)
            .text("email", email)
            .text("age", age)
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn photo(mut self, file_name: &str, content: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; \
                 filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(content);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// Finish the body as a POST to `uri`.
    pub fn post(mut self, uri: &str) -> TestRequest {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(self.bytes)
    }
}
