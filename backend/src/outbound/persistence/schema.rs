//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Student records.
    ///
    /// `email` carries a unique index; `photo` stores the path of the uploaded
    /// image relative to the media root, or the placeholder name.
    students (id) {
        /// Primary key assigned by the `serial` sequence.
        id -> Int4,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Age in whole years.
        age -> Int4,
        /// Unique contact address (max 254 characters).
        email -> Varchar,
        /// Photo path relative to the media root.
        photo -> Varchar,
    }
}
