//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::students;

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub email: String,
    pub photo: String,
}

/// Insertable struct for creating new student records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub name: &'a str,
    pub age: i32,
    pub email: &'a str,
    pub photo: &'a str,
}

/// Changeset struct for replacing the fields of an existing record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentChangeset<'a> {
    pub name: &'a str,
    pub age: i32,
    pub email: &'a str,
    pub photo: &'a str,
}
