//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use super::schema::{categories, documents, faculties, recherches, services, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub surname: String,
    #[expect(dead_code, reason = "schema field read only through the profile subset")]
    pub sex: Option<String>,
    #[expect(dead_code, reason = "schema field read only through the profile subset")]
    pub birth_date: Option<NaiveDate>,
    #[expect(dead_code, reason = "schema field read only through the profile subset")]
    pub address: Option<String>,
    pub role: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub photo: Option<String>,
    #[expect(dead_code, reason = "schema field read only through the profile subset")]
    pub faculte_id: Option<i32>,
    #[expect(dead_code, reason = "schema field read only through the profile subset")]
    pub service_id: Option<i32>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub sex: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<&'a str>,
    pub role: Option<&'a str>,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub photo: Option<&'a str>,
    pub faculte_id: Option<i32>,
    pub service_id: Option<i32>,
}

// ---------------------------------------------------------------------------
// Reference-data models (faculties, services, categories)
// ---------------------------------------------------------------------------

/// Row struct for reading from the faculties table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = faculties)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct FacultyRow {
    pub id: i32,
    pub designation: String,
}

/// Insertable struct for creating faculty records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = faculties)]
pub(crate) struct NewFacultyRow<'a> {
    pub designation: &'a str,
}

/// Row struct for reading from the services table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ServiceRow {
    pub id: i32,
    pub designation: String,
}

/// Insertable struct for creating service records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = services)]
pub(crate) struct NewServiceRow<'a> {
    pub designation: &'a str,
}

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub designation: String,
    pub name: String,
}

/// Insertable struct for creating category records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub designation: &'a str,
    pub name: &'a str,
}

/// Changeset struct for replacing category records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryChanges<'a> {
    pub designation: &'a str,
    pub name: &'a str,
}

// ---------------------------------------------------------------------------
// Document models
// ---------------------------------------------------------------------------

/// Row struct for reading from the documents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct DocumentRow {
    pub id: i32,
    pub description: String,
    pub code: String,
    pub url: Option<String>,
    pub date_created: NaiveDateTime,
    pub niveau_conf: i32,
    pub categorie_id: i32,
    pub user_id: Option<i32>,
}

/// Insertable struct for creating document records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub(crate) struct NewDocumentRow<'a> {
    pub description: &'a str,
    pub code: &'a str,
    pub url: Option<&'a str>,
    pub date_created: NaiveDateTime,
    pub niveau_conf: i32,
    pub categorie_id: i32,
    pub user_id: Option<i32>,
}

/// Changeset struct applying the full-field document overwrite.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = documents)]
pub(crate) struct DocumentChanges<'a> {
    pub description: &'a str,
    pub code: &'a str,
    pub url: Option<&'a str>,
    pub niveau_conf: i32,
}

// ---------------------------------------------------------------------------
// Search-log models
// ---------------------------------------------------------------------------

/// Row struct for reading from the recherches table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recherches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RechercheRow {
    pub id: i32,
    pub resultat: bool,
    pub date_recherche: NaiveDateTime,
    pub user_id: i32,
    pub document_id: i32,
}

/// Insertable struct for appending search records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recherches)]
pub(crate) struct NewRechercheRow {
    pub resultat: bool,
    pub date_recherche: NaiveDateTime,
    pub user_id: i32,
    pub document_id: i32,
}
