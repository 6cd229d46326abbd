//! Diesel-backed repository for uploaded documents.
//!
//! Listing uses INNER JOIN semantics on both the category and the uploader,
//! so rows whose category or uploader no longer exists are silently omitted.
//! Deletion returns the stored filename so the HTTP layer can remove the
//! on-disk file alongside the row.

use diesel::prelude::*;

use crate::domain::{Document, DocumentListing, DocumentUpdate, NewDocument};

use super::diesel_error_mapping::{PersistenceError, map_diesel_error};
use super::models::{DocumentChanges, DocumentRow, NewDocumentRow};
use super::pool::DbPool;
use super::schema::{categories, documents, users};

fn document_from_row(row: DocumentRow) -> Document {
    Document {
        id: row.id,
        description: row.description,
        code: row.code,
        url: row.url,
        date_created: row.date_created,
        niveau_conf: row.niveau_conf,
        categorie_id: row.categorie_id,
        user_id: row.user_id,
    }
}

/// Joined listing row: document columns, the uploader id, and the category
/// designation. The join forces `user_id` to be non-null.
type ListingTuple = (
    i32,
    String,
    String,
    Option<String>,
    chrono::NaiveDateTime,
    i32,
    i32,
    i32,
    String,
);

fn listing_from_tuple(row: ListingTuple) -> DocumentListing {
    let (id, description, code, url, date_created, niveau_conf, categorie_id, user_id, designation) =
        row;
    DocumentListing {
        id,
        description,
        code,
        url,
        date_created,
        niveau_conf,
        categorie_id,
        user_id,
        categorie_designation: designation,
    }
}

/// Repository for the documents table.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List all documents joined with their category designation.
    ///
    /// Rows failing the category or uploader join are omitted.
    pub async fn list(&self) -> Result<Vec<DocumentListing>, PersistenceError> {
        self.pool
            .run(|conn| {
                documents::table
                    .inner_join(categories::table)
                    .inner_join(users::table)
                    .order(documents::id)
                    .select((
                        documents::id,
                        documents::description,
                        documents::code,
                        documents::url,
                        documents::date_created,
                        documents::niveau_conf,
                        documents::categorie_id,
                        users::id,
                        categories::designation,
                    ))
                    .load::<ListingTuple>(conn)
                    .map(|rows| rows.into_iter().map(listing_from_tuple).collect())
                    .map_err(|err| map_diesel_error(err, "list documents"))
            })
            .await
    }

    /// Fetch one document by id.
    pub async fn find(&self, id: i32) -> Result<Option<Document>, PersistenceError> {
        self.pool
            .run(move |conn| {
                documents::table
                    .find(id)
                    .select(DocumentRow::as_select())
                    .first::<DocumentRow>(conn)
                    .optional()
                    .map(|found| found.map(document_from_row))
                    .map_err(|err| map_diesel_error(err, "find document"))
            })
            .await
    }

    /// Insert a document row and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKey` when the category or uploader
    /// reference points nowhere.
    pub async fn create(&self, new: NewDocument) -> Result<Document, PersistenceError> {
        self.pool
            .run(move |conn| {
                let row = NewDocumentRow {
                    description: &new.description,
                    code: &new.code,
                    url: Some(&new.url),
                    date_created: new.date_created,
                    niveau_conf: new.niveau_conf,
                    categorie_id: new.categorie_id,
                    user_id: Some(new.user_id),
                };
                diesel::insert_into(documents::table)
                    .values(&row)
                    .get_result::<DocumentRow>(conn)
                    .map(document_from_row)
                    .map_err(|err| map_diesel_error(err, "create document"))
            })
            .await
    }

    /// Apply the full-field overwrite and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches.
    pub async fn update(
        &self,
        id: i32,
        update: DocumentUpdate,
    ) -> Result<Document, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::update(documents::table.find(id))
                    .set(DocumentChanges {
                        description: &update.description,
                        code: &update.code,
                        url: Some(&update.url),
                        niveau_conf: update.niveau_conf,
                    })
                    .get_result::<DocumentRow>(conn)
                    .map(document_from_row)
                    .map_err(|err| map_diesel_error(err, "update document"))
            })
            .await
    }

    /// Delete a document row and return its stored filename, if any.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches.
    pub async fn delete(&self, id: i32) -> Result<Option<String>, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::delete(documents::table.find(id))
                    .returning(documents::url)
                    .get_result::<Option<String>>(conn)
                    .map_err(|err| map_diesel_error(err, "delete document"))
            })
            .await
    }
}
