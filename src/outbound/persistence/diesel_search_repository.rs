//! Diesel-backed repository for the append-only search log.
//!
//! Inserts rely on foreign-key enforcement rather than pre-checks: a search
//! naming a missing user or document fails with
//! `PersistenceError::ForeignKey`. Listing joins the requester profile, the
//! requester's organisational designations (left joins), and the document.

use diesel::prelude::*;

use crate::domain::{NewSearchLog, SearchLog, SearchLogListing};

use super::diesel_error_mapping::{PersistenceError, map_diesel_error};
use super::models::{NewRechercheRow, RechercheRow};
use super::pool::DbPool;
use super::schema::{documents, faculties, recherches, services, users};

fn search_from_row(row: RechercheRow) -> SearchLog {
    SearchLog {
        id: row.id,
        resultat: row.resultat,
        date_recherche: row.date_recherche,
        user_id: row.user_id,
        document_id: row.document_id,
    }
}

/// Joined listing row: search columns, requester profile fields, nullable
/// organisational designations, and document context.
type ListingTuple = (
    i32,
    bool,
    chrono::NaiveDateTime,
    i32,
    i32,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
);

fn listing_from_tuple(row: ListingTuple) -> SearchLogListing {
    let (
        id,
        resultat,
        date_recherche,
        user_id,
        document_id,
        user_name,
        user_surname,
        user_email,
        faculte_designation,
        service_designation,
        document_description,
        document_code,
    ) = row;
    SearchLogListing {
        id,
        resultat,
        date_recherche,
        user_id,
        document_id,
        user_name,
        user_surname,
        user_email,
        faculte_designation,
        service_designation,
        document_description,
        document_code,
    }
}

/// Repository for the recherches table.
#[derive(Clone)]
pub struct DieselSearchRepository {
    pool: DbPool,
}

impl DieselSearchRepository {
    /// Create a new repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append a search record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKey` when the user or document id
    /// points nowhere.
    pub async fn create(&self, new: NewSearchLog) -> Result<SearchLog, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::insert_into(recherches::table)
                    .values(NewRechercheRow {
                        resultat: new.resultat,
                        date_recherche: new.date_recherche,
                        user_id: new.user_id,
                        document_id: new.document_id,
                    })
                    .get_result::<RechercheRow>(conn)
                    .map(search_from_row)
                    .map_err(|err| map_diesel_error(err, "record search"))
            })
            .await
    }

    /// List all search records joined with requester and document context.
    pub async fn list(&self) -> Result<Vec<SearchLogListing>, PersistenceError> {
        self.pool
            .run(|conn| {
                recherches::table
                    .inner_join(
                        users::table
                            .left_join(faculties::table)
                            .left_join(services::table),
                    )
                    .inner_join(documents::table)
                    .order(recherches::id)
                    .select((
                        recherches::id,
                        recherches::resultat,
                        recherches::date_recherche,
                        recherches::user_id,
                        recherches::document_id,
                        users::name,
                        users::surname,
                        users::email,
                        faculties::designation.nullable(),
                        services::designation.nullable(),
                        documents::description,
                        documents::code,
                    ))
                    .load::<ListingTuple>(conn)
                    .map(|rows| rows.into_iter().map(listing_from_tuple).collect())
                    .map_err(|err| map_diesel_error(err, "list searches"))
            })
            .await
    }

    /// Delete a search record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches.
    pub async fn delete(&self, id: i32) -> Result<(), PersistenceError> {
        self.pool
            .run(move |conn| {
                let deleted = diesel::delete(recherches::table.find(id))
                    .execute(conn)
                    .map_err(|err| map_diesel_error(err, "delete search"))?;
                if deleted == 0 {
                    return Err(PersistenceError::NotFound);
                }
                Ok(())
            })
            .await
    }

    /// Count stored search rows.
    ///
    /// Exercised when verifying the ON DELETE CASCADE from users and
    /// documents.
    pub async fn count(&self) -> Result<i64, PersistenceError> {
        self.pool
            .run(|conn| {
                recherches::table
                    .count()
                    .get_result(conn)
                    .map_err(|err| map_diesel_error(err, "count searches"))
            })
            .await
    }
}
