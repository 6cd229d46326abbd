//! Diesel-backed repositories for the faculty and service lookup tables.
//!
//! Both tables carry a single free-text `designation`; duplicates are
//! permitted by design, so no uniqueness checks happen here. The two
//! repositories are written out explicitly rather than macro-generated.

use diesel::prelude::*;

use crate::domain::{NewReference, Reference};

use super::diesel_error_mapping::{PersistenceError, map_diesel_error};
use super::models::{FacultyRow, NewFacultyRow, NewServiceRow, ServiceRow};
use super::pool::DbPool;
use super::schema::{faculties, services};

/// Repository for the faculties lookup table.
#[derive(Clone)]
pub struct DieselFacultyRepository {
    pool: DbPool,
}

impl DieselFacultyRepository {
    /// Create a new repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List all faculties ordered by id.
    pub async fn list(&self) -> Result<Vec<Reference>, PersistenceError> {
        self.pool
            .run(|conn| {
                faculties::table
                    .order(faculties::id)
                    .select(FacultyRow::as_select())
                    .load::<FacultyRow>(conn)
                    .map(|rows| {
                        rows.into_iter()
                            .map(|row| Reference {
                                id: row.id,
                                designation: row.designation,
                            })
                            .collect()
                    })
                    .map_err(|err| map_diesel_error(err, "list faculties"))
            })
            .await
    }

    /// Fetch one faculty by id.
    pub async fn find(&self, id: i32) -> Result<Option<Reference>, PersistenceError> {
        self.pool
            .run(move |conn| {
                faculties::table
                    .find(id)
                    .select(FacultyRow::as_select())
                    .first::<FacultyRow>(conn)
                    .optional()
                    .map(|found| {
                        found.map(|row| Reference {
                            id: row.id,
                            designation: row.designation,
                        })
                    })
                    .map_err(|err| map_diesel_error(err, "find faculty"))
            })
            .await
    }

    /// Insert a faculty and return the stored row.
    pub async fn create(&self, new: NewReference) -> Result<Reference, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::insert_into(faculties::table)
                    .values(NewFacultyRow {
                        designation: &new.designation,
                    })
                    .get_result::<FacultyRow>(conn)
                    .map(|row| Reference {
                        id: row.id,
                        designation: row.designation,
                    })
                    .map_err(|err| map_diesel_error(err, "create faculty"))
            })
            .await
    }

    /// Replace a faculty's designation.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches.
    pub async fn update(&self, id: i32, new: NewReference) -> Result<Reference, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::update(faculties::table.find(id))
                    .set(faculties::designation.eq(&new.designation))
                    .get_result::<FacultyRow>(conn)
                    .map(|row| Reference {
                        id: row.id,
                        designation: row.designation,
                    })
                    .map_err(|err| map_diesel_error(err, "update faculty"))
            })
            .await
    }

    /// Delete a faculty. Referencing users fall back to a null link.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches.
    pub async fn delete(&self, id: i32) -> Result<(), PersistenceError> {
        self.pool
            .run(move |conn| {
                let deleted = diesel::delete(faculties::table.find(id))
                    .execute(conn)
                    .map_err(|err| map_diesel_error(err, "delete faculty"))?;
                if deleted == 0 {
                    return Err(PersistenceError::NotFound);
                }
                Ok(())
            })
            .await
    }
}

/// Repository for the services lookup table.
#[derive(Clone)]
pub struct DieselServiceRepository {
    pool: DbPool,
}

impl DieselServiceRepository {
    /// Create a new repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List all services ordered by id.
    pub async fn list(&self) -> Result<Vec<Reference>, PersistenceError> {
        self.pool
            .run(|conn| {
                services::table
                    .order(services::id)
                    .select(ServiceRow::as_select())
                    .load::<ServiceRow>(conn)
                    .map(|rows| {
                        rows.into_iter()
                            .map(|row| Reference {
                                id: row.id,
                                designation: row.designation,
                            })
                            .collect()
                    })
                    .map_err(|err| map_diesel_error(err, "list services"))
            })
            .await
    }

    /// Fetch one service by id.
    pub async fn find(&self, id: i32) -> Result<Option<Reference>, PersistenceError> {
        self.pool
            .run(move |conn| {
                services::table
                    .find(id)
                    .select(ServiceRow::as_select())
                    .first::<ServiceRow>(conn)
                    .optional()
                    .map(|found| {
                        found.map(|row| Reference {
                            id: row.id,
                            designation: row.designation,
                        })
                    })
                    .map_err(|err| map_diesel_error(err, "find service"))
            })
            .await
    }

    /// Insert a service and return the stored row.
    pub async fn create(&self, new: NewReference) -> Result<Reference, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::insert_into(services::table)
                    .values(NewServiceRow {
                        designation: &new.designation,
                    })
                    .get_result::<ServiceRow>(conn)
                    .map(|row| Reference {
                        id: row.id,
                        designation: row.designation,
                    })
                    .map_err(|err| map_diesel_error(err, "create service"))
            })
            .await
    }

    /// Replace a service's designation.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches.
    pub async fn update(&self, id: i32, new: NewReference) -> Result<Reference, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::update(services::table.find(id))
                    .set(services::designation.eq(&new.designation))
                    .get_result::<ServiceRow>(conn)
                    .map(|row| Reference {
                        id: row.id,
                        designation: row.designation,
                    })
                    .map_err(|err| map_diesel_error(err, "update service"))
            })
            .await
    }

    /// Delete a service. Referencing users fall back to a null link.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches.
    pub async fn delete(&self, id: i32) -> Result<(), PersistenceError> {
        self.pool
            .run(move |conn| {
                let deleted = diesel::delete(services::table.find(id))
                    .execute(conn)
                    .map_err(|err| map_diesel_error(err, "delete service"))?;
                if deleted == 0 {
                    return Err(PersistenceError::NotFound);
                }
                Ok(())
            })
            .await
    }
}
