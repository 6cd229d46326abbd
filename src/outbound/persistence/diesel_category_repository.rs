//! Diesel-backed repository for document categories.
//!
//! Categories carry a designation plus a secondary display label. Deleting a
//! category with documents still attached fails the foreign-key check
//! (ON DELETE RESTRICT) and surfaces as `PersistenceError::ForeignKey`.

use diesel::prelude::*;

use crate::domain::{Category, NewCategory};

use super::diesel_error_mapping::{PersistenceError, map_diesel_error};
use super::models::{CategoryChanges, CategoryRow, NewCategoryRow};
use super::pool::DbPool;
use super::schema::categories;

fn category_from_row(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        designation: row.designation,
        name: row.name,
    }
}

/// Repository for the categories table.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by id.
    pub async fn list(&self) -> Result<Vec<Category>, PersistenceError> {
        self.pool
            .run(|conn| {
                categories::table
                    .order(categories::id)
                    .select(CategoryRow::as_select())
                    .load::<CategoryRow>(conn)
                    .map(|rows| rows.into_iter().map(category_from_row).collect())
                    .map_err(|err| map_diesel_error(err, "list categories"))
            })
            .await
    }

    /// Fetch one category by id.
    pub async fn find(&self, id: i32) -> Result<Option<Category>, PersistenceError> {
        self.pool
            .run(move |conn| {
                categories::table
                    .find(id)
                    .select(CategoryRow::as_select())
                    .first::<CategoryRow>(conn)
                    .optional()
                    .map(|found| found.map(category_from_row))
                    .map_err(|err| map_diesel_error(err, "find category"))
            })
            .await
    }

    /// Insert a category and return the stored row.
    pub async fn create(&self, new: NewCategory) -> Result<Category, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::insert_into(categories::table)
                    .values(NewCategoryRow {
                        designation: &new.designation,
                        name: &new.name,
                    })
                    .get_result::<CategoryRow>(conn)
                    .map(category_from_row)
                    .map_err(|err| map_diesel_error(err, "create category"))
            })
            .await
    }

    /// Replace a category's labels.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches.
    pub async fn update(&self, id: i32, new: NewCategory) -> Result<Category, PersistenceError> {
        self.pool
            .run(move |conn| {
                diesel::update(categories::table.find(id))
                    .set(CategoryChanges {
                        designation: &new.designation,
                        name: &new.name,
                    })
                    .get_result::<CategoryRow>(conn)
                    .map(category_from_row)
                    .map_err(|err| map_diesel_error(err, "update category"))
            })
            .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` when no row matches and
    /// `PersistenceError::ForeignKey` when documents still reference it.
    pub async fn delete(&self, id: i32) -> Result<(), PersistenceError> {
        self.pool
            .run(move |conn| {
                let deleted = diesel::delete(categories::table.find(id))
                    .execute(conn)
                    .map_err(|err| map_diesel_error(err, "delete category"))?;
                if deleted == 0 {
                    return Err(PersistenceError::NotFound);
                }
                Ok(())
            })
            .await
    }
}
