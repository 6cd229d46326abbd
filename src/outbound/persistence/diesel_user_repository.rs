//! Diesel-backed user account repository.
//!
//! Stores registration rows and serves the credential lookup used by login.
//! Password hashes never leave this layer except through
//! [`DieselUserRepository::find_credentials_by_email`], whose callers compare
//! and drop them.

use diesel::prelude::*;

use crate::domain::{NewUser, UserProfile};

use super::diesel_error_mapping::{PersistenceError, map_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Public profile plus the stored hash, for credential verification.
pub(crate) fn profile_from_row(row: &UserRow) -> UserProfile {
    UserProfile {
        id: row.id,
        name: row.name.clone(),
        surname: row.surname.clone(),
        email: row.email.clone(),
        role: row.role.clone(),
        photo: row.photo.clone(),
    }
}

/// Repository for user accounts.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a registration row and return the stored public profile.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` when the email is already taken
    /// and `PersistenceError::ForeignKey` when a faculty or service link
    /// points nowhere.
    pub async fn create(&self, new_user: NewUser) -> Result<UserProfile, PersistenceError> {
        self.pool
            .run(move |conn| {
                let row = NewUserRow {
                    name: &new_user.name,
                    surname: &new_user.surname,
                    sex: new_user.sex.as_deref(),
                    birth_date: new_user.birth_date,
                    address: new_user.address.as_deref(),
                    role: new_user.role.as_deref(),
                    email: &new_user.email,
                    password_hash: &new_user.password_hash,
                    photo: new_user.photo.as_deref(),
                    faculte_id: new_user.faculte_id,
                    service_id: new_user.service_id,
                };
                diesel::insert_into(users::table)
                    .values(&row)
                    .get_result::<UserRow>(conn)
                    .map(|stored| profile_from_row(&stored))
                    .map_err(|err| map_diesel_error(err, "create user"))
            })
            .await
    }

    /// Look up the profile and stored password hash for a login email.
    pub async fn find_credentials_by_email(
        &self,
        email: String,
    ) -> Result<Option<(UserProfile, String)>, PersistenceError> {
        self.pool
            .run(move |conn| {
                users::table
                    .filter(users::email.eq(&email))
                    .select(UserRow::as_select())
                    .first::<UserRow>(conn)
                    .optional()
                    .map(|found| {
                        found.map(|row| (profile_from_row(&row), row.password_hash.clone()))
                    })
                    .map_err(|err| map_diesel_error(err, "find user by email"))
            })
            .await
    }

    /// Fetch a stored public profile by id.
    pub async fn find_profile_by_id(
        &self,
        id: i32,
    ) -> Result<Option<UserProfile>, PersistenceError> {
        self.pool
            .run(move |conn| {
                users::table
                    .find(id)
                    .select(UserRow::as_select())
                    .first::<UserRow>(conn)
                    .optional()
                    .map(|found| found.as_ref().map(profile_from_row))
                    .map_err(|err| map_diesel_error(err, "find user by id"))
            })
            .await
    }

    /// Read a user's faculty and service links.
    ///
    /// Exercised when verifying the ON DELETE SET NULL cascade from the
    /// reference tables.
    pub async fn organisation_refs(
        &self,
        id: i32,
    ) -> Result<(Option<i32>, Option<i32>), PersistenceError> {
        self.pool
            .run(move |conn| {
                users::table
                    .find(id)
                    .select((users::faculte_id, users::service_id))
                    .first::<(Option<i32>, Option<i32>)>(conn)
                    .map_err(|err| map_diesel_error(err, "read organisation refs"))
            })
            .await
    }
}
