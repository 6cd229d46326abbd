//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides the repositories backing the HTTP handlers, built on
//! SQLite via Diesel with r2d2 connection pooling. Synchronous Diesel work is
//! dispatched to the blocking thread pool through [`DbPool::run`].
//!
//! # Architecture
//!
//! - **Thin adapters**: Repositories only translate between Diesel models and
//!   domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to
//!   [`PersistenceError`] variants; the HTTP layer translates those into the
//!   wire taxonomy.
//!
//! # Example
//!
//! ```ignore
//! use docstore::outbound::persistence::{DbPool, PoolConfig, DieselDocumentRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("docstore.sqlite3"))?;
//! let documents = DieselDocumentRepository::new(pool);
//! ```

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

mod diesel_category_repository;
mod diesel_document_repository;
mod diesel_error_mapping;
mod diesel_reference_repository;
mod diesel_search_repository;
mod diesel_user_repository;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_document_repository::DieselDocumentRepository;
pub use diesel_error_mapping::{PersistenceError, map_diesel_error};
pub use diesel_reference_repository::{DieselFacultyRepository, DieselServiceRepository};
pub use diesel_search_repository::DieselSearchRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// Migrations compiled into the binary and applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply any pending migrations on a connection checked out of the pool.
///
/// # Errors
///
/// Returns `PoolError::Checkout` when no connection is available and
/// `PoolError::Build` wrapping the migration failure otherwise.
pub fn run_migrations(pool: &DbPool) -> Result<(), PoolError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| PoolError::build(format!("migrations failed: {err}")))?;
    Ok(())
}
