//! Shared state injected into HTTP handlers.

use crate::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselDocumentRepository, DieselFacultyRepository,
    DieselSearchRepository, DieselServiceRepository, DieselUserRepository,
};
use crate::outbound::storage::FileStore;

/// Repositories and the file store, one instance per worker.
#[derive(Clone)]
pub struct AppState {
    pub users: DieselUserRepository,
    pub faculties: DieselFacultyRepository,
    pub services: DieselServiceRepository,
    pub categories: DieselCategoryRepository,
    pub documents: DieselDocumentRepository,
    pub searches: DieselSearchRepository,
    pub files: FileStore,
}

impl AppState {
    /// Wire every repository over one shared pool.
    pub fn new(pool: DbPool, files: FileStore) -> Self {
        Self {
            users: DieselUserRepository::new(pool.clone()),
            faculties: DieselFacultyRepository::new(pool.clone()),
            services: DieselServiceRepository::new(pool.clone()),
            categories: DieselCategoryRepository::new(pool.clone()),
            documents: DieselDocumentRepository::new(pool.clone()),
            searches: DieselSearchRepository::new(pool),
            files,
        }
    }
}
