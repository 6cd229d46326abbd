//! Shared fixtures for unit tests (in `src/`) and integration tests (in
//! `tests/`). Only compiled for tests or with the `test-support` feature.

use actix_web::web;
use diesel_migrations::MigrationHarness;
use tempfile::{NamedTempFile, TempDir};

use crate::inbound::http::state::AppState;
use crate::outbound::persistence::{DbPool, MIGRATIONS, PoolConfig};
use crate::outbound::storage::FileStore;

/// A migrated throwaway database plus an uploads directory.
///
/// Both live in temporary locations and are removed when the context drops;
/// the guards are held so the files outlive the pool and store.
pub struct TestContext {
    _db: NamedTempFile,
    _uploads: TempDir,
    pub pool: DbPool,
    pub state: AppState,
}

impl TestContext {
    /// Build a fresh context with all migrations applied.
    ///
    /// # Panics
    ///
    /// Panics when the temporary files, the pool, or the migrations fail;
    /// test fixtures have no caller to report errors to.
    #[must_use]
    pub fn new() -> Self {
        let db = NamedTempFile::new().expect("temp database");
        let uploads = TempDir::new().expect("temp uploads dir");

        let config = PoolConfig::new(db.path().to_string_lossy())
            .with_max_size(2)
            .with_min_idle(None);
        let pool = DbPool::new(config).expect("pool builds");

        let mut conn = pool.get().expect("checkout succeeds");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("migrations apply");
        drop(conn);

        let files = FileStore::new(uploads.path()).expect("file store builds");
        let state = AppState::new(pool.clone(), files);

        Self {
            _db: db,
            _uploads: uploads,
            pool,
            state,
        }
    }

    /// The application state wrapped for handler registration.
    #[must_use]
    pub fn data(&self) -> web::Data<AppState> {
        web::Data::new(self.state.clone())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

pub mod multipart {
    //! Minimal `multipart/form-data` encoder for request tests.

    use uuid::Uuid;

    /// Accumulates text and file parts into one encoded body.
    #[derive(Debug)]
    pub struct MultipartBody {
        boundary: String,
        buf: Vec<u8>,
    }

    impl MultipartBody {
        #[must_use]
        pub fn new() -> Self {
            Self {
                boundary: format!("test-{}", Uuid::new_v4().simple()),
                buf: Vec::new(),
            }
        }

        /// Append a plain text part.
        #[must_use]
        pub fn text(mut self, name: &str, value: &str) -> Self {
            self.buf.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                    self.boundary
                )
                .as_bytes(),
            );
            self
        }

        /// Append a file part with the given filename and payload.
        #[must_use]
        pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
            self.buf.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                     filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    self.boundary
                )
                .as_bytes(),
            );
            self.buf.extend_from_slice(bytes);
            self.buf.extend_from_slice(b"\r\n");
            self
        }

        /// Finish the body, returning the `Content-Type` header value and the
        /// encoded bytes.
        #[must_use]
        pub fn build(mut self) -> (String, Vec<u8>) {
            self.buf
                .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
            (
                format!("multipart/form-data; boundary={}", self.boundary),
                self.buf,
            )
        }
    }

    impl Default for MultipartBody {
        fn default() -> Self {
            Self::new()
        }
    }
}
