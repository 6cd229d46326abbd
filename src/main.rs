//! Service entry-point: configuration, storage, migrations, and the server.

use std::env;

use actix_web::cookie::Key;
use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use docstore::inbound::http::health::HealthState;
use docstore::inbound::http::state::AppState;
use docstore::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use docstore::outbound::storage::FileStore;
use docstore::server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3000);
    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "docstore.sqlite3".into());
    let uploads_dir = env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".into());

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    run_migrations(&pool).map_err(|err| std::io::Error::other(err.to_string()))?;

    let files = FileStore::new(&uploads_dir)?;
    let state = AppState::new(pool, files);

    let health_state = web::Data::new(HealthState::new());

    info!(host = %host, port, database = %database_url, uploads = %uploads_dir, "starting server");

    let config = ServerConfig::new(key, cookie_secure, (host, port), state);
    create_server(health_state, config)?.await
}
