//! HTTP server configuration object.

use actix_web::cookie::Key;

use crate::inbound::http::state::AppState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: (String, u16),
    pub(crate) state: AppState,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: (String, u16), state: AppState) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            state,
        }
    }

    /// Return the address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (&self.bind_addr.0, self.bind_addr.1)
    }
}
