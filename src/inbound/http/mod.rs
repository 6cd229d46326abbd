//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod documents;
pub mod error;
pub mod health;
pub mod reference;
pub mod search_logs;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
