//! Outbound adapters owning external resources (database, uploads directory).

pub mod persistence;
pub mod storage;
