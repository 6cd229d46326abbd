//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.

pub mod document;
pub mod error;
pub mod password;
pub mod reference;
pub mod scan;
pub mod search;
pub mod trace_id;
pub mod user;

pub use self::document::{Document, DocumentListing, DocumentUpdate, NewDocument};
pub use self::error::{Error, ErrorCode};
pub use self::reference::{Category, NewCategory, NewReference, Reference};
pub use self::search::{NewSearchLog, SearchLog, SearchLogListing};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, UserProfile};
