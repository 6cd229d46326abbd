//! Search history records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Append-only search log row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchLog {
    /// Stable row identifier.
    pub id: i32,
    /// Whether the search matched the document.
    pub resultat: bool,
    /// When the search ran.
    pub date_recherche: NaiveDateTime,
    /// Requesting user.
    pub user_id: i32,
    /// Document the search resolved against.
    pub document_id: i32,
}

/// Payload for recording a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSearchLog {
    pub resultat: bool,
    pub date_recherche: NaiveDateTime,
    pub user_id: i32,
    pub document_id: i32,
}

/// Search row joined with requester and document context.
///
/// Faculty and service designations come from left joins and stay null when
/// the requester has none assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchLogListing {
    pub id: i32,
    pub resultat: bool,
    pub date_recherche: NaiveDateTime,
    pub user_id: i32,
    pub document_id: i32,
    pub user_name: String,
    pub user_surname: String,
    pub user_email: String,
    pub faculte_designation: Option<String>,
    pub service_designation: Option<String>,
    pub document_description: String,
    pub document_code: String,
}
