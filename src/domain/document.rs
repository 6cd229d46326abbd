//! Document records and their listing projection.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored document row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    /// Stable row identifier.
    pub id: i32,
    /// Human-readable description shown in listings.
    pub description: String,
    /// Document reference code.
    pub code: String,
    /// Stored filename under the uploads directory.
    pub url: Option<String>,
    /// Server-assigned creation timestamp.
    pub date_created: NaiveDateTime,
    /// Confidentiality level tag.
    pub niveau_conf: i32,
    /// Owning category.
    pub categorie_id: i32,
    /// Uploader account; null once that account is deleted.
    pub user_id: Option<i32>,
}

/// Document row joined with its category designation.
///
/// Produced by an inner join on category and uploader, so rows whose
/// category or uploader no longer exists never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DocumentListing {
    pub id: i32,
    pub description: String,
    pub code: String,
    pub url: Option<String>,
    pub date_created: NaiveDateTime,
    pub niveau_conf: i32,
    pub categorie_id: i32,
    pub user_id: i32,
    /// Designation of the owning category.
    pub categorie_designation: String,
}

/// Validated creation data ready for persistence.
///
/// `url` names the already-stored file and `user_id` comes from the session,
/// never from client input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub description: String,
    pub code: String,
    pub url: String,
    pub date_created: NaiveDateTime,
    pub niveau_conf: i32,
    pub categorie_id: i32,
    pub user_id: i32,
}

/// Full-field overwrite applied by document updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdate {
    pub description: String,
    pub code: String,
    pub url: String,
    pub niveau_conf: i32,
}
