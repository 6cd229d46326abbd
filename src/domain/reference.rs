//! Reference data: faculties, services, and document categories.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lookup row shared by faculties and services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Reference {
    /// Stable row identifier.
    pub id: i32,
    /// Free-text label; duplicates are permitted.
    pub designation: String,
}

/// Payload for creating or replacing a faculty or service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReference {
    pub designation: String,
}

/// Document category with its secondary display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Stable row identifier.
    pub id: i32,
    /// Free-text label; duplicates are permitted.
    pub designation: String,
    /// Secondary display label.
    pub name: String,
}

/// Payload for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub designation: String,
    pub name: String,
}
