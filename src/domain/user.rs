//! User data model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Session-visible subset of a user account.
///
/// ## Invariants
/// - Never carries the password hash; hashes stay in the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// Stable user identifier.
    pub id: i32,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Unique login email.
    pub email: String,
    /// Free-text role label, when assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Stored photo filename under the uploads directory, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Validated registration data ready for persistence.
///
/// `password_hash` holds the bcrypt hash, never the plaintext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub sex: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub photo: Option<String>,
    pub faculte_id: Option<i32>,
    pub service_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 7,
            name: "Alice".to_owned(),
            surname: "Doe".to_owned(),
            email: "a@x.com".to_owned(),
            role: None,
            photo: None,
        }
    }

    #[test]
    fn profile_exposes_no_password_field() {
        let value = serde_json::to_value(profile()).expect("serialise profile");
        let object = value.as_object().expect("profile serialises to an object");
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("password_hash"));
    }

    #[test]
    fn profile_omits_unset_optional_fields() {
        let value = serde_json::to_value(profile()).expect("serialise profile");
        let object = value.as_object().expect("profile serialises to an object");
        assert!(!object.contains_key("role"));
        assert!(!object.contains_key("photo"));
    }

    #[test]
    fn profile_round_trips() {
        let mut original = profile();
        original.role = Some("archivist".to_owned());
        let value = serde_json::to_value(&original).expect("serialise profile");
        let decoded: UserProfile = serde_json::from_value(value).expect("deserialise profile");
        assert_eq!(decoded, original);
    }
}
