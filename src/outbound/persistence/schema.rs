//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Faculties referenced by user accounts.
    faculties (id) {
        /// Primary key: autoincrement row id.
        id -> Integer,
        /// Free-text label; duplicates are permitted.
        designation -> Text,
    }
}

diesel::table! {
    /// Services referenced by user accounts.
    services (id) {
        /// Primary key: autoincrement row id.
        id -> Integer,
        /// Free-text label; duplicates are permitted.
        designation -> Text,
    }
}

diesel::table! {
    /// Document categories.
    categories (id) {
        /// Primary key: autoincrement row id.
        id -> Integer,
        /// Free-text label; duplicates are permitted.
        designation -> Text,
        /// Secondary display label.
        name -> Text,
    }
}

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users with their bcrypt password hashes and optional
    /// organisational links. `email` carries a unique index.
    users (id) {
        /// Primary key: autoincrement row id.
        id -> Integer,
        /// Given name.
        name -> Text,
        /// Family name.
        surname -> Text,
        /// Optional free-text sex label.
        sex -> Nullable<Text>,
        /// Optional date of birth.
        birth_date -> Nullable<Date>,
        /// Optional postal address.
        address -> Nullable<Text>,
        /// Optional free-text role label.
        role -> Nullable<Text>,
        /// Unique login email.
        email -> Text,
        /// Bcrypt hash of the login password.
        password_hash -> Text,
        /// Stored photo filename under the uploads directory.
        photo -> Nullable<Text>,
        /// Faculty link; set null when the faculty is deleted.
        faculte_id -> Nullable<Integer>,
        /// Service link; set null when the service is deleted.
        service_id -> Nullable<Integer>,
    }
}

diesel::table! {
    /// Uploaded documents and their metadata.
    documents (id) {
        /// Primary key: autoincrement row id.
        id -> Integer,
        /// Human-readable description.
        description -> Text,
        /// Document reference code.
        code -> Text,
        /// Stored filename under the uploads directory.
        url -> Nullable<Text>,
        /// Server-assigned creation timestamp.
        date_created -> Timestamp,
        /// Confidentiality level tag.
        niveau_conf -> Integer,
        /// Owning category; deletes are restricted while documents remain.
        categorie_id -> Integer,
        /// Uploader; set null when that account is deleted.
        user_id -> Nullable<Integer>,
    }
}

diesel::table! {
    /// Append-only search history.
    recherches (id) {
        /// Primary key: autoincrement row id.
        id -> Integer,
        /// Whether the search matched the document.
        resultat -> Bool,
        /// When the search ran.
        date_recherche -> Timestamp,
        /// Requesting user; rows cascade away with the account.
        user_id -> Integer,
        /// Target document; rows cascade away with the document.
        document_id -> Integer,
    }
}

diesel::joinable!(users -> faculties (faculte_id));
diesel::joinable!(users -> services (service_id));
diesel::joinable!(documents -> categories (categorie_id));
diesel::joinable!(documents -> users (user_id));
diesel::joinable!(recherches -> users (user_id));
diesel::joinable!(recherches -> documents (document_id));

diesel::allow_tables_to_appear_in_same_query!(
    faculties,
    services,
    categories,
    users,
    documents,
    recherches,
);
