//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, reference
//!   data, documents, searches, health)
//! - **Schemas**: Domain and request/response types annotated with
//!   `utoipa::ToSchema`
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Category, Document, DocumentListing, Error, ErrorCode, Reference, SearchLog, SearchLogListing,
    UserProfile,
};
use crate::inbound::http::auth::{LoginRequest, LoginResponse, MessageResponse, SessionResponse};
use crate::inbound::http::documents::DocumentUpdateRequest;
use crate::inbound::http::reference::{CategoryPayload, ReferencePayload};
use crate::inbound::http::search_logs::SearchRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Docstore API",
        description = "HTTP interface for document management: accounts, \
                       reference data, uploads, and the search log."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::auth::logout,
        crate::inbound::http::reference::list_faculties,
        crate::inbound::http::reference::get_faculty,
        crate::inbound::http::reference::create_faculty,
        crate::inbound::http::reference::update_faculty,
        crate::inbound::http::reference::delete_faculty,
        crate::inbound::http::reference::list_services,
        crate::inbound::http::reference::get_service,
        crate::inbound::http::reference::create_service,
        crate::inbound::http::reference::update_service,
        crate::inbound::http::reference::delete_service,
        crate::inbound::http::reference::list_categories,
        crate::inbound::http::reference::get_category,
        crate::inbound::http::reference::create_category,
        crate::inbound::http::reference::update_category,
        crate::inbound::http::reference::delete_category,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::create_document,
        crate::inbound::http::documents::update_document,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::search_logs::list_searches,
        crate::inbound::http::search_logs::record_search,
        crate::inbound::http::search_logs::delete_search,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserProfile,
        Reference,
        Category,
        Document,
        DocumentListing,
        SearchLog,
        SearchLogListing,
        MessageResponse,
        LoginRequest,
        LoginResponse,
        SessionResponse,
        ReferencePayload,
        CategoryPayload,
        DocumentUpdateRequest,
        SearchRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login, and session state"),
        (name = "reference", description = "Faculty, service, and category lookups"),
        (name = "documents", description = "Document records and uploads"),
        (name = "searches", description = "Append-only search history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
