//! Document API handlers.
//!
//! ```text
//! GET    /api/document          joined listing
//! GET    /api/document/{id}
//! POST   /api/document          multipart, `file` part required, session required
//! PUT    /api/document/{id}     JSON full-field overwrite, session required
//! DELETE /api/document/{id}     session required, removes the stored file
//! ```
//!
//! The uploader always comes from the session, never from client input. The
//! file is written before the row insert with a compensating remove when the
//! insert fails.

use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes as BytesPart;
use actix_multipart::form::text::Text;
use actix_web::{delete, get, post, put, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Document, DocumentListing, DocumentUpdate, Error, NewDocument};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::AppState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_required_i32, require_text,
};
use crate::outbound::persistence::PersistenceError;

const DESCRIPTION: FieldName = FieldName::new("description");
const CODE: FieldName = FieldName::new("code");
const URL: FieldName = FieldName::new("url");
const CATEGORIE_ID: FieldName = FieldName::new("categorie_id");
const NIVEAU_CONF: FieldName = FieldName::new("niveau_conf");
const FILE: FieldName = FieldName::new("file");

/// Multipart document-creation form. All parts optional at the transport
/// level; presence is validated in the handler.
#[derive(Debug, MultipartForm)]
pub struct DocumentForm {
    pub description: Option<Text<String>>,
    pub code: Option<Text<String>>,
    pub categorie_id: Option<Text<String>>,
    pub niveau_conf: Option<Text<String>>,
    pub file: Option<BytesPart>,
}

/// JSON body applying the full-field document overwrite.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DocumentUpdateRequest {
    pub description: Option<String>,
    pub code: Option<String>,
    pub url: Option<String>,
    pub niveau_conf: Option<i32>,
}

impl TryFrom<DocumentUpdateRequest> for DocumentUpdate {
    type Error = Error;

    fn try_from(payload: DocumentUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            description: require_text(payload.description, DESCRIPTION)?,
            code: require_text(payload.code, CODE)?,
            url: require_text(payload.url, URL)?,
            niveau_conf: payload
                .niveau_conf
                .ok_or_else(|| missing_field_error(NIVEAU_CONF))?,
        })
    }
}

/// List all documents joined with their category designation.
///
/// Rows whose category or uploader no longer exists are omitted.
#[utoipa::path(
    get,
    path = "/api/document",
    responses((status = 200, description = "Documents", body = [DocumentListing])),
    tags = ["documents"],
    operation_id = "listDocuments",
    security([])
)]
#[get("/document")]
pub async fn list_documents(
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<DocumentListing>>> {
    Ok(web::Json(state.documents.list().await?))
}

/// Fetch one document.
#[utoipa::path(
    get,
    path = "/api/document/{id}",
    responses(
        (status = 200, description = "Document", body = Document),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["documents"],
    operation_id = "getDocument",
    security([])
)]
#[get("/document/{id}")]
pub async fn get_document(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Document>> {
    state
        .documents
        .find(path.into_inner())
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("no such document"))
}

/// Create a document from an authenticated upload.
#[utoipa::path(
    post,
    path = "/api/document",
    responses(
        (status = 200, description = "Created document", body = Document),
        (status = 400, description = "Missing field or file part", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Unknown category", body = Error),
        (status = 500, description = "Storage failure", body = Error)
    ),
    tags = ["documents"],
    operation_id = "createDocument"
)]
#[post("/document")]
pub async fn create_document(
    state: web::Data<AppState>,
    session: SessionContext,
    MultipartForm(form): MultipartForm<DocumentForm>,
) -> ApiResult<web::Json<Document>> {
    let uploader = session.require_user()?;

    let description = require_text(form.description.map(Text::into_inner), DESCRIPTION)?;
    let code = require_text(form.code.map(Text::into_inner), CODE)?;
    let categorie_id = parse_required_i32(form.categorie_id.map(Text::into_inner), CATEGORIE_ID)?;
    let niveau_conf = parse_required_i32(form.niveau_conf.map(Text::into_inner), NIVEAU_CONF)?;
    let file = form.file.ok_or_else(|| missing_field_error(FILE))?;

    let original = file.file_name.clone().unwrap_or_else(|| "document".to_owned());
    let stored = state.files.save(&original, file.data.to_vec()).await?;

    let new_document = NewDocument {
        description,
        code,
        url: stored.clone(),
        date_created: Utc::now().naive_utc(),
        niveau_conf,
        categorie_id,
        user_id: uploader.id,
    };

    match state.documents.create(new_document).await {
        Ok(document) => Ok(web::Json(document)),
        Err(err) => {
            if let Err(cleanup) = state.files.remove(&stored).await {
                warn!(error = %cleanup, "failed to remove file after rejected document insert");
            }
            Err(match err {
                PersistenceError::ForeignKey { .. } => {
                    Error::invalid_reference("category or uploader does not exist")
                }
                other => other.into(),
            })
        }
    }
}

/// Apply the full-field overwrite to a document.
#[utoipa::path(
    put,
    path = "/api/document/{id}",
    request_body = DocumentUpdateRequest,
    responses(
        (status = 200, description = "Updated document", body = Document),
        (status = 400, description = "Missing field", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["documents"],
    operation_id = "updateDocument"
)]
#[put("/document/{id}")]
pub async fn update_document(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<DocumentUpdateRequest>,
) -> ApiResult<web::Json<Document>> {
    session.require_user()?;
    let update = DocumentUpdate::try_from(payload.into_inner())?;
    Ok(web::Json(state.documents.update(path.into_inner(), update).await?))
}

/// Delete a document and its stored file.
///
/// The row delete is authoritative; a filesystem failure afterwards is
/// logged, not surfaced, so the API result matches the database state.
#[utoipa::path(
    delete,
    path = "/api/document/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument"
)]
#[delete("/document/{id}")]
pub async fn delete_document(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    session.require_user()?;
    let stored = state.documents.delete(path.into_inner()).await?;
    if let Some(name) = stored {
        if let Err(cleanup) = state.files.remove(&name).await {
            warn!(error = %cleanup, file = %name, "failed to remove file for deleted document");
        }
    }
    Ok(web::Json(MessageResponse {
        message: "deleted".to_owned(),
    }))
}
