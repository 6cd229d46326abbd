//! Search-history API handlers.
//!
//! ```text
//! GET    /api/rechercher        joined listing
//! POST   /api/rechercher        append one record
//! DELETE /api/rechercher/{id}
//! ```
//!
//! Inserts carry no id pre-checks; the store's foreign keys reject a search
//! naming a missing user or document, surfaced as a 409 `invalid_reference`.

use actix_web::{delete, get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewSearchLog, SearchLog, SearchLogListing};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::state::AppState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_optional_rfc3339_timestamp,
};
use crate::outbound::persistence::PersistenceError;

const RESULTAT: FieldName = FieldName::new("resultat");
const USER_ID: FieldName = FieldName::new("user_id");
const DOCUMENT_ID: FieldName = FieldName::new("document_id");
const DATE_RECHERCHE: FieldName = FieldName::new("date_recherche");

/// JSON body recording one search.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchRequest {
    pub resultat: Option<bool>,
    pub user_id: Option<i32>,
    pub document_id: Option<i32>,
    /// RFC 3339; the server assigns now() when omitted.
    pub date_recherche: Option<String>,
}

impl TryFrom<SearchRequest> for NewSearchLog {
    type Error = Error;

    fn try_from(payload: SearchRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            resultat: payload
                .resultat
                .ok_or_else(|| missing_field_error(RESULTAT))?,
            date_recherche: parse_optional_rfc3339_timestamp(
                payload.date_recherche,
                DATE_RECHERCHE,
            )?
            .unwrap_or_else(|| Utc::now().naive_utc()),
            user_id: payload.user_id.ok_or_else(|| missing_field_error(USER_ID))?,
            document_id: payload
                .document_id
                .ok_or_else(|| missing_field_error(DOCUMENT_ID))?,
        })
    }
}

/// List all searches joined with requester and document context.
#[utoipa::path(
    get,
    path = "/api/rechercher",
    responses((status = 200, description = "Search records", body = [SearchLogListing])),
    tags = ["searches"],
    operation_id = "listSearches",
    security([])
)]
#[get("/rechercher")]
pub async fn list_searches(
    state: web::Data<AppState>,
) -> ApiResult<web::Json<Vec<SearchLogListing>>> {
    Ok(web::Json(state.searches.list().await?))
}

/// Record one search.
#[utoipa::path(
    post,
    path = "/api/rechercher",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Recorded search", body = SearchLog),
        (status = 400, description = "Missing field", body = Error),
        (status = 409, description = "Unknown user or document", body = Error)
    ),
    tags = ["searches"],
    operation_id = "recordSearch",
    security([])
)]
#[post("/rechercher")]
pub async fn record_search(
    state: web::Data<AppState>,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<SearchLog>> {
    let new = NewSearchLog::try_from(payload.into_inner())?;
    match state.searches.create(new).await {
        Ok(record) => Ok(web::Json(record)),
        Err(PersistenceError::ForeignKey { .. }) => {
            Err(Error::invalid_reference("user or document does not exist"))
        }
        Err(other) => Err(other.into()),
    }
}

/// Delete one search record.
#[utoipa::path(
    delete,
    path = "/api/rechercher/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["searches"],
    operation_id = "deleteSearch",
    security([])
)]
#[delete("/rechercher/{id}")]
pub async fn delete_search(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.searches.delete(path.into_inner()).await?;
    Ok(web::Json(MessageResponse {
        message: "deleted".to_owned(),
    }))
}
