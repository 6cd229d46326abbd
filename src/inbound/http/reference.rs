//! Reference-data API handlers: faculties, services, and categories.
//!
//! ```text
//! GET/POST /api/faculte        GET/PUT/DELETE /api/faculte/{id}
//! GET/POST /api/service       GET/PUT/DELETE /api/service/{id}
//! GET/POST /api/categorie     GET/PUT/DELETE /api/categorie/{id}
//! ```
//!
//! Duplicated designations are permitted by design. Deleting a referenced
//! faculty or service nulls the referencing users' links; deleting a category
//! with documents attached is rejected with a 409 `invalid_reference`.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Error, NewCategory, NewReference, Reference};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::MessageResponse;
use crate::inbound::http::state::AppState;
use crate::inbound::http::validation::{FieldName, require_text};

const DESIGNATION: FieldName = FieldName::new("designation");
const NAME: FieldName = FieldName::new("name");

/// Create/update payload for faculties and services.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReferencePayload {
    pub designation: Option<String>,
}

impl TryFrom<ReferencePayload> for NewReference {
    type Error = Error;

    fn try_from(payload: ReferencePayload) -> Result<Self, Self::Error> {
        Ok(Self {
            designation: require_text(payload.designation, DESIGNATION)?,
        })
    }
}

/// Create/update payload for categories.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CategoryPayload {
    pub designation: Option<String>,
    pub name: Option<String>,
}

impl TryFrom<CategoryPayload> for NewCategory {
    type Error = Error;

    fn try_from(payload: CategoryPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            designation: require_text(payload.designation, DESIGNATION)?,
            name: require_text(payload.name, NAME)?,
        })
    }
}

fn deleted() -> web::Json<MessageResponse> {
    web::Json(MessageResponse {
        message: "deleted".to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Faculties
// ---------------------------------------------------------------------------

/// List faculties.
#[utoipa::path(
    get,
    path = "/api/faculte",
    responses((status = 200, description = "Faculties", body = [Reference])),
    tags = ["reference"],
    operation_id = "listFaculties",
    security([])
)]
#[get("/faculte")]
pub async fn list_faculties(state: web::Data<AppState>) -> ApiResult<web::Json<Vec<Reference>>> {
    Ok(web::Json(state.faculties.list().await?))
}

/// Fetch one faculty.
#[utoipa::path(
    get,
    path = "/api/faculte/{id}",
    responses(
        (status = 200, description = "Faculty", body = Reference),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reference"],
    operation_id = "getFaculty",
    security([])
)]
#[get("/faculte/{id}")]
pub async fn get_faculty(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Reference>> {
    state
        .faculties
        .find(path.into_inner())
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("no such faculty"))
}

/// Create a faculty.
#[utoipa::path(
    post,
    path = "/api/faculte",
    request_body = ReferencePayload,
    responses(
        (status = 200, description = "Created faculty", body = Reference),
        (status = 400, description = "Missing designation", body = Error)
    ),
    tags = ["reference"],
    operation_id = "createFaculty",
    security([])
)]
#[post("/faculte")]
pub async fn create_faculty(
    state: web::Data<AppState>,
    payload: web::Json<ReferencePayload>,
) -> ApiResult<web::Json<Reference>> {
    let new = NewReference::try_from(payload.into_inner())?;
    Ok(web::Json(state.faculties.create(new).await?))
}

/// Replace a faculty's designation.
#[utoipa::path(
    put,
    path = "/api/faculte/{id}",
    request_body = ReferencePayload,
    responses(
        (status = 200, description = "Updated faculty", body = Reference),
        (status = 400, description = "Missing designation", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reference"],
    operation_id = "updateFaculty",
    security([])
)]
#[put("/faculte/{id}")]
pub async fn update_faculty(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<ReferencePayload>,
) -> ApiResult<web::Json<Reference>> {
    let new = NewReference::try_from(payload.into_inner())?;
    Ok(web::Json(state.faculties.update(path.into_inner(), new).await?))
}

/// Delete a faculty. Referencing users keep their account with a null link.
#[utoipa::path(
    delete,
    path = "/api/faculte/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reference"],
    operation_id = "deleteFaculty",
    security([])
)]
#[delete("/faculte/{id}")]
pub async fn delete_faculty(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.faculties.delete(path.into_inner()).await?;
    Ok(deleted())
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// List services.
#[utoipa::path(
    get,
    path = "/api/service",
    responses((status = 200, description = "Services", body = [Reference])),
    tags = ["reference"],
    operation_id = "listServices",
    security([])
)]
#[get("/service")]
pub async fn list_services(state: web::Data<AppState>) -> ApiResult<web::Json<Vec<Reference>>> {
    Ok(web::Json(state.services.list().await?))
}

/// Fetch one service.
#[utoipa::path(
    get,
    path = "/api/service/{id}",
    responses(
        (status = 200, description = "Service", body = Reference),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reference"],
    operation_id = "getService",
    security([])
)]
#[get("/service/{id}")]
pub async fn get_service(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Reference>> {
    state
        .services
        .find(path.into_inner())
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("no such service"))
}

/// Create a service.
#[utoipa::path(
    post,
    path = "/api/service",
    request_body = ReferencePayload,
    responses(
        (status = 200, description = "Created service", body = Reference),
        (status = 400, description = "Missing designation", body = Error)
    ),
    tags = ["reference"],
    operation_id = "createService",
    security([])
)]
#[post("/service")]
pub async fn create_service(
    state: web::Data<AppState>,
    payload: web::Json<ReferencePayload>,
) -> ApiResult<web::Json<Reference>> {
    let new = NewReference::try_from(payload.into_inner())?;
    Ok(web::Json(state.services.create(new).await?))
}

/// Replace a service's designation.
#[utoipa::path(
    put,
    path = "/api/service/{id}",
    request_body = ReferencePayload,
    responses(
        (status = 200, description = "Updated service", body = Reference),
        (status = 400, description = "Missing designation", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reference"],
    operation_id = "updateService",
    security([])
)]
#[put("/service/{id}")]
pub async fn update_service(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<ReferencePayload>,
) -> ApiResult<web::Json<Reference>> {
    let new = NewReference::try_from(payload.into_inner())?;
    Ok(web::Json(state.services.update(path.into_inner(), new).await?))
}

/// Delete a service. Referencing users keep their account with a null link.
#[utoipa::path(
    delete,
    path = "/api/service/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reference"],
    operation_id = "deleteService",
    security([])
)]
#[delete("/service/{id}")]
pub async fn delete_service(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.services.delete(path.into_inner()).await?;
    Ok(deleted())
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// List categories.
#[utoipa::path(
    get,
    path = "/api/categorie",
    responses((status = 200, description = "Categories", body = [Category])),
    tags = ["reference"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categorie")]
pub async fn list_categories(state: web::Data<AppState>) -> ApiResult<web::Json<Vec<Category>>> {
    Ok(web::Json(state.categories.list().await?))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/categorie/{id}",
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reference"],
    operation_id = "getCategory",
    security([])
)]
#[get("/categorie/{id}")]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Category>> {
    state
        .categories
        .find(path.into_inner())
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("no such category"))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/categorie",
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Created category", body = Category),
        (status = 400, description = "Missing designation or name", body = Error)
    ),
    tags = ["reference"],
    operation_id = "createCategory",
    security([])
)]
#[post("/categorie")]
pub async fn create_category(
    state: web::Data<AppState>,
    payload: web::Json<CategoryPayload>,
) -> ApiResult<web::Json<Category>> {
    let new = NewCategory::try_from(payload.into_inner())?;
    Ok(web::Json(state.categories.create(new).await?))
}

/// Replace a category's labels.
#[utoipa::path(
    put,
    path = "/api/categorie/{id}",
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 400, description = "Missing designation or name", body = Error),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["reference"],
    operation_id = "updateCategory",
    security([])
)]
#[put("/categorie/{id}")]
pub async fn update_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    payload: web::Json<CategoryPayload>,
) -> ApiResult<web::Json<Category>> {
    let new = NewCategory::try_from(payload.into_inner())?;
    Ok(web::Json(state.categories.update(path.into_inner(), new).await?))
}

/// Delete a category. Rejected while documents still reference it.
#[utoipa::path(
    delete,
    path = "/api/categorie/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Documents still attached", body = Error)
    ),
    tags = ["reference"],
    operation_id = "deleteCategory",
    security([])
)]
#[delete("/categorie/{id}")]
pub async fn delete_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.categories.delete(path.into_inner()).await?;
    Ok(deleted())
}
