//! Authentication and session API handlers.
//!
//! ```text
//! POST /api/register   multipart profile fields + optional photo part
//! POST /api/login      {"email":"a@x.com","password":"pw123"}
//! GET  /api/session    -> {"connected":true,"user":{...}}
//! POST /api/logout
//! ```

use actix_multipart::form::MultipartForm;
use actix_multipart::form::bytes::Bytes as BytesPart;
use actix_multipart::form::text::Text;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Error, NewUser, UserProfile, password};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::AppState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_date, parse_optional_i32, require_text,
};
use crate::outbound::persistence::PersistenceError;

const NAME: FieldName = FieldName::new("name");
const SURNAME: FieldName = FieldName::new("surname");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const BIRTH_DATE: FieldName = FieldName::new("birth_date");
const FACULTE_ID: FieldName = FieldName::new("faculte_id");
const SERVICE_ID: FieldName = FieldName::new("service_id");

/// Multipart registration form. Every part is optional at the transport
/// level; presence of the required fields is validated in the handler so
/// failures carry the shared `{field, code}` details.
#[derive(Debug, MultipartForm)]
pub struct RegisterForm {
    pub name: Option<Text<String>>,
    pub surname: Option<Text<String>>,
    pub sex: Option<Text<String>>,
    pub birth_date: Option<Text<String>>,
    pub address: Option<Text<String>>,
    pub role: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub password: Option<Text<String>>,
    pub faculte_id: Option<Text<String>>,
    pub service_id: Option<Text<String>>,
    pub photo: Option<BytesPart>,
}

fn text(part: Option<Text<String>>) -> Option<String> {
    part.map(|value| value.into_inner())
}

/// Confirmation message returned by registration and logout.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login request body for `POST /api/login`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response carrying the session profile.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserProfile,
}

/// Session probe response for `GET /api/session`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SessionResponse {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

async fn hash_password(plaintext: String) -> Result<String, Error> {
    // bcrypt at cost 10 takes tens of milliseconds; keep it off the runtime.
    tokio::task::spawn_blocking(move || password::hash(&plaintext))
        .await
        .map_err(|err| Error::internal(format!("hashing task failed: {err}")))?
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

async fn verify_password(plaintext: String, stored_hash: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || password::verify(&plaintext, &stored_hash))
        .await
        .map_err(|err| Error::internal(format!("verification task failed: {err}")))?
        .map_err(|err| Error::internal(format!("password verification failed: {err}")))
}

/// Register a new account.
///
/// The optional photo part is written to the file store before the insert;
/// when the insert fails the stored file is removed again so no orphan
/// remains.
#[utoipa::path(
    post,
    path = "/api/register",
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing or malformed field", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<RegisterForm>,
) -> ApiResult<web::Json<MessageResponse>> {
    let name = require_text(text(form.name), NAME)?;
    let surname = require_text(text(form.surname), SURNAME)?;
    let email = require_text(text(form.email), EMAIL)?;
    let plaintext = require_text(text(form.password), PASSWORD)?;
    let birth_date = parse_optional_date(text(form.birth_date), BIRTH_DATE)?;
    let faculte_id = parse_optional_i32(text(form.faculte_id), FACULTE_ID)?;
    let service_id = parse_optional_i32(text(form.service_id), SERVICE_ID)?;

    let password_hash = hash_password(plaintext).await?;

    let photo = match form.photo {
        Some(part) => {
            let original = part.file_name.clone().unwrap_or_else(|| "photo".to_owned());
            Some(state.files.save(&original, part.data.to_vec()).await?)
        }
        None => None,
    };

    let new_user = NewUser {
        name,
        surname,
        sex: text(form.sex),
        birth_date,
        address: text(form.address),
        role: text(form.role),
        email,
        password_hash,
        photo: photo.clone(),
        faculte_id,
        service_id,
    };

    match state.users.create(new_user).await {
        Ok(_) => Ok(web::Json(MessageResponse::new("account created"))),
        Err(err) => {
            if let Some(stored) = photo {
                if let Err(cleanup) = state.files.remove(&stored).await {
                    warn!(error = %cleanup, "failed to remove photo after rejected registration");
                }
            }
            Err(match err {
                PersistenceError::Conflict { .. } => {
                    Error::conflict("an account with this email already exists")
                }
                other => other.into(),
            })
        }
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing field", body = Error),
        (status = 401, description = "Wrong password", body = Error),
        (status = 404, description = "Unknown email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let payload = payload.into_inner();
    let email = require_text(payload.email, EMAIL)?;
    let plaintext = require_text(payload.password, PASSWORD)?;

    let (profile, stored_hash) = state
        .users
        .find_credentials_by_email(email)
        .await?
        .ok_or_else(|| Error::not_found("no account matches this email"))?;

    if !verify_password(plaintext, stored_hash).await? {
        return Err(Error::unauthorized("invalid credentials"));
    }

    session.persist_user(&profile)?;
    Ok(web::Json(LoginResponse {
        message: "login successful".to_owned(),
        user: profile,
    }))
}

/// Report the current session. Never errors; a missing or unreadable
/// session reads as disconnected.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Session state", body = SessionResponse)
    ),
    tags = ["auth"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> web::Json<SessionResponse> {
    let user = session.user();
    web::Json(SessionResponse {
        connected: user.is_some(),
        user,
    })
}

/// Destroy the session. Idempotent.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session destroyed", body = MessageResponse)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> web::Json<MessageResponse> {
    session.clear();
    web::Json(MessageResponse::new("logged out"))
}
