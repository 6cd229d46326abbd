//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_files::Files;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_multipart::form::MultipartFormConfig;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::auth::{current_session, login, logout, register};
use crate::inbound::http::documents::{
    create_document, delete_document, get_document, list_documents, update_document,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::reference::{
    create_category, create_faculty, create_service, delete_category, delete_faculty,
    delete_service, get_category, get_faculty, get_service, list_categories, list_faculties,
    list_services, update_category, update_faculty, update_service,
};
use crate::inbound::http::search_logs::{delete_search, list_searches, record_search};
use crate::inbound::http::state::AppState;
use crate::middleware::Trace;

/// Upper bound for multipart uploads (scan PDFs and photos).
const UPLOAD_LIMIT_BYTES: usize = 25 * 1024 * 1024;

/// Everything one worker needs to assemble the application.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub state: AppState,
    pub key: Key,
    pub cookie_secure: bool,
}

/// Assemble the application: session-wrapped `/api` scope, trace middleware,
/// static uploads, health probes, and (debug builds) Swagger UI.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(register)
        .service(login)
        .service(current_session)
        .service(logout)
        .service(list_faculties)
        .service(get_faculty)
        .service(create_faculty)
        .service(update_faculty)
        .service(delete_faculty)
        .service(list_services)
        .service(get_service)
        .service(create_service)
        .service(update_service)
        .service(delete_service)
        .service(list_categories)
        .service(get_category)
        .service(create_category)
        .service(update_category)
        .service(delete_category)
        .service(list_documents)
        .service(get_document)
        .service(create_document)
        .service(update_document)
        .service(delete_document)
        .service(list_searches)
        .service(record_search)
        .service(delete_search);

    let uploads_root = state.files.root().to_path_buf();

    let app = App::new()
        .app_data(health_state)
        .app_data(web::Data::new(state))
        .app_data(
            MultipartFormConfig::default()
                .total_limit(UPLOAD_LIMIT_BYTES)
                .memory_limit(UPLOAD_LIMIT_BYTES),
        )
        .wrap(Trace)
        .service(api)
        .service(Files::new("/uploads", uploads_root))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        state,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            state: state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
