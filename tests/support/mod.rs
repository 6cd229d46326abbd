//! Shared fixtures for the endpoint test suites.
//!
//! Each suite assembles the full application over a throwaway database and
//! uploads directory, then drives it through `actix_web::test`. Helpers here
//! cover the recurring steps: building the app, registering an account,
//! logging in, and seeding reference rows.

// Each test binary compiles this module; not every suite uses every helper.
#![allow(dead_code)]

use actix_http::Request;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use docstore::inbound::http::health::HealthState;
use docstore::server::{AppDependencies, build_app};
use docstore::test_support::TestContext;
use docstore::test_support::multipart::MultipartBody;

/// Full application over the context's repositories, with an ephemeral
/// session key and insecure cookies for plain-HTTP tests.
pub fn app(
    ctx: &TestContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    build_app(AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        state: ctx.state.clone(),
        key: Key::generate(),
        cookie_secure: false,
    })
}

/// Multipart registration request carrying the required profile fields.
pub fn register_request(email: &str, password: &str) -> test::TestRequest {
    let (content_type, body) = MultipartBody::new()
        .text("name", "Alice")
        .text("surname", "Durand")
        .text("email", email)
        .text("password", password)
        .build();
    test::TestRequest::post()
        .uri("/api/register")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
}

/// JSON login request.
pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": email, "password": password }))
}

/// Extract the session cookie from a response.
///
/// # Panics
///
/// Panics when the response carries no session cookie.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Register an account and log in, returning the session cookie.
pub async fn authenticated_session<S>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, register_request(email, password).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK, "registration succeeds");

    let res = test::call_service(app, login_request(email, password).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK, "login succeeds");
    session_cookie(&res)
}

/// Seed a category and return its id.
pub async fn seed_category<S>(app: &S, designation: &str) -> i32
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/categorie")
        .set_json(json!({ "designation": designation, "name": designation }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["id"].as_i64().expect("category id") as i32
}

/// Authenticated multipart document upload.
pub fn upload_request(
    cookie: &Cookie<'static>,
    filename: &str,
    category_id: i32,
    payload: &[u8],
) -> test::TestRequest {
    let (content_type, body) = MultipartBody::new()
        .text("description", "Quarterly report")
        .text("code", "RPT-01")
        .text("categorie_id", &category_id.to_string())
        .text("niveau_conf", "1")
        .file("file", filename, payload)
        .build();
    test::TestRequest::post()
        .uri("/api/document")
        .cookie(cookie.clone())
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
}
