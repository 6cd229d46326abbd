//! End-to-end tests for the faculty, service, and category endpoints.

mod support;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use serde_json::{Value, json};

use docstore::test_support::TestContext;
use docstore::test_support::multipart::MultipartBody;
use support::{app, authenticated_session, login_request, seed_category, upload_request};

#[actix_web::test]
async fn faculty_crud_round_trip() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;

    let req = test::TestRequest::post()
        .uri("/api/faculte")
        .set_json(json!({ "designation": "Sciences" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().expect("faculty id");
    assert_eq!(created["designation"], "Sciences");

    let req = test::TestRequest::get().uri("/api/faculte").to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.as_array().expect("array").len(), 1);

    let req = test::TestRequest::put()
        .uri(&format!("/api/faculte/{id}"))
        .set_json(json!({ "designation": "Lettres" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["designation"], "Lettres");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/faculte/{id}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/faculte/{id}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/faculte/{id}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn duplicate_designations_are_permitted() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/service")
            .set_json(json!({ "designation": "Archives" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/api/service").to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.as_array().expect("array").len(), 2);
}

#[actix_web::test]
async fn blank_designation_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;

    let req = test::TestRequest::post()
        .uri("/api/faculte")
        .set_json(json!({ "designation": "   " }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "designation");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn category_requires_both_labels() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;

    let req = test::TestRequest::post()
        .uri("/api/categorie")
        .set_json(json!({ "designation": "Rapports" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "name");
}

#[actix_web::test]
async fn deleting_a_faculty_nulls_the_user_link() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;

    let req = test::TestRequest::post()
        .uri("/api/faculte")
        .set_json(json!({ "designation": "Sciences" }))
        .to_request();
    let faculty: Value = test::call_and_read_body_json(&app, req).await;
    let faculty_id = faculty["id"].as_i64().expect("faculty id");

    let (content_type, body) = MultipartBody::new()
        .text("name", "Alice")
        .text("surname", "Durand")
        .text("email", "alice@example.org")
        .text("password", "s3cret!")
        .text("faculte_id", &faculty_id.to_string())
        .build();
    let req = test::TestRequest::post()
        .uri("/api/register")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let profile: Value = test::call_and_read_body_json(
        &app,
        login_request("alice@example.org", "s3cret!").to_request(),
    )
    .await;
    let user_id = profile["user"]["id"].as_i64().expect("user id") as i32;

    let refs = ctx
        .state
        .users
        .organisation_refs(user_id)
        .await
        .expect("links readable");
    assert_eq!(refs, (Some(faculty_id as i32), None));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/faculte/{faculty_id}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let refs = ctx
        .state
        .users
        .organisation_refs(user_id)
        .await
        .expect("links readable");
    assert_eq!(refs, (None, None), "account survives with a null link");
}

#[actix_web::test]
async fn category_with_documents_cannot_be_deleted() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let category_id = seed_category(&app, "Rapports").await;
    let cookie = authenticated_session(&app, "alice@example.org", "s3cret!").await;

    let created: Value = test::call_and_read_body_json(
        &app,
        upload_request(&cookie, "report.pdf", category_id, b"%PDF-1.4").to_request(),
    )
    .await;
    let document_id = created["id"].as_i64().expect("document id");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categorie/{category_id}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_reference");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/document/{document_id}"))
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categorie/{category_id}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK, "deletable once unreferenced");
}
