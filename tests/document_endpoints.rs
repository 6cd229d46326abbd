//! End-to-end tests for document upload, listing, update, and deletion.

mod support;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use diesel::RunQueryDsl;
use serde_json::{Value, json};

use docstore::outbound::persistence::map_diesel_error;
use docstore::test_support::TestContext;
use docstore::test_support::multipart::MultipartBody;
use support::{app, authenticated_session, seed_category, upload_request};

fn stored_files(ctx: &TestContext) -> Vec<String> {
    std::fs::read_dir(ctx.state.files.root())
        .expect("uploads dir readable")
        .map(|entry| entry.expect("dir entry").file_name().into_string().expect("utf-8 name"))
        .collect()
}

#[actix_web::test]
async fn upload_requires_a_session() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let category_id = seed_category(&app, "Rapports").await;

    let (content_type, body) = MultipartBody::new()
        .text("description", "Quarterly report")
        .text("code", "RPT-01")
        .text("categorie_id", &category_id.to_string())
        .text("niveau_conf", "1")
        .file("file", "report.pdf", b"%PDF-1.4")
        .build();
    let req = test::TestRequest::post()
        .uri("/api/document")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();

    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert!(stored_files(&ctx).is_empty(), "no file written for a rejected upload");
}

#[actix_web::test]
async fn upload_without_file_part_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let category_id = seed_category(&app, "Rapports").await;
    let cookie = authenticated_session(&app, "alice@example.org", "s3cret!").await;

    let (content_type, body) = MultipartBody::new()
        .text("description", "Quarterly report")
        .text("code", "RPT-01")
        .text("categorie_id", &category_id.to_string())
        .text("niveau_conf", "1")
        .build();
    let req = test::TestRequest::post()
        .uri("/api/document")
        .cookie(cookie)
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();

    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "file");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[actix_web::test]
async fn authenticated_upload_persists_the_document_and_file() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let category_id = seed_category(&app, "Rapports").await;
    let cookie = authenticated_session(&app, "alice@example.org", "s3cret!").await;

    let res = test::call_service(
        &app,
        upload_request(&cookie, "report.pdf", category_id, b"%PDF-1.4").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let id = body["id"].as_i64().expect("document id");
    let stored = body["url"].as_str().expect("stored filename").to_owned();
    assert!(stored.ends_with("-report.pdf"), "stored as {stored}");
    assert!(ctx.state.files.root().join(&stored).exists());

    let req = test::TestRequest::get()
        .uri(&format!("/api/document/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["description"], "Quarterly report");
    assert_eq!(body["categorie_id"], json!(category_id));
}

#[actix_web::test]
async fn same_filename_uploads_get_distinct_stored_names() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let category_id = seed_category(&app, "Rapports").await;
    let cookie = authenticated_session(&app, "alice@example.org", "s3cret!").await;

    let first: Value = test::call_and_read_body_json(
        &app,
        upload_request(&cookie, "report.pdf", category_id, b"first").to_request(),
    )
    .await;
    let second: Value = test::call_and_read_body_json(
        &app,
        upload_request(&cookie, "report.pdf", category_id, b"second").to_request(),
    )
    .await;

    let first_name = first["url"].as_str().expect("first stored name");
    let second_name = second["url"].as_str().expect("second stored name");
    assert_ne!(first_name, second_name);
    assert_eq!(
        std::fs::read(ctx.state.files.root().join(first_name)).expect("first file"),
        b"first"
    );
    assert_eq!(
        std::fs::read(ctx.state.files.root().join(second_name)).expect("second file"),
        b"second"
    );
}

#[actix_web::test]
async fn upload_with_unknown_category_leaves_no_orphan_file() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let cookie = authenticated_session(&app, "alice@example.org", "s3cret!").await;

    let res = test::call_service(
        &app,
        upload_request(&cookie, "report.pdf", 999, b"%PDF-1.4").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_reference");
    assert!(stored_files(&ctx).is_empty(), "rejected insert removed its file");
}

#[actix_web::test]
async fn delete_removes_the_row_and_the_stored_file() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let category_id = seed_category(&app, "Rapports").await;
    let cookie = authenticated_session(&app, "alice@example.org", "s3cret!").await;

    let created: Value = test::call_and_read_body_json(
        &app,
        upload_request(&cookie, "report.pdf", category_id, b"%PDF-1.4").to_request(),
    )
    .await;
    let id = created["id"].as_i64().expect("document id");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/document/{id}"))
        .cookie(cookie.clone())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(stored_files(&ctx).is_empty(), "stored file removed with the row");

    let req = test::TestRequest::get()
        .uri(&format!("/api/document/{id}"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/document/{id}"))
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn listing_joins_the_category_and_omits_orphaned_rows() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let category_id = seed_category(&app, "Rapports").await;
    let cookie = authenticated_session(&app, "alice@example.org", "s3cret!").await;

    let created: Value = test::call_and_read_body_json(
        &app,
        upload_request(&cookie, "report.pdf", category_id, b"%PDF-1.4").to_request(),
    )
    .await;
    let id = created["id"].as_i64().expect("document id") as i32;

    let req = test::TestRequest::get().uri("/api/document").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body.as_array().expect("listing is an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["categorie_designation"], "Rapports");

    // Deleting the uploader nulls the document's user link; the inner join
    // then drops the row from the listing while the record itself survives.
    ctx.pool
        .run(|conn| {
            diesel::sql_query("DELETE FROM users")
                .execute(conn)
                .map_err(|err| map_diesel_error(err, "delete users"))
        })
        .await
        .expect("uploader deleted");

    let req = test::TestRequest::get().uri("/api/document").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().expect("listing is an array").len(), 0);

    let document = ctx
        .state
        .documents
        .find(id)
        .await
        .expect("lookup succeeds")
        .expect("row survives the uploader");
    assert_eq!(document.user_id, None);
}

#[actix_web::test]
async fn update_overwrites_every_field() {
    let ctx = TestContext::new();
    let app = test::init_service(app(&ctx)).await;
    let category_id = seed_category(&app, "Rapports").await;
    let cookie = authenticated_session(&app, "alice@example.org", "s3cret!").await;

    let created: Value = test::call_and_read_body_json(
        &app,
        upload_request(&cookie, "report.pdf", category_id, b"%PDF-1.4").to_request(),
    )
    .await;
    let id = created["id"].as_i64().expect("document id");

    let req = test::TestRequest::put()
        .uri(&format!("/api/document/{id}"))
        .cookie(cookie.clone())
        .set_json(json!({
            "description": "Annual report",
            "code": "RPT-02",
            "url": created["url"],
            "niveau_conf": 3
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["description"], "Annual report");
    assert_eq!(body["code"], "RPT-02");
    assert_eq!(body["niveau_conf"], json!(3));

    let req = test::TestRequest::put()
        .uri(&format!("/api/document/{id}"))
        .cookie(cookie)
        .set_json(json!({ "description": "missing the rest" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/document/{id}"))
        .set_json(json!({
            "description": "Annual report",
            "code": "RPT-02",
            "url": created["url"],
            "niveau_conf": 3
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
