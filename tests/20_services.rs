mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn catalog_is_empty_until_seeded() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };

    let (status, body) = app.request(Method::GET, "/api/v1/services", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    app.cleanup().await
}

#[tokio::test]
async fn seeded_catalog_lists_active_services_by_title() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    app.request(Method::POST, "/api/v1/init-demo", None, None).await?;

    let (status, body) = app.request(Method::GET, "/api/v1/services", None, None).await?;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        ["Digital Marketing", "IT Consulting", "Mobile App Development", "Web Development"]
    );
    assert!(body[0]["form_fields"].is_array());

    app.cleanup().await
}

#[tokio::test]
async fn inactive_services_are_hidden() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    app.request(Method::POST, "/api/v1/init-demo", None, None).await?;
    sqlx::query("UPDATE services SET is_active = false WHERE slug = 'it-consulting'")
        .execute(&app.pool)
        .await?;

    let (_, body) = app.request(Method::GET, "/api/v1/services", None, None).await?;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = app.request(Method::GET, "/api/v1/services/it-consulting", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .request(Method::POST, "/api/v1/services/it-consulting/submit", None, Some(json!({ "full_name": "Grace" })))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Service not found");

    app.cleanup().await
}

#[tokio::test]
async fn service_detail_by_slug() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    app.request(Method::POST, "/api/v1/init-demo", None, None).await?;

    let (status, body) = app.request(Method::GET, "/api/v1/services/web-development", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "web-development");
    assert_eq!(body["form_fields"][0]["name"], "project_type");
    assert_eq!(body["form_fields"][0]["type"], "select");

    let (status, body) = app.request(Method::GET, "/api/v1/services/nonexistent", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Service not found" }));

    app.cleanup().await
}

#[tokio::test]
async fn submit_records_a_new_lead() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    app.request(Method::POST, "/api/v1/init-demo", None, None).await?;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/services/web-development/submit",
            None,
            Some(json!({ "full_name": " Ada Lovelace ", "email": "ada@example.com", "message": "Need a site" })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Submission received successfully");

    let id: uuid::Uuid = body["id"].as_str().unwrap().parse()?;
    let (full_name, company, status): (String, String, String) =
        sqlx::query_as("SELECT full_name, company, status FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await?;
    assert_eq!(full_name, "Ada Lovelace");
    assert_eq!(company, "");
    assert_eq!(status, "new");

    app.cleanup().await
}

#[tokio::test]
async fn submit_accepts_an_empty_object() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    app.request(Method::POST, "/api/v1/init-demo", None, None).await?;

    let (status, _) = app
        .request(Method::POST, "/api/v1/services/digital-marketing/submit", None, Some(json!({})))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    app.cleanup().await
}

#[tokio::test]
async fn submit_without_a_body_records_empty_fields() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    app.request(Method::POST, "/api/v1/init-demo", None, None).await?;

    let (status, body) = app
        .request(Method::POST, "/api/v1/services/it-consulting/submit", None, None)
        .await?;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let id: uuid::Uuid = body["id"].as_str().unwrap().parse()?;
    let (full_name, email, status): (String, String, String) =
        sqlx::query_as("SELECT full_name, email, status FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_one(&app.pool)
            .await?;
    assert_eq!((full_name.as_str(), email.as_str(), status.as_str()), ("", "", "new"));

    // Form-encoded clients often omit the JSON content type.
    let (status, _) = common::send_raw(
        &app.router,
        "/api/v1/services/it-consulting/submit",
        Some("text/plain"),
        r#"{"full_name": "Grace"}"#,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    app.cleanup().await
}

#[tokio::test]
async fn submit_to_unknown_service_is_404_whatever_the_body() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };

    let (status, body) = app.request(Method::POST, "/api/v1/services/missing/submit", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Service not found" }));

    let (status, body) =
        common::send_raw(&app.router, "/api/v1/services/missing/submit", Some("application/json"), "{oops").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Service not found");

    app.cleanup().await
}

#[tokio::test]
async fn submit_with_malformed_body_is_400() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    app.request(Method::POST, "/api/v1/init-demo", None, None).await?;

    let (status, body) = common::send_raw(
        &app.router,
        "/api/v1/services/web-development/submit",
        Some("application/json"),
        "{oops",
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions").fetch_one(&app.pool).await?;
    assert_eq!(count, 0);

    app.cleanup().await
}

#[tokio::test]
async fn oddly_shaped_form_fields_do_not_break_the_catalog() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    app.request(Method::POST, "/api/v1/init-demo", None, None).await?;
    sqlx::query(
        r#"INSERT INTO services (slug, title, form_fields)
           VALUES ('custom', 'Custom Work', '[{"name": "budget", "type": "number"}]')"#,
    )
    .execute(&app.pool)
    .await?;

    let (status, body) = app.request(Method::GET, "/api/v1/services", None, None).await?;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (status, body) = app.request(Method::GET, "/api/v1/services/custom", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["form_fields"], json!([{ "name": "budget", "type": "number" }]));

    let (status, _) = app.request(Method::POST, "/api/v1/services/custom/submit", None, None).await?;
    assert_eq!(status, StatusCode::CREATED);

    app.cleanup().await
}
