mod common;

use agency_api::database::models::{NewSubmission, NewSubmissionFile, Submission, SubmissionFile};
use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use common::TestApp;

async fn service_id(app: &TestApp, slug: &str) -> Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as("SELECT id FROM services WHERE slug = $1")
        .bind(slug)
        .fetch_one(&app.pool)
        .await?;
    Ok(id)
}

async fn insert_submission(app: &TestApp, service_id: Option<Uuid>, name: &str) -> Result<Uuid> {
    let submission = Submission::create(
        &app.pool,
        &NewSubmission {
            service_id,
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..Default::default()
        },
    )
    .await?;
    Ok(submission.id)
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|s| s["full_name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn list_is_newest_first_with_service_and_files() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    let token = app.admin_token().await?;
    let web = service_id(&app, "web-development").await?;

    let first = insert_submission(&app, Some(web), "Ada").await?;
    insert_submission(&app, None, "Grace").await?;
    SubmissionFile::attach(
        &app.pool,
        &NewSubmissionFile {
            submission_id: first,
            original_name: "brief.pdf".to_string(),
            storage_path: "uploads/brief.pdf".to_string(),
            file_type: Some("application/pdf".to_string()),
            file_size_bytes: Some(2048),
        },
    )
    .await?;

    let (status, body) = app.request(Method::GET, "/api/v1/admin/submissions", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Grace", "Ada"]);

    assert_eq!(body[0]["service_slug"], Value::Null);
    assert_eq!(body[0]["files"], json!([]));
    assert_eq!(body[1]["service_slug"], "web-development");
    assert_eq!(body[1]["status"], "new");
    assert_eq!(body[1]["files"][0]["original_name"], "brief.pdf");

    app.cleanup().await
}

#[tokio::test]
async fn filters_by_status_and_service() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    let token = app.admin_token().await?;
    let web = service_id(&app, "web-development").await?;
    let mobile = service_id(&app, "mobile-app-development").await?;

    let ada = insert_submission(&app, Some(web), "Ada").await?;
    insert_submission(&app, Some(web), "Grace").await?;
    insert_submission(&app, Some(mobile), "Linus").await?;

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/v1/admin/submissions/{ada}"),
            Some(&token),
            Some(json!({ "status": "reviewed" })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .request(Method::GET, "/api/v1/admin/submissions?status=new", Some(&token), None)
        .await?;
    assert_eq!(names(&body), ["Linus", "Grace"]);

    let (_, body) = app
        .request(Method::GET, "/api/v1/admin/submissions?service=web-development", Some(&token), None)
        .await?;
    assert_eq!(names(&body), ["Grace", "Ada"]);

    let (_, body) = app
        .request(
            Method::GET,
            "/api/v1/admin/submissions?status=reviewed&service=web-development",
            Some(&token),
            None,
        )
        .await?;
    assert_eq!(names(&body), ["Ada"]);

    let (status, body) = app
        .request(Method::GET, "/api/v1/admin/submissions?status=bogus", Some(&token), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    app.cleanup().await
}

#[tokio::test]
async fn invalid_status_update_leaves_row_untouched() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    let token = app.admin_token().await?;
    let id = insert_submission(&app, None, "Ada").await?;
    let uri = format!("/api/v1/admin/submissions/{id}");

    for payload in [json!({ "status": "done" }), json!({}), json!({ "status": "NEW" })] {
        let (status, body) = app.request(Method::PUT, &uri, Some(&token), Some(payload)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid status");
    }

    let stored = Submission::find_by_id(&app.pool, id).await?.expect("submission exists");
    assert_eq!(stored.status.as_str(), "new");

    app.cleanup().await
}

#[tokio::test]
async fn status_update_walks_every_state() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    let token = app.admin_token().await?;
    let id = insert_submission(&app, None, "Ada").await?;
    let uri = format!("/api/v1/admin/submissions/{id}");

    // No transition rules: any enumerated status is reachable from any other.
    for next in ["archived", "new", "contacted", "reviewed"] {
        let (status, body) = app
            .request(Method::PUT, &uri, Some(&token), Some(json!({ "status": next })))
            .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], next);
        assert_eq!(body["id"], id.to_string());
    }

    app.cleanup().await
}

#[tokio::test]
async fn status_update_of_unknown_submission_is_404() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    let token = app.admin_token().await?;

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/v1/admin/submissions/{}", Uuid::new_v4()),
            Some(&token),
            Some(json!({ "status": "reviewed" })),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Submission not found");

    app.cleanup().await
}

#[tokio::test]
async fn deleting_a_submission_removes_its_files() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    let id = insert_submission(&app, None, "Ada").await?;
    SubmissionFile::attach(
        &app.pool,
        &NewSubmissionFile {
            submission_id: id,
            original_name: "logo.png".to_string(),
            storage_path: "uploads/logo.png".to_string(),
            file_type: None,
            file_size_bytes: None,
        },
    )
    .await?;

    sqlx::query("DELETE FROM submissions WHERE id = $1").bind(id).execute(&app.pool).await?;

    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submission_files")
        .fetch_one(&app.pool)
        .await?;
    assert_eq!(remaining, 0);

    app.cleanup().await
}

#[tokio::test]
async fn deleting_a_service_keeps_its_submissions() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    let token = app.admin_token().await?;
    let web = service_id(&app, "web-development").await?;
    insert_submission(&app, Some(web), "Ada").await?;

    sqlx::query("DELETE FROM services WHERE id = $1").bind(web).execute(&app.pool).await?;

    let (_, body) = app.request(Method::GET, "/api/v1/admin/submissions", Some(&token), None).await?;
    assert_eq!(names(&body), ["Ada"]);
    assert_eq!(body[0]["service_id"], Value::Null);

    app.cleanup().await
}

#[tokio::test]
async fn non_uuid_ids_are_not_found() -> Result<()> {
    let Some(app) = TestApp::spawn().await? else { return Ok(()) };
    let token = app.admin_token().await?;

    for id in ["42", "not-an-id"] {
        let (status, body) = app
            .request(
                Method::PUT,
                &format!("/api/v1/admin/submissions/{id}"),
                Some(&token),
                Some(json!({ "status": "reviewed" })),
            )
            .await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{id}");
        assert_eq!(body, json!({ "error": "Submission not found" }));
    }

    let (status, body) = app
        .request(Method::PUT, "/api/v1/admin/posts/42", Some(&token), Some(json!({ "title": "x" })))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Post not found" }));

    let (status, body) = app.request(Method::DELETE, "/api/v1/admin/posts/42", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Post not found" }));

    app.cleanup().await
}
