use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use service::storage::student_list::StudentListStore;
use tower::ServiceExt;

use server::routes;

fn build_app() -> Router {
    routes::build_memory_router(StudentListStore::new())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, HeaderMap, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, headers, value))
}

#[tokio::test]
async fn create_is_an_upsert() -> anyhow::Result<()> {
    let app = build_app();

    let (status, headers, body) = send(&app, "POST", "/students", Some(json!({"rn": 1, "name": "A"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers[header::LOCATION], "/students/1");
    assert_eq!(body["name"], "A");

    send(&app, "POST", "/students", Some(json!({"rn": 1, "name": "B"}))).await?;

    let (status, _, list) = send(&app, "GET", "/students", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([{"rn": 1, "name": "B", "batch": "", "marks": 0}]));
    Ok(())
}

#[tokio::test]
async fn create_skips_validation() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, _) = send(
        &app,
        "POST",
        "/students",
        Some(json!({"rn": 2, "name": "", "batch": "", "marks": 500})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _, body) = send(&app, "GET", "/students/2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["marks"], 500);
    Ok(())
}

#[tokio::test]
async fn get_update_delete_round() -> anyhow::Result<()> {
    let app = build_app();

    let (status, _, body) = send(&app, "GET", "/students/4", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, _, _) = send(&app, "PUT", "/students/4", Some(json!({"name": "X", "batch": "Y", "marks": 1}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, "POST", "/students", Some(json!({"rn": 4, "name": "Asha", "batch": "2024A", "marks": 88}))).await?;

    let (status, _, body) = send(&app, "PUT", "/students/4", Some(json!({"rn": 40, "name": "Asha R", "batch": "2024A", "marks": 90}))).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, _, body) = send(&app, "GET", "/students/4", None).await?;
    assert_eq!(body, json!({"rn": 4, "name": "Asha R", "batch": "2024A", "marks": 90}));

    let (status, _, _) = send(&app, "DELETE", "/students/4", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) = send(&app, "DELETE", "/students/4", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, list) = send(&app, "GET", "/students", None).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn no_cors_headers() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("GET")
        .uri("/students")
        .header(header::ORIGIN, "http://frontend.example")
        .body(Body::empty())?;
    let resp = app.oneshot(req).await?;
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    Ok(())
}

#[tokio::test]
async fn unreadable_body_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, _) = send(&app, "POST", "/students", Some(json!({"rn": "one"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&app, "POST", "/students", Some(json!({"rn": 1, "name": "A"}))).await?;
    let (status, _, _) = send(&app, "PUT", "/students/1", Some(json!({"marks": "x"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
