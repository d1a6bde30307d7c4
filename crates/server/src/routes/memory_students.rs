//! In-memory handlers under `/students`. No validation, no store failures.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use models::student::Student;
use service::storage::student_list::StudentListStore;
use tracing::info;

pub async fn list(State(store): State<StudentListStore>) -> Json<Vec<Student>> {
    Json(store.list().await)
}

pub async fn get(State(store): State<StudentListStore>, Path(rn): Path<i32>) -> Result<Json<Student>, StatusCode> {
    store.get(rn).await.map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Upsert: an existing entry with the same `rn` is replaced.
pub async fn create(
    State(store): State<StudentListStore>,
    payload: Result<Json<Student>, JsonRejection>,
) -> Response {
    let Ok(Json(input)) = payload else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let saved = store.upsert(input).await;
    info!(rn = saved.rn, "memory student saved");
    let location = format!("/students/{}", saved.rn);
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(saved)).into_response()
}

pub async fn update(
    State(store): State<StudentListStore>,
    Path(rn): Path<i32>,
    payload: Result<Json<Student>, JsonRejection>,
) -> StatusCode {
    let Ok(Json(input)) = payload else {
        return StatusCode::BAD_REQUEST;
    };
    if store.update(rn, input).await { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}

pub async fn delete(State(store): State<StudentListStore>, Path(rn): Path<i32>) -> StatusCode {
    match store.remove(rn).await {
        0 => StatusCode::NOT_FOUND,
        removed => { info!(rn, removed, "memory student deleted"); StatusCode::NO_CONTENT }
    }
}
