//! Database-backed handlers under `/api/students`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use models::student::{self, Student};
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

#[utoipa::path(
    get, path = "/api/students", tag = "students",
    responses(
        (status = 200, description = "All stored students"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<student::Model>>, JsonApiError> {
    match state.students.list().await {
        Ok(list) => { info!(count = list.len(), "list students"); Ok(Json(list)) }
        Err(e) => Err(JsonApiError::from_service(e, "Error retrieving students")),
    }
}

#[utoipa::path(
    post, path = "/api/students", tag = "students",
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Violated field rules or unreadable body"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Student>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload.map_err(|rejection| JsonApiError::invalid_body(&rejection))?;
    let created = state
        .students
        .create(&input)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error creating student"))?;
    let location = format!("/api/students/{}", created.rn);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)).into_response())
}

#[utoipa::path(
    put, path = "/api/students/{rn}", tag = "students",
    params(("rn" = i32, Path, description = "Roll number")),
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Name or batch blank, or unreadable body"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(rn): Path<i32>,
    payload: Result<Json<Student>, JsonRejection>,
) -> Result<Json<student::Model>, JsonApiError> {
    let Json(input) = payload.map_err(|rejection| JsonApiError::invalid_body(&rejection))?;
    state
        .students
        .update(rn, &input)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, "Error updating student"))
}

#[utoipa::path(
    delete, path = "/api/students/{rn}", tag = "students",
    params(("rn" = i32, Path, description = "Roll number")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(rn): Path<i32>) -> Result<Json<String>, JsonApiError> {
    state
        .students
        .delete(rn)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Error deleting student"))?;
    Ok(Json(format!("Student with RN {rn} deleted successfully")))
}
