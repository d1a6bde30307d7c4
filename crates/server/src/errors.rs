use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::student::Violation;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

const PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.6.1";
const PROBLEM_TITLE: &str = "An error occurred while processing your request.";

/// Error response carrying a status and an arbitrary JSON body.
///
/// Client errors carry a bare JSON string or a list of strings; store
/// failures are rendered as `application/problem+json`.
#[derive(Debug)]
pub struct JsonApiError {
    status: StatusCode,
    body: serde_json::Value,
    problem: bool,
}

impl JsonApiError {
    pub fn new(status: StatusCode, body: serde_json::Value) -> Self {
        Self { status, body, problem: false }
    }

    /// 400 with one message per broken rule.
    pub fn violations(v: &[Violation]) -> Self {
        let msgs: Vec<String> = v.iter().map(|x| x.to_string()).collect();
        Self::new(StatusCode::BAD_REQUEST, serde_json::json!(msgs))
    }

    pub fn message(status: StatusCode, msg: impl Into<String>) -> Self {
        Self::new(status, serde_json::Value::String(msg.into()))
    }

    /// 500 problem document with `detail` as given.
    pub fn problem(detail: impl Into<String>) -> Self {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = serde_json::json!({
            "type": PROBLEM_TYPE,
            "title": PROBLEM_TITLE,
            "status": status.as_u16(),
            "detail": detail.into(),
        });
        Self { status, body, problem: true }
    }

    /// 400 for a body that is not a JSON student, whatever status axum picked.
    pub fn invalid_body(rejection: &JsonRejection) -> Self {
        Self::message(StatusCode::BAD_REQUEST, rejection.body_text())
    }

    /// Map a service failure; store failures get `context` prefixed to the message.
    pub fn from_service(e: ServiceError, context: &str) -> Self {
        match e {
            ServiceError::Invalid(v) => Self::violations(&v),
            ServiceError::Validation(msg) => Self::message(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => Self::message(StatusCode::NOT_FOUND, msg),
            other => {
                error!(err = %other, context, "student store failure");
                Self::problem(format!("{context}: {}", other.store_message()))
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut res = (self.status, Json(self.body)).into_response();
        if self.problem {
            res.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/problem+json"),
            );
        }
        res
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
