use std::sync::Arc;

use axum::{
    routing::{get, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::storage::student_list::StudentListStore;
use service::student::{repository::SeaOrmStudentRepository, service::StudentService};

use crate::openapi::ApiDoc;

pub mod memory_students;
pub mod students;

/// Shared state of the database-backed router.
#[derive(Clone)]
pub struct ServerState {
    pub students: Arc<StudentService<SeaOrmStudentRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmStudentRepository::new(db));
        Self { students: Arc::new(StudentService::new(repo)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn with_tracing(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .include_headers(false),
            )
            // 5xx responses are logged at ERROR
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}

/// Router of the database-backed service. `api_docs` mounts the OpenAPI
/// document and Swagger UI.
pub fn build_router(state: ServerState, cors: CorsLayer, api_docs: bool) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/api/students", get(students::list).post(students::create))
        .route("/api/students/:rn", put(students::update).delete(students::delete))
        .with_state(state);

    let api = if api_docs {
        api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    } else {
        api
    };

    with_tracing(api.layer(cors))
}

/// Router of the in-memory service. No CORS layer.
pub fn build_memory_router(store: StudentListStore) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/students", get(memory_students::list).post(memory_students::create))
        .route(
            "/students/:rn",
            get(memory_students::get)
                .put(memory_students::update)
                .delete(memory_students::delete),
        )
        .with_state(store);

    with_tracing(api)
}
