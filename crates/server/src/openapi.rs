use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Request/response body of a student.
#[derive(ToSchema)]
pub struct StudentDoc {
    pub rn: i32,
    #[schema(max_length = 100)]
    pub name: String,
    #[schema(max_length = 50)]
    pub batch: String,
    #[schema(minimum = 0, maximum = 100)]
    pub marks: i32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            StudentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
