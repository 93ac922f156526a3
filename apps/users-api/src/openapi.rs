use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "User Management API",
        version = "1.0.0",
        description = "In-memory user management: create, list, update, soft and hard delete"
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc),
    )
)]
pub struct ApiDoc;
