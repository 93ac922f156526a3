use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use axum_helpers::{ErrorResponse, ValidatedJson, ValidatedQuery};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, ListUsersQuery, UpdateUser, User, UserId};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        delete_user,
        permanently_delete_user,
    ),
    components(schemas(User, UserId, CreateUser, UpdateUser, ErrorResponse)),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
///
/// Paths are relative; the application nests this under `/users`.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/permanent", delete(permanently_delete_user))
        .with_state(shared_service)
}

/// List users
///
/// GET /users?active_only=true
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users in creation order", body = Vec<User>),
        (status = 422, description = "Invalid query parameter", body = ErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users(query.active_only).await?;
    Ok(Json(users))
}

/// Create a new user
///
/// POST /users
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Username or email already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
///
/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<Json<User>> {
    let user = service.get_user(&UserId::from(id)).await?;
    Ok(Json(user))
}

/// Update a user's email and/or full name
///
/// PUT /users/{id}
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<User>> {
    let user = service.update_user(&UserId::from(id), input).await?;
    Ok(Json(user))
}

/// Soft delete a user
///
/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deactivated"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<StatusCode> {
    service.deactivate_user(&UserId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Permanently delete a user
///
/// DELETE /users/{id}/permanent
#[utoipa::path(
    delete,
    path = "/{id}/permanent",
    tag = TAG,
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn permanently_delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<StatusCode> {
    let username = service.delete_user(&UserId::from(id)).await?;
    tracing::debug!(%username, "Permanently deleted user");
    Ok(StatusCode::NO_CONTENT)
}
