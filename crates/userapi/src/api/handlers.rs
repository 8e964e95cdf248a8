//! Request handlers for the `/api/v1/users` routes.
//!
//! Each handler maps one HTTP operation onto the matching [`UserStore`]
//! method. The `utoipa::path` annotations feed the generated OpenAPI
//! document.
//!
//! [`UserStore`]: crate::store::UserStore

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::info;

use super::error::{ApiResult, DeferredJson, ErrorBody, JsonBody, PathParam};
use super::AppState;
use crate::user::{NewUser, UpdateUser, User, UserId};

/// Get all users
///
/// Returns every user in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [User])
    )
)]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store.list())
}

/// Create a new user
///
/// The store assigns the id; any id in the body is ignored.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed body", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.store.create(payload)?;
    info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<UserId>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.store.get(id)?))
}

/// Update a user by ID
///
/// Fields missing from the body keep their current values. Supplying `id`
/// renames the user. An unknown id is reported before the body is decoded.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Malformed body or id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "New id already in use", body = ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<UserId>,
    body: DeferredJson<UpdateUser>,
) -> ApiResult<Json<User>> {
    state.store.get(id)?;
    let patch = body.decode()?;
    let user = state.store.update(id, patch)?;
    info!(id, new_id = user.id, "user updated");
    Ok(Json(user))
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    PathParam(id): PathParam<UserId>,
) -> ApiResult<StatusCode> {
    state.store.delete(id)?;
    info!(id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
