/// User endpoints
///
/// One handler per verb+path, each a single load-mutate-save-serialize
/// cycle against the `user` table:
///
/// - `POST /user` - Create user (hashes the password)
/// - `GET /user/:id` - Read one user
/// - `GET /users` - List all users
/// - `PUT /user/:id` - Full-replace update
/// - `DELETE /user/:id` - Delete (cascades to owned recipes)
/// - `GET /user/:id/recipes` - List recipes owned by a user
///
/// Responses carry the `{user_id, email}` projection; the stored password
/// hash never leaves the service. Field contents are not validated.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{recipes::RecipeResponse, MessageResponse},
};
use axum::{
    extract::{Path, State},
    Json,
};
use recipebox_shared::{
    auth::password,
    models::{
        recipe::Recipe,
        user::{CreateUser, UpdateUser, User},
    },
};
use serde::{Deserialize, Serialize};

/// Request body for creating or replacing a user
///
/// Both fields are required; a body missing either fails deserialization
/// before any handler runs.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    /// Email address
    pub email: String,

    /// Plaintext password (hashed before it is persisted)
    pub password: String,
}

/// Serialized user projection
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User id
    pub user_id: i32,

    /// Email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
        }
    }
}

/// Create a new user
///
/// # Endpoint
///
/// ```text
/// POST /user
/// Content-Type: application/json
///
/// {"email": "user@example.com", "password": "hunter2"}
/// ```
///
/// # Response
///
/// ```json
/// {"user_id": 1, "email": "user@example.com"}
/// ```
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserPayload>,
) -> ApiResult<Json<UserResponse>> {
    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    Ok(Json(user.into()))
}

/// Read one user by id
///
/// An unknown id is a 404 fault, never a silent empty success.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<UserResponse>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user.into()))
}

/// List all users
///
/// There is no pagination; the whole table is returned.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = User::list(&state.db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Full-replace update of a user
///
/// Overwrites both email and password from the body; this is not a merge,
/// and a body missing either field is rejected by deserialization.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<UserPayload>,
) -> ApiResult<Json<UserResponse>> {
    let password_hash = password::hash_password(&req.password)?;

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

    Ok(Json(user.into()))
}

/// Delete a user
///
/// The database cascades the delete to every recipe the user owns.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = User::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("User {} not found", id)));
    }

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}

/// List the recipes owned by a user
///
/// Returns an empty list for a user with no recipes (or an unknown user
/// id; existence is not checked here).
pub async fn list_user_recipes(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let recipes = Recipe::list_by_user(&state.db, id).await?;

    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}
