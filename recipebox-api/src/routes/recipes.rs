/// Recipe endpoints
///
/// One handler per verb+path against the `recipes` table:
///
/// - `POST /recipe` - Create recipe
/// - `GET /recipe/:id` - Read one recipe
/// - `GET /recipes` - List all recipes
/// - `PUT /recipe/:id` - Full-replace update
/// - `DELETE /recipe/:id` - Delete
///
/// The payload-supplied `user_id` is trusted as-is on every create and
/// edit; the only ownership check is the database foreign key, and a
/// violation surfaces as a 409.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};
use axum::{
    extract::{Path, State},
    Json,
};
use recipebox_shared::models::recipe::{CreateRecipe, Recipe, UpdateRecipe};
use serde::{Deserialize, Serialize};

/// Request body for creating or replacing a recipe
///
/// Title and body are required; `user_id` may be null (an unowned
/// recipe) but a non-null value must reference an existing user.
#[derive(Debug, Deserialize)]
pub struct RecipePayload {
    /// Recipe title
    pub title: String,

    /// Recipe body text
    pub body: String,

    /// Owning user id, if any
    pub user_id: Option<i32>,
}

/// Serialized recipe projection
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    /// Recipe id
    pub recipe_id: i32,

    /// Recipe title
    pub title: String,

    /// Recipe body text
    pub body: String,

    /// Owning user id, if any
    pub user_id: Option<i32>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            recipe_id: recipe.recipe_id,
            title: recipe.title,
            body: recipe.body,
            user_id: recipe.user_id,
        }
    }
}

/// Create a new recipe
///
/// # Endpoint
///
/// ```text
/// POST /recipe
/// Content-Type: application/json
///
/// {"title": "Bread", "body": "Flour, water, salt, yeast.", "user_id": 1}
/// ```
///
/// # Response
///
/// ```json
/// {"recipe_id": 1, "title": "Bread", "body": "Flour, water, salt, yeast.", "user_id": 1}
/// ```
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(req): Json<RecipePayload>,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = Recipe::create(
        &state.db,
        CreateRecipe {
            title: req.title,
            body: req.body,
            user_id: req.user_id,
        },
    )
    .await?;

    Ok(Json(recipe.into()))
}

/// Read one recipe by id
///
/// An unknown id is a 404 fault, never a silent empty success.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = Recipe::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Recipe {} not found", id)))?;

    Ok(Json(recipe.into()))
}

/// List all recipes
///
/// There is no pagination; the whole table is returned.
pub async fn list_recipes(State(state): State<AppState>) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let recipes = Recipe::list(&state.db).await?;

    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// Full-replace update of a recipe
///
/// Overwrites title, body, and owner from the body; this is not a merge,
/// and a body missing title or body is rejected by deserialization.
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<RecipePayload>,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = Recipe::update(
        &state.db,
        id,
        UpdateRecipe {
            title: req.title,
            body: req.body,
            user_id: req.user_id,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Recipe {} not found", id)))?;

    Ok(Json(recipe.into()))
}

/// Delete a recipe
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Recipe::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Recipe {} not found", id)));
    }

    Ok(Json(MessageResponse {
        message: "Recipe deleted".to_string(),
    }))
}
