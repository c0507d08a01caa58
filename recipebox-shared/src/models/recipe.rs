/// Recipe model and database operations
///
/// A recipe is a titled body of text, optionally owned by a user. The
/// owning `user_id` is taken from the request payload as-is on every
/// create and edit; the only referential guarantee is the database
/// foreign key.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE recipes (
///     recipe_id SERIAL PRIMARY KEY,
///     title     TEXT NOT NULL,
///     body      TEXT NOT NULL,
///     user_id   INTEGER REFERENCES "user" (user_id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Recipe row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    /// Auto-increment primary key
    pub recipe_id: i32,

    /// Recipe title
    pub title: String,

    /// Recipe body text
    pub body: String,

    /// Owning user id (nullable foreign key)
    pub user_id: Option<i32>,
}

/// Input for creating a new recipe
#[derive(Debug, Clone)]
pub struct CreateRecipe {
    pub title: String,
    pub body: String,
    pub user_id: Option<i32>,
}

/// Input for updating an existing recipe
///
/// Updates are a full replace of all three mutable columns, not a merge.
#[derive(Debug, Clone)]
pub struct UpdateRecipe {
    pub title: String,
    pub body: String,
    pub user_id: Option<i32>,
}

impl Recipe {
    /// Creates a new recipe
    ///
    /// # Errors
    ///
    /// Returns an error if `user_id` is non-null and references no
    /// existing user (foreign key violation), or if the connection fails.
    pub async fn create(pool: &PgPool, data: CreateRecipe) -> Result<Self, sqlx::Error> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (title, body, user_id)
            VALUES ($1, $2, $3)
            RETURNING recipe_id, title, body, user_id
            "#,
        )
        .bind(data.title)
        .bind(data.body)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(recipe)
    }

    /// Finds a recipe by primary key
    ///
    /// Returns `None` if no row exists for the id.
    pub async fn find_by_id(pool: &PgPool, recipe_id: i32) -> Result<Option<Self>, sqlx::Error> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT recipe_id, title, body, user_id
            FROM recipes
            WHERE recipe_id = $1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;

        Ok(recipe)
    }

    /// Overwrites all mutable columns of an existing recipe
    ///
    /// Returns the updated row, or `None` if no row exists for the id.
    pub async fn update(
        pool: &PgPool,
        recipe_id: i32,
        data: UpdateRecipe,
    ) -> Result<Option<Self>, sqlx::Error> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET title = $2, body = $3, user_id = $4
            WHERE recipe_id = $1
            RETURNING recipe_id, title, body, user_id
            "#,
        )
        .bind(recipe_id)
        .bind(data.title)
        .bind(data.body)
        .bind(data.user_id)
        .fetch_optional(pool)
        .await?;

        Ok(recipe)
    }

    /// Deletes a recipe by primary key
    ///
    /// Returns true if a row was deleted, false if the id did not exist.
    pub async fn delete(pool: &PgPool, recipe_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every recipe, ordered by primary key
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT recipe_id, title, body, user_id
            FROM recipes
            ORDER BY recipe_id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(recipes)
    }

    /// Lists every recipe owned by the given user, ordered by primary key
    ///
    /// Returns an empty list for an unknown user id; the existence of the
    /// user is not checked.
    pub async fn list_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT recipe_id, title, body, user_id
            FROM recipes
            WHERE user_id = $1
            ORDER BY recipe_id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(recipes)
    }
}
