/// User model and database operations
///
/// A user is an identity record: an email (indexed, not unique-enforced)
/// and a password hash. Users own zero or more recipes; deleting a user
/// cascades to its recipes at the database level.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE "user" (
///     user_id  SERIAL PRIMARY KEY,
///     email    TEXT NOT NULL,
///     password TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use recipebox_shared::models::user::{CreateUser, User};
/// use recipebox_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         email: "user@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// println!("Created user {}", user.user_id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User row
///
/// The `password` column holds an Argon2id PHC-format hash, never
/// plaintext. The HTTP layer projects this struct down to
/// `{user_id, email}` before serializing a response.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Auto-increment primary key
    pub user_id: i32,

    /// Email address (indexed, uniqueness not enforced)
    pub email: String,

    /// Argon2id password hash
    pub password: String,
}

/// Input for creating a new user
///
/// The caller hashes the plaintext password before constructing this.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

/// Input for updating an existing user
///
/// Updates are a full replace of both mutable columns, not a merge.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    /// New email address
    pub email: String,

    /// New Argon2id password hash
    pub password_hash: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (email, password)
            VALUES ($1, $2)
            RETURNING user_id, email, password
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by primary key
    ///
    /// Returns `None` if no row exists for the id.
    pub async fn find_by_id(pool: &PgPool, user_id: i32) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, password
            FROM "user"
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Email is not unique-enforced; if duplicates exist the first row by
    /// primary key wins. Used by the Basic-auth verification step.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, password
            FROM "user"
            WHERE email = $1
            ORDER BY user_id
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Overwrites both mutable columns of an existing user
    ///
    /// Returns the updated row, or `None` if no row exists for the id.
    pub async fn update(
        pool: &PgPool,
        user_id: i32,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE "user"
            SET email = $2, password = $3
            WHERE user_id = $1
            RETURNING user_id, email, password
            "#,
        )
        .bind(user_id)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by primary key
    ///
    /// The database cascades the delete to every recipe owned by the user.
    ///
    /// Returns true if a row was deleted, false if the id did not exist.
    pub async fn delete(pool: &PgPool, user_id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM "user" WHERE user_id = $1"#)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists every user, ordered by primary key
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, password
            FROM "user"
            ORDER BY user_id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            email: "test@example.com".to_string(),
            password_hash: "hash".to_string(),
        };

        assert_eq!(create_user.email, "test@example.com");
        assert_eq!(create_user.password_hash, "hash");
    }

    #[test]
    fn test_user_serializes_all_columns() {
        // The row type carries the hash; responses are projected by the
        // HTTP layer, not by this struct.
        let user = User {
            user_id: 1,
            email: "test@example.com".to_string(),
            password: "$argon2id$hash".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["email"], "test@example.com");
        assert!(json.get("password").is_some());
    }

    // Integration tests for database operations are in the api crate's
    // tests/ directory, driven through the HTTP surface.
}
