/// Database models for RecipeBox
///
/// This module contains the row types and their CRUD operations. Each
/// operation takes an explicit `&PgPool`; the persistence layer owns no
/// ambient state.
///
/// # Models
///
/// - `user`: User accounts (email + password hash), each owning recipes
/// - `recipe`: A titled body of text, optionally owned by a user
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
/// let new_user = CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod recipe;
pub mod user;
