/// Authentication utilities
///
/// This module provides the authentication primitives for RecipeBox:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`middleware`]: HTTP Basic authentication middleware for Axum
///
/// # Example
///
/// ```
/// use recipebox_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod middleware;
pub mod password;
