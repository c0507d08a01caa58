/// HTTP Basic authentication middleware for Axum
///
/// The middleware decodes the `Authorization: Basic` header into an
/// email/password pair, looks the user up by email, and verifies the
/// password against the stored hash. On success an [`AuthContext`] is
/// inserted into the request extensions for downstream handlers.
///
/// Whether any route is actually guarded is decided by the server
/// configuration; the middleware itself is route-agnostic.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use recipebox_shared::auth::middleware::{basic_auth_middleware, AuthContext};
/// use sqlx::PgPool;
///
/// async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.email)
/// }
///
/// fn router(pool: PgPool) -> Router {
///     Router::new()
///         .route("/whoami", get(whoami))
///         .layer(middleware::from_fn(move |req, next| {
///             basic_auth_middleware(pool.clone(), req, next)
///         }))
/// }
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use sqlx::PgPool;

use super::password;
use crate::models::user::User;

/// Authentication context added to request extensions
///
/// Handlers behind the auth layer can extract it with Axum's `Extension`
/// extractor to learn who the caller is.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: i32,

    /// Authenticated user email
    pub email: String,
}

impl AuthContext {
    /// Creates the auth context for a verified user
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
        }
    }
}

/// Error type for the authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not well-formed Basic auth
    InvalidFormat(String),

    /// Unknown email or wrong password
    InvalidCredentials,

    /// Database or hash failure during verification
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password").into_response()
            }
            AuthError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Parses an `Authorization: Basic` header value into (email, password)
///
/// The payload is base64 of `email:password`; the password may itself
/// contain colons, so only the first colon splits.
pub fn parse_basic_credentials(header: &str) -> Result<(String, String), AuthError> {
    let encoded = header
        .strip_prefix("Basic ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Basic credentials".to_string()))?;

    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|e| AuthError::InvalidFormat(format!("Invalid base64 payload: {}", e)))?;

    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::InvalidFormat("Credentials are not valid UTF-8".to_string()))?;

    let (email, pass) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::InvalidFormat("Expected email:password".to_string()))?;

    Ok((email.to_string(), pass.to_string()))
}

/// Basic authentication middleware
///
/// Verifies the caller's email/password against the `user` table and adds
/// an [`AuthContext`] extension on success.
///
/// # Errors
///
/// - 401 if the header is missing, the email is unknown, or the password
///   does not match the stored hash
/// - 400 if the header is not well-formed Basic auth
/// - 500 if the lookup fails or the stored hash is malformed
pub async fn basic_auth_middleware(
    pool: PgPool,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let (email, supplied_password) = parse_basic_credentials(auth_header)?;

    let user = User::find_by_email(&pool, &email)
        .await
        .map_err(|e| AuthError::Internal(format!("User lookup failed: {}", e)))?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = password::verify_password(&supplied_password, &user.password)
        .map_err(|e| AuthError::Internal(e.to_string()))?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    req.extensions_mut().insert(AuthContext::from_user(&user));

    Ok(next.run(req).await)
}
