/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use recipebox_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = recipebox_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use recipebox_shared::auth::middleware::basic_auth_middleware;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                  # Health check (always public)
/// ├── /user                    # POST: create user
/// ├── /users                   # GET: list users
/// ├── /user/:id                # GET / PUT / DELETE
/// ├── /user/:id/recipes        # GET: recipes owned by a user
/// ├── /recipe                  # POST: create recipe
/// ├── /recipes                 # GET: list recipes
/// └── /recipe/:id              # GET / PUT / DELETE
/// ```
///
/// When `auth.required` is set, every /user* and /recipe* route is gated
/// behind the Basic-auth layer; otherwise the surface is public and the
/// verifier is simply never consulted.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // CRUD surface, one handler per verb+path
    let mut api_routes = Router::new()
        .route("/user", post(routes::users::create_user))
        .route("/users", get(routes::users::list_users))
        .route(
            "/user/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route("/user/:id/recipes", get(routes::users::list_user_recipes))
        .route("/recipe", post(routes::recipes::create_recipe))
        .route("/recipes", get(routes::recipes::list_recipes))
        .route(
            "/recipe/:id",
            get(routes::recipes::get_recipe)
                .put(routes::recipes::update_recipe)
                .delete(routes::recipes::delete_recipe),
        );

    if state.config.auth.required {
        api_routes = api_routes.layer(axum::middleware::from_fn_with_state(
            state.clone(),
            basic_auth_layer,
        ));
    }

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Basic authentication middleware layer
///
/// Delegates credential verification to the shared middleware and maps
/// its failures into the API error space.
async fn basic_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let response = basic_auth_middleware(state.db.clone(), req, next).await?;
    Ok(response)
}
