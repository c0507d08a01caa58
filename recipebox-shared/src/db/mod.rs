/// Database layer for RecipeBox
///
/// This module provides database connection pooling and the migration
/// runner. Row types and their CRUD operations live in the `models`
/// module at the crate root.
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Embedded migration runner

pub mod migrations;
pub mod pool;
