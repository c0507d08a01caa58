/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User CRUD endpoints
/// - `recipes`: Recipe CRUD endpoints

pub mod health;
pub mod recipes;
pub mod users;

use serde::{Deserialize, Serialize};

/// Fixed confirmation message returned by the delete endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}
