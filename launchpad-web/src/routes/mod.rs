/// Route handlers
///
/// - `landing`: Landing page
/// - `auth`: Session check
/// - `health`: Health check endpoint

pub mod auth;
pub mod health;
pub mod landing;

use crate::error::ApiError;
use axum::http::Uri;

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
