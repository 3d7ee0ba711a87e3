//! Route modules for the web publication server

pub mod health;
pub mod publication;

use axum::http::Uri;

use crate::error::AppError;

/// Fallback for paths no route matches
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
