//! Error types for the web publication server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::epub::EpubError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid archive name: {0}")]
    InvalidFilename(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request has no Host header")]
    MissingHost,

    #[error("EPUB error: {0}")]
    Epub(#[from] EpubError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// Status code, machine-readable kind and client-facing message
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::InvalidFilename(name) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                format!("Invalid archive name: {}", name),
            ),
            AppError::MissingHost => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                "A Host header is required to build publication links".to_string(),
            ),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Not found: {}", what),
            ),
            AppError::Epub(e) => match e {
                EpubError::ArchiveNotFound(_) => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    "Publication not found".to_string(),
                ),
                EpubError::AssetNotFound(name) => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("Asset not found: {}", name),
                ),
                EpubError::Archive(_) => (
                    StatusCode::BAD_GATEWAY,
                    "archive_error",
                    "Publication archive is unreadable".to_string(),
                ),
                EpubError::Container(_) => (
                    StatusCode::BAD_GATEWAY,
                    "container_error",
                    "Publication container descriptor is invalid".to_string(),
                ),
                EpubError::Package(_) => (
                    StatusCode::BAD_GATEWAY,
                    "package_error",
                    "Publication package document is invalid".to_string(),
                ),
                EpubError::Io(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "IO error".to_string(),
                ),
            },
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred".to_string(),
            ),
        }
    }

    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = self.parts();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
