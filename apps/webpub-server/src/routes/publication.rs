//! Publication routes
//!
//! Everything below `/{filename}/` is handled by one wildcard route:
//! `manifest.json`, `webapp.webmanifest` and `index.html` are generated,
//! any other path is extracted from the archive.

use std::path::PathBuf;

use axum::{
    extract::{Host, Path, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::epub::{self, Publication, UrlBase};
use crate::error::{AppError, Result};
use crate::state::AppState;

pub const MANIFEST: &str = "manifest.json";
pub const WEBAPP_MANIFEST: &str = "webapp.webmanifest";
pub const INDEX_PAGE: &str = "index.html";

/// Create the publication router
pub fn router() -> Router<AppState> {
    Router::new().route("/:filename/*rest", get(publication_route))
}

async fn publication_route(
    State(state): State<AppState>,
    host: Option<Host>,
    Path((filename, rest)): Path<(String, String)>,
) -> Result<Response> {
    let path = state.archive_path(&filename)?;

    match rest.as_str() {
        MANIFEST => get_manifest(&state, host.map(|Host(h)| h), filename, path).await,
        WEBAPP_MANIFEST => get_webapp_manifest(path).await,
        INDEX_PAGE => book_index(&state, &filename, path).await,
        asset => get_asset(path, asset.to_string()).await,
    }
}

/// Serve the publication manifest.
///
/// Links use the configured public host, else the request's `Host`.
async fn get_manifest(
    state: &AppState,
    request_host: Option<String>,
    filename: String,
    path: PathBuf,
) -> Result<Response> {
    let host = state
        .config()
        .public_host
        .clone()
        .or(request_host)
        .ok_or(AppError::MissingHost)?;
    let urls = UrlBase::new(state.mode().scheme(), host, filename);
    let modified = Utc::now();

    let manifest = with_publication(path, move |publication| {
        publication.manifest(&urls, modified)
    })
    .await?;

    Ok((
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))],
        Json(manifest),
    )
        .into_response())
}

/// Serve the web-app install manifest
async fn get_webapp_manifest(path: PathBuf) -> Result<Response> {
    let webapp = with_publication(path, |publication| publication.webapp_manifest()).await?;

    Ok((
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))],
        Json(webapp),
    )
        .into_response())
}

/// Serve the reader page for an archive
async fn book_index(state: &AppState, filename: &str, path: PathBuf) -> Result<Response> {
    let exists = tokio::fs::metadata(&path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !exists {
        return Err(epub::EpubError::ArchiveNotFound(filename.to_string()).into());
    }

    Ok(Html(state.index_template().render(filename)).into_response())
}

/// Serve one asset extracted from the archive
async fn get_asset(path: PathBuf, asset_name: String) -> Result<Response> {
    let asset = with_publication(path, move |publication| publication.asset(&asset_name)).await?;

    let content_type = HeaderValue::from_str(&asset.media_type)
        .map_err(|e| AppError::Internal(format!("Invalid content type: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        ],
        asset.data,
    )
        .into_response())
}

/// Open the archive on the blocking pool and run `f` against it.
///
/// The archive is closed when the task finishes, whatever the outcome.
async fn with_publication<T, F>(path: PathBuf, f: F) -> Result<T>
where
    F: FnOnce(&mut Publication) -> epub::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || {
        let mut publication = Publication::open(&path)?;
        f(&mut publication)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(result?)
}
