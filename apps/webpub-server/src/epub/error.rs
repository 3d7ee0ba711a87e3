//! EPUB error types

use thiserror::Error;

/// Errors raised while opening an archive or resolving its contents
#[derive(Debug, Error)]
pub enum EpubError {
    /// No file at the requested archive path
    #[error("Archive not found: {0}")]
    ArchiveNotFound(String),

    /// The file exists but is not a readable ZIP container
    #[error("Failed to read ZIP archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// `META-INF/container.xml` is missing, malformed, or has no rootfile
    #[error("Container resolution failed: {0}")]
    Container(String),

    /// Package document is missing, malformed, or lacks a required element
    #[error("Package parse failed: {0}")]
    Package(String),

    /// No archive member matches the requested asset
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EpubError>;
