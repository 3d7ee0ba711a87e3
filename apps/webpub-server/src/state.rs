//! Application state management

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, DeploymentMode};
use crate::error::AppError;
use crate::html::IndexTemplate;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    index_template: IndexTemplate,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, index_template: IndexTemplate) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                index_template,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Deployment mode the process was started in
    pub fn mode(&self) -> DeploymentMode {
        self.inner.config.mode
    }

    /// Get the index page template
    pub fn index_template(&self) -> &IndexTemplate {
        &self.inner.index_template
    }

    /// Map a request filename onto an archive path inside the library root.
    ///
    /// Only plain file names are accepted: no separators, no `.`/`..`,
    /// no hidden files.
    pub fn archive_path(&self, filename: &str) -> Result<PathBuf, AppError> {
        let invalid = filename.is_empty()
            || filename.starts_with('.')
            || filename.contains(['/', '\\', '\0']);
        if invalid {
            return Err(AppError::InvalidFilename(filename.to_string()));
        }
        Ok(self.inner.config.library.root.join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let mut config = Config::default();
        config.library.root = PathBuf::from("/srv/books");
        AppState::new(config, IndexTemplate::default())
    }

    #[test]
    fn test_archive_path_inside_root() {
        assert_eq!(
            state().archive_path("book.epub").unwrap(),
            PathBuf::from("/srv/books/book.epub")
        );
    }

    #[test]
    fn test_archive_path_rejects_traversal() {
        let state = state();
        for name in ["", ".", "..", ".hidden.epub", "../etc/passwd", "a/b.epub", "a\\b.epub"] {
            assert!(
                matches!(state.archive_path(name), Err(AppError::InvalidFilename(_))),
                "{name:?} should be rejected"
            );
        }
    }
}
