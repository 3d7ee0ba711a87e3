//! Configuration management for the web publication server

use clap::ValueEnum;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Port used when running in development mode
pub const DEV_PORT: u16 = 8080;

/// Port used in production when `SERVER_PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mode: DeploymentMode,
    pub server: ServerConfig,
    pub library: LibraryConfig,
    /// Host used in absolute URLs instead of the request `Host` header
    pub public_host: Option<String>,
}

/// Deployment mode, selected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Plain HTTP on port 8080
    Dev,
    /// HTTPS URLs; TLS is terminated in front of this process
    Production,
}

impl DeploymentMode {
    /// URL scheme (with `://`) used for every absolute link this server emits
    pub fn scheme(self) -> &'static str {
        match self {
            DeploymentMode::Dev => "http://",
            DeploymentMode::Production => "https://",
        }
    }

    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dev" | "development" => Some(DeploymentMode::Dev),
            "prod" | "production" => Some(DeploymentMode::Production),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    /// Directory archive filenames are resolved against
    pub root: PathBuf,
    /// Static files served ahead of the publication routes
    pub public_dir: PathBuf,
    /// Index page template; the built-in one is used if the file is missing
    pub index_template: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: DeploymentMode::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            library: LibraryConfig {
                root: PathBuf::from("."),
                public_dir: PathBuf::from("public"),
                index_template: PathBuf::from("index.html"),
            },
            public_host: None,
        }
    }
}

impl Config {
    /// Build the configuration from the environment.
    ///
    /// `mode` comes from the command line and takes precedence over
    /// `WEBPUB_MODE`. Dev mode always listens on port 8080.
    pub fn from_env(mode: Option<DeploymentMode>) -> Result<Self, ConfigError> {
        let mode = match mode {
            Some(mode) => mode,
            None => match env::var("WEBPUB_MODE") {
                Ok(value) => DeploymentMode::from_env_value(&value)
                    .ok_or(ConfigError::InvalidMode(value))?,
                Err(_) => DeploymentMode::Production,
            },
        };

        let port = match mode {
            DeploymentMode::Dev => DEV_PORT,
            DeploymentMode::Production => match env::var("SERVER_PORT") {
                Ok(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort(value))?,
                Err(_) => DEFAULT_PORT,
            },
        };

        Ok(Config {
            mode,
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            library: LibraryConfig {
                root: env::var("LIBRARY_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".")),
                public_dir: env::var("PUBLIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("public")),
                index_template: env::var("INDEX_TEMPLATE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("index.html")),
            },
            public_host: env::var("PUBLIC_HOST").ok().filter(|h| !h.is_empty()),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown deployment mode: {0}")]
    InvalidMode(String),

    #[error("Invalid SERVER_PORT: {0}")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_per_mode() {
        assert_eq!(DeploymentMode::Dev.scheme(), "http://");
        assert_eq!(DeploymentMode::Production.scheme(), "https://");
    }

    #[test]
    fn test_mode_from_env_value() {
        assert_eq!(DeploymentMode::from_env_value("dev"), Some(DeploymentMode::Dev));
        assert_eq!(
            DeploymentMode::from_env_value(" Production "),
            Some(DeploymentMode::Production)
        );
        assert_eq!(DeploymentMode::from_env_value("staging"), None);
    }

    #[test]
    fn test_dev_mode_uses_fixed_port() {
        let config = Config::from_env(Some(DeploymentMode::Dev)).unwrap();
        assert_eq!(config.mode, DeploymentMode::Dev);
        assert_eq!(config.server.port, DEV_PORT);
    }
}
