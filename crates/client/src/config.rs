//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NOVASHOP_BACKEND_URL` - Origin of the NovaShop REST backend
//!   (e.g., `http://localhost:8000`)
//!
//! ## Optional
//! - `NOVASHOP_SESSION_FILE` - Path of the durable session file
//!   (default: `$HOME/.novashop/session.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin with any trailing slash stripped.
    pub backend_url: String,
    /// Path of the JSON file holding the persisted session.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `NOVASHOP_BACKEND_URL` is missing or not a
    /// valid http(s) origin.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_url = get_required_env("NOVASHOP_BACKEND_URL")?;
        let session_file = get_optional_env("NOVASHOP_SESSION_FILE").map(PathBuf::from);
        Self::new(&backend_url, session_file)
    }

    /// Build a configuration from explicit values (CLI overrides, tests).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `backend_url` is not a valid http(s) origin.
    pub fn new(backend_url: &str, session_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: normalize_backend_url(backend_url)?,
            session_file: session_file.unwrap_or_else(default_session_file),
        })
    }

    /// Resolve a product's image location from its stored picture reference.
    ///
    /// The backend serves uploads under a fixed path; line-item snapshots
    /// capture the fully resolved URL.
    #[must_use]
    pub fn product_image_url(&self, picture_ref: &str) -> String {
        format!(
            "{}/products/uploads/products/{picture_ref}",
            self.backend_url
        )
    }
}

/// Validate the backend origin and strip any trailing slash.
fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("NOVASHOP_BACKEND_URL".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "NOVASHOP_BACKEND_URL".to_string(),
            format!("expected an http(s) origin, got scheme '{}'", url.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Default session file location: `$HOME/.novashop/session.json`, or the
/// working directory when no home is available.
fn default_session_file() -> PathBuf {
    std::env::var("HOME").map_or_else(
        |_| PathBuf::from(".novashop-session.json"),
        |home| PathBuf::from(home).join(".novashop").join("session.json"),
    )
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8000/", None).unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000");
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        let result = ClientConfig::new("ftp://localhost:8000", None);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_new_rejects_garbage() {
        assert!(ClientConfig::new("not a url", None).is_err());
    }

    #[test]
    fn test_product_image_url() {
        let config = ClientConfig::new("http://localhost:8000", None).unwrap();
        assert_eq!(
            config.product_image_url("lamp.jpg"),
            "http://localhost:8000/products/uploads/products/lamp.jpg"
        );
    }

    #[test]
    fn test_explicit_session_file() {
        let config =
            ClientConfig::new("http://localhost:8000", Some(PathBuf::from("/tmp/s.json")))
                .unwrap();
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
    }
}
