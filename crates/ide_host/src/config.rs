//! Backend address configuration and endpoint URL construction.

use thiserror::Error;

use crate::FileRef;

/// Base URL used when no override is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
/// File name offered for the downloaded project archive.
pub const ARCHIVE_FILE_NAME: &str = "project.zip";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejected backend configuration values.
pub enum ConfigError {
    /// The base URL is empty after trimming.
    #[error("backend url is empty")]
    EmptyUrl,
    /// The base URL does not use an `http`/`https` scheme.
    #[error("backend url must start with http:// or https://: {0}")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Address of the workspace backend.
pub struct BackendConfig {
    base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl BackendConfig {
    /// Validates and normalizes a base URL (trailing slashes are trimmed).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is empty or not `http`/`https`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(trimmed.to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Returns the build-time configuration: `IDE_BACKEND_URL` when set and valid, else the default.
    pub fn from_build_env() -> Self {
        option_env!("IDE_BACKEND_URL")
            .and_then(|raw| Self::new(raw).ok())
            .unwrap_or_default()
    }

    /// Applies an optional runtime override on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the override is present but invalid.
    pub fn with_override(&self, base_url: Option<&str>) -> Result<Self, ConfigError> {
        match base_url {
            Some(raw) => Self::new(raw),
            None => Ok(self.clone()),
        }
    }

    /// Normalized base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of `path` (which must start with `/`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Absolute URL of the read-file endpoint for `file`, with encoded query parameters.
    pub fn read_file_url(&self, file: &FileRef) -> String {
        format!(
            "{}/read-file?folder={}&file={}",
            self.base_url,
            urlencoding::encode(&file.folder),
            urlencoding::encode(&file.file_name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_local_backend() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url(), "http://127.0.0.1:8000");
        assert_eq!(config.endpoint("/list-files"), "http://127.0.0.1:8000/list-files");
    }

    #[test]
    fn new_trims_trailing_slashes_and_validates_scheme() {
        assert_eq!(
            BackendConfig::new(" https://ide.example.com// ")
                .expect("valid")
                .base_url(),
            "https://ide.example.com"
        );
        assert_eq!(BackendConfig::new("  "), Err(ConfigError::EmptyUrl));
        assert_eq!(
            BackendConfig::new("ftp://files"),
            Err(ConfigError::UnsupportedScheme("ftp://files".to_string()))
        );
    }

    #[test]
    fn override_replaces_or_keeps_base() {
        let base = BackendConfig::default();
        assert_eq!(base.with_override(None), Ok(base.clone()));
        assert_eq!(
            base.with_override(Some("http://10.0.0.2:9000"))
                .expect("override")
                .base_url(),
            "http://10.0.0.2:9000"
        );
        assert!(base.with_override(Some("nope")).is_err());
    }

    #[test]
    fn read_file_url_encodes_query_values() {
        let config = BackendConfig::default();
        assert_eq!(
            config.read_file_url(&FileRef::new("my src", "a&b.py")),
            "http://127.0.0.1:8000/read-file?folder=my%20src&file=a%26b.py"
        );
    }
}
