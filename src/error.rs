//! Error types for feedsnap
//!
//! This module provides the error type hierarchy using `thiserror`,
//! split by subsystem so callers can match on the failure class.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for feedsnap operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Session/cookie errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Browser lifecycle errors
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Navigation errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config file {path:?}: {source}")]
    Unreadable {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Session precondition errors (cookie loading and injection)
#[derive(Error, Debug)]
pub enum SessionError {
    /// Cookie file does not exist
    #[error("Cookie file not found: {0:?}")]
    CookieFileMissing(PathBuf),

    /// Cookie file could not be read
    #[error("Cannot read cookie file {path:?}: {source}")]
    Unreadable {
        /// Path that was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Cookie file is not a valid JSON cookie array
    #[error("Invalid cookie file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A cookie could not be converted to a CDP parameter
    #[error("Invalid cookie {name:?}: {reason}")]
    InvalidCookie {
        /// Cookie name
        name: String,
        /// Builder error message
        reason: String,
    },
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),
}

/// Navigation errors
#[derive(Error, Debug)]
pub enum NavigationError {
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Navigation timeout
    #[error("Navigation timed out after {0}ms")]
    Timeout(u64),

    /// Page load failed
    #[error("Page load failed: {0}")]
    LoadFailed(String),
}

/// Extraction errors (whole-pass failures; single-item failures are absorbed)
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The in-page candidate query failed
    #[error("Candidate query failed: {0}")]
    QueryFailed(String),

    /// Page height measurement failed
    #[error("Height measurement failed: {0}")]
    MeasureFailed(String),

    /// Scroll command failed
    #[error("Scroll failed: {0}")]
    ScrollFailed(String),
}

/// Result type alias for feedsnap operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Browser(BrowserError::LaunchFailed("no chrome".to_string()));
        assert!(err.to_string().contains("Failed to launch browser"));
        assert!(err.to_string().contains("no chrome"));
    }

    #[test]
    fn test_session_error_missing_file() {
        let err = SessionError::CookieFileMissing(PathBuf::from("cookies.json"));
        assert!(err.to_string().contains("Cookie file not found"));
        assert!(err.to_string().contains("cookies.json"));
    }

    #[test]
    fn test_navigation_timeout() {
        let err = Error::Navigation(NavigationError::Timeout(60000));
        assert!(err.to_string().contains("60000ms"));
    }

    #[test]
    fn test_extraction_error() {
        let err = ExtractionError::QueryFailed("detached frame".to_string());
        assert!(err.to_string().contains("Candidate query failed"));
    }

    #[test]
    fn test_cdp_error_helper() {
        let err = Error::cdp("ws closed");
        assert_eq!(err.to_string(), "CDP error: ws closed");
    }
}
