use thiserror::Error;

/// Why a single GET against the printer failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("HTTP {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("unexpected data structure: {0}")]
    UnexpectedStructure(String),
}

impl FetchFailure {
    /// Builds an `HttpStatus` failure, filling in the canonical reason phrase.
    pub fn http_status(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown error");
        Self::HttpStatus {
            status,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch printer status: {reason} (URL: {url})")]
    StatusFetch { url: String, reason: FetchFailure },

    #[error("Failed to fetch webcam image: {reason} (URL: {url})")]
    ImageFetch { url: String, reason: FetchFailure },

    #[error("Failed to encode webcam image: {0}")]
    ImageDecode(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a status endpoint error
    pub fn status_fetch(url: impl Into<String>, reason: FetchFailure) -> Self {
        Self::StatusFetch {
            url: url.into(),
            reason,
        }
    }

    /// Create a webcam endpoint error
    pub fn image_fetch(url: impl Into<String>, reason: FetchFailure) -> Self {
        Self::ImageFetch {
            url: url.into(),
            reason,
        }
    }

    /// Create an image encoding error
    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// HTTP status code behind a fetch error, if the printer answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            AppError::StatusFetch {
                reason: FetchFailure::HttpStatus { status, .. },
                ..
            }
            | AppError::ImageFetch {
                reason: FetchFailure::HttpStatus { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// True for errors raised while loading page data, as opposed to setup errors.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            AppError::StatusFetch { .. } | AppError::ImageFetch { .. } | AppError::ImageDecode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_fetch_helper() {
        let error = AppError::status_fetch(
            "http://printer.local/api/printer/status",
            FetchFailure::http_status(500),
        );
        assert!(matches!(error, AppError::StatusFetch { .. }));
        assert_eq!(
            error.to_string(),
            "Failed to fetch printer status: HTTP 500 Internal Server Error (URL: http://printer.local/api/printer/status)"
        );
    }

    #[test]
    fn test_image_fetch_helper() {
        let error = AppError::image_fetch(
            "http://printer.local/api/webcam.jpg",
            FetchFailure::Connection("Connection refused".to_string()),
        );
        assert!(matches!(error, AppError::ImageFetch { .. }));
        assert_eq!(
            error.to_string(),
            "Failed to fetch webcam image: connection failed: Connection refused (URL: http://printer.local/api/webcam.jpg)"
        );
    }

    #[test]
    fn test_image_decode_helper() {
        let error = AppError::image_decode("image body is empty");
        assert!(matches!(error, AppError::ImageDecode(_)));
        assert_eq!(
            error.to_string(),
            "Failed to encode webcam image: image body is empty"
        );
    }

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_http_status_unknown_code() {
        assert_eq!(
            FetchFailure::http_status(599),
            FetchFailure::HttpStatus {
                status: 599,
                reason: "Unknown error".to_string()
            }
        );
    }

    #[test]
    fn test_http_status_accessor() {
        assert_eq!(
            AppError::image_fetch("url", FetchFailure::http_status(404)).http_status(),
            Some(404)
        );
        assert_eq!(
            AppError::status_fetch("url", FetchFailure::Timeout).http_status(),
            None
        );
        assert_eq!(AppError::image_decode("x").http_status(), None);
    }

    #[test]
    fn test_is_load_error() {
        assert!(AppError::status_fetch("url", FetchFailure::Timeout).is_load_error());
        assert!(AppError::image_fetch("url", FetchFailure::Timeout).is_load_error());
        assert!(AppError::image_decode("x").is_load_error());
        assert!(!AppError::config_error("x").is_load_error());
        assert!(!AppError::log_setup_error("x").is_load_error());
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::Json(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_error_from_toml_deserialize() {
        let toml_error = toml::from_str::<toml::Table>("key = [unclosed").unwrap_err();
        let app_error: AppError = toml_error.into();
        assert!(matches!(app_error, AppError::TomlDeserialize(_)));
    }
}
