use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Printer URL cannot be empty
/// - Printer URL must be a URL, a dotted host/IP, or `localhost`
/// - HTTP timeout must be at least one second
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(
    printer_url: &str,
    http_timeout_seconds: u64,
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    if printer_url.trim().is_empty() {
        return Err(AppError::config_error("Printer URL cannot be empty"));
    }

    if !printer_url.starts_with("http://") && !printer_url.starts_with("https://") {
        // Without a scheme it should at least look like a host
        if !printer_url.contains('.') && !printer_url.starts_with("localhost") {
            return Err(AppError::config_error(
                "Printer URL must be a valid URL or host name",
            ));
        }
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
