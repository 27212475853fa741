//! Application-wide constants and configuration values
//!
//! Endpoint paths, HTTP client tuning and the fixed development-mode readings
//! live here so the loader and its tests agree on them.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool.
/// The dashboard only ever talks to one printer, two requests at a time.
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// Printer base URL used when neither the config file nor the environment sets one
pub const DEFAULT_PRINTER_URL: &str = "http://localhost";

/// Printer API endpoint paths
pub mod endpoints {
    /// JSON status: temperatures, fan speed, print progress
    pub const PRINTER_STATUS: &str = "/api/printer/status";

    /// Single JPEG snapshot from the webcam
    pub const WEBCAM_SNAPSHOT: &str = "/api/webcam.jpg";
}

/// MIME types used when building data URLs
pub mod mime {
    pub const JPEG: &str = "image/jpeg";
    pub const PNG: &str = "image/png";
    pub const GIF: &str = "image/gif";
    pub const WEBP: &str = "image/webp";

    /// Used when neither the response nor the bytes say what the image is
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Readings served in development mode
pub mod mock {
    pub const NOZZLE_CELSIUS: f64 = 220.3;
    pub const NOZZLE_TARGET_CELSIUS: f64 = 220.0;
    pub const BED_CELSIUS: f64 = 49.8;
    pub const BED_TARGET_CELSIUS: f64 = 55.0;
    pub const COOLING_FAN_PERCENT: u64 = 73;
    pub const PRINT_PERCENT: u64 = 80;
}

/// Environment variables that override config file values
pub mod env_vars {
    pub const PRINTER_URL: &str = "PRINTER_URL";
    pub const LOG_FILE: &str = "PRINTER_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "PRINTER_HTTP_TIMEOUT";
    pub const DEV_MODE: &str = "PRINTER_DEV_MODE";
}

/// Name used for the config directory and the default log file
pub const APP_DIR_NAME: &str = "printer_status";

/// Default log file name inside the log directory
pub const LOG_FILE_NAME: &str = "printer_status.log";
