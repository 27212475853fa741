use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_PRINTER_URL, LOG_FILE_NAME, env_vars};
use crate::error::AppError;
use crate::loader::LoadMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the printer host serving `/api/printer/status` and `/api/webcam.jpg`.
    #[serde(default = "default_printer_url")]
    pub printer_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for printer requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Serve fixed mock readings instead of talking to the printer.
    #[serde(default)]
    pub development_mode: bool,
}

fn default_printer_url() -> String {
    DEFAULT_PRINTER_URL.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            printer_url: default_printer_url(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            development_mode: false,
        }
    }
}

/// Adds `http://` when no scheme is given and drops trailing slashes,
/// so endpoint paths can be appended directly.
pub fn normalize_printer_url(url: &str) -> String {
    let url = url.trim();
    let with_scheme = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, defaults are used.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `PRINTER_URL` - Override printer base URL
    /// - `PRINTER_LOG_FILE` - Override log file path
    /// - `PRINTER_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `PRINTER_DEV_MODE` - Serve mock data (`1`, `true`, `yes`, `on`)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - Error occurred during load or validation
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path(), |key| std::env::var(key).ok()).await
    }

    /// Reads the config at `path` (defaults when it does not exist), applies
    /// overrides from `lookup`, normalizes the printer URL and validates.
    pub async fn load_with_overrides<F>(path: &str, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_stored(path).await?;

        config.apply_overrides(lookup);
        config.printer_url = normalize_printer_url(&config.printer_url);
        config.validate()?;

        Ok(config)
    }

    /// The config as stored at `path`, without env overrides or validation.
    /// A missing file yields defaults; a file that cannot be read or parsed is an error.
    pub async fn load_stored(path: &str) -> Result<Self, AppError> {
        if Path::new(path).exists() {
            Self::load_from_path(path).await
        } else {
            Ok(Config::default())
        }
    }

    /// Applies overrides from a variable lookup. `load()` passes the process
    /// environment; unparsable numeric or boolean values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(printer_url) = lookup(env_vars::PRINTER_URL) {
            self.printer_url = printer_url;
        }

        if let Some(log_file_path) = lookup(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = lookup(env_vars::HTTP_TIMEOUT).and_then(|s| s.parse::<u64>().ok()) {
            self.http_timeout_seconds = timeout;
        }

        if let Some(dev) = lookup(env_vars::DEV_MODE).and_then(|s| parse_flag(&s)) {
            self.development_mode = dev;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.printer_url,
            self.http_timeout_seconds,
            &self.log_file_path,
        )
    }

    /// Loader mode selected by this configuration; the `--dev` flag can force development.
    pub fn load_mode(&self, force_development: bool) -> LoadMode {
        if force_development || self.development_mode {
            LoadMode::Development
        } else {
            LoadMode::Live
        }
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Printer URL:");
            println!("{}", config.printer_url);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Development Mode:");
            println!("{}", if config.development_mode { "on" } else { "off" });
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/{LOG_FILE_NAME}");
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and normalizes the
    /// printer URL before writing.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(&Config {
            printer_url: normalize_printer_url(&self.printer_url),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
