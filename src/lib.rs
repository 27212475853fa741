//! 3D Printer Status Page Loader Library
//!
//! Loads the data behind the printer status page: temperatures, fan speed and
//! print progress from the printer's JSON endpoint, plus a webcam snapshot
//! embedded as a data URL.
//!
//! # Examples
//!
//! ```rust,no_run
//! use printer_status::error::AppError;
//! use printer_status::loader::{HttpFetcher, LoadMode, PageDataLoader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let fetcher = HttpFetcher::new("http://octopi.local", 10)?;
//!     let loader = PageDataLoader::new(fetcher, LoadMode::Live);
//!
//!     let page = loader.load().await?;
//!     println!("Print progress: {}%", page.status.print_percent);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod logging;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{AppError, FetchFailure};
pub use loader::{
    Fetch, FetchResponse, HttpFetcher, ImageData, LoadMode, PageData, PageDataLoader,
    StatusPayload, load_page_data,
};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
