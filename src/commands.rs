use crate::cli::Args;
use crate::config::Config;
use crate::error::AppError;
use crate::loader::{HttpFetcher, PageData, PageDataLoader};
use tracing::info;

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--set-printer-url, --set-log-file, --clear-log-file).
///
/// Updates configuration based on the provided arguments and saves changes.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    update_config_at_path(&Config::get_config_path(), args).await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Applies the config flags in `args` to the file at `path`.
///
/// The stored file is edited as-is: environment overrides are not folded in,
/// and a file that cannot be read or parsed is left untouched and reported.
pub async fn update_config_at_path(path: &str, args: &Args) -> Result<Config, AppError> {
    let mut config = Config::load_stored(path).await?;

    if let Some(new_url) = &args.new_printer_url {
        config.printer_url = new_url.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save_to_path(path).await?;
    info!("Saved config to {path}");

    Ok(config)
}

/// Serializes page data the way the default command prints it.
pub fn render_page_data(page: &PageData, compact: bool) -> Result<String, AppError> {
    let json = if compact {
        serde_json::to_string(page)?
    } else {
        serde_json::to_string_pretty(page)?
    };
    Ok(json)
}

/// Handles the default command: load page data once and print it as JSON.
pub async fn handle_load_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let mode = config.load_mode(args.dev);
    let fetcher = HttpFetcher::new(&config.printer_url, config.http_timeout_seconds)?;
    let loader = PageDataLoader::new(fetcher, mode);

    info!("Loading page data from {} ({mode:?})", config.printer_url);
    let page = loader.load().await?;

    println!("{}", render_page_data(&page, args.compact)?);
    Ok(())
}
