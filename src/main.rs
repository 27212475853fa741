// src/main.rs
use clap::Parser;
use printer_status::cli::{Args, is_config_command};
use printer_status::commands::{
    handle_config_update_command, handle_list_config_command, handle_load_command,
};
use printer_status::config::Config;
use printer_status::error::AppError;
use printer_status::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Config operations run before logging so a broken config can still be fixed
    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_command(&args) {
        return handle_config_update_command(&args).await;
    }

    let config = Config::load().await?;

    let (log_file_path, _guard) = setup_logging(&args, &config).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    let result = handle_load_command(&args, &config).await;
    if let Err(e) = &result {
        tracing::error!("Failed to load printer page data: {e}");
    }
    result
}
