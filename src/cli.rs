use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when the invocation only touches the config file and never loads page data.
pub fn is_config_command(args: &Args) -> bool {
    args.list_config
        || args.new_printer_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// 3D printer status loader
///
/// Fetches the printer's status JSON and a webcam snapshot, merges them into
/// the page data the dashboard renders, and prints it as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Serve fixed mock readings instead of contacting the printer.
    #[arg(long = "dev")]
    pub dev: bool,

    /// Print the page data on a single line instead of pretty-printed.
    #[arg(short = 'c', long = "compact", help_heading = "Output")]
    pub compact: bool,

    /// Update the printer base URL in config.
    #[arg(
        long = "set-printer-url",
        help_heading = "Configuration",
        value_name = "URL"
    )]
    pub new_printer_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to stderr.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_invocation_loads_page_data() {
        let args = Args::try_parse_from(["printer_status"]).unwrap();
        assert!(!args.dev);
        assert!(!args.compact);
        assert!(!is_config_command(&args));
    }

    #[test]
    fn test_dev_and_compact_flags() {
        let args = Args::try_parse_from(["printer_status", "--dev", "-c"]).unwrap();
        assert!(args.dev);
        assert!(args.compact);
    }

    #[test]
    fn test_config_commands_are_detected() {
        for argv in [
            vec!["printer_status", "--list-config"],
            vec!["printer_status", "--set-printer-url", "octopi.local"],
            vec!["printer_status", "--set-log-file", "/tmp/p.log"],
            vec!["printer_status", "--clear-log-file"],
        ] {
            let args = Args::try_parse_from(argv).unwrap();
            assert!(is_config_command(&args));
        }
    }

    #[test]
    fn test_set_printer_url_requires_value() {
        assert!(Args::try_parse_from(["printer_status", "--set-printer-url"]).is_err());
    }
}
