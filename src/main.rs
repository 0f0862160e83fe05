use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};

use image_inspect::cli::Cli;

fn setup_logging(level: &str) -> Result<LoggerHandle, String> {
    Logger::try_with_env_or_str(level)
        .map_err(|error| format!("invalid log level '{level}': {error}"))?
        .log_to_stderr()
        .start()
        .map_err(|error| format!("logger initialization failed: {error}"))
}

fn main() {
    let cli = Cli::parse();
    let _logger = match setup_logging(&cli.log_level) {
        Ok(handle) => handle,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(2);
        }
    };

    if let Err(error) = image_inspect::run_cli(cli) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
