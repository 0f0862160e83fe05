pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod formats;
pub mod model;
pub mod runtime;
pub mod windows;

pub fn run_cli(cli: cli::Cli) -> Result<(), String> {
    cli::run(cli)
}
