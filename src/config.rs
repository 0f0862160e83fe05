mod error;
mod io;
mod shell;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, Result};
pub use io::{load_config, save_config};
pub use shell::ShellConfig;
