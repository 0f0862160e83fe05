mod runner;
mod types;

#[cfg(test)]
mod tests;

pub use runner::{execute, run};
pub use types::Cli;
