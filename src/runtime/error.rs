use crate::config::ConfigError;
use crate::formats::IoError;
use crate::model::CoreError;
use crate::windows::WindowError;
use thiserror::Error;

use super::ServiceError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("image model error: {0}")]
    Core(#[from] CoreError),

    #[error("window error: {0}")]
    Window(#[from] WindowError),

    #[error("file error: {0}")]
    Io(#[from] IoError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("service error: {0}")]
    Service(#[from] ServiceError),
}
