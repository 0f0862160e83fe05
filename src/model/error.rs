use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid region {x},{y} {width}x{height}: {reason}")]
    InvalidRegion {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        reason: &'static str,
    },

    #[error("invalid name: display names must not be empty")]
    InvalidName,

    #[error(
        "dimension mismatch: expected {expected_width}x{expected_height}, found {actual_width}x{actual_height}"
    )]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("invalid pixel buffer: {0}")]
    InvalidBuffer(String),
}

impl CoreError {
    pub(crate) fn invalid_region(
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        reason: &'static str,
    ) -> Self {
        Self::InvalidRegion {
            x,
            y,
            width,
            height,
            reason,
        }
    }
}
