use crate::model::{CoreError, DocumentId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WindowError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("unknown document: {0}")]
    UnknownDocument(DocumentId),

    #[error(transparent)]
    Core(#[from] CoreError),
}
