use serde::{Deserialize, Serialize};

use crate::model::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Opened,
    Closed,
    Activated,
}

/// Window lifecycle notification. Payloads carry ids only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "document", rename_all = "snake_case")]
pub enum LifecycleEvent {
    DocumentOpened(DocumentId),
    DocumentClosed(DocumentId),
    DocumentActivated(DocumentId),
}

impl LifecycleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::DocumentOpened(_) => EventKind::Opened,
            Self::DocumentClosed(_) => EventKind::Closed,
            Self::DocumentActivated(_) => EventKind::Activated,
        }
    }

    pub fn document(&self) -> DocumentId {
        match self {
            Self::DocumentOpened(id) | Self::DocumentClosed(id) | Self::DocumentActivated(id) => *id,
        }
    }
}
