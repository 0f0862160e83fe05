mod confirm;
mod error;
mod events;
mod layout;
mod manager;


pub use confirm::{AlwaysConfirm, ConfirmClose, NeverConfirm};
pub use error::{Result, WindowError};
pub use events::{EventKind, LifecycleEvent};
pub use layout::{Canvas, Placement, Rect, cascade, tile};
pub use manager::{CloseOutcome, WindowManager};
