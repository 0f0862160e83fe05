mod context;
mod error;
mod file_service;
mod menu;
mod registry;
mod service;
mod utility_service;
mod window_service;

#[cfg(test)]
mod tests;

pub use context::AppContext;
pub use error::{AppError, Result};
pub use file_service::{FileService, OPEN_ACTION, RecentFiles, SAVE_AS_ACTION};
pub use menu::{FILE_MENU, HELP_MENU, Menu, MenuAction, MenuBar, SHOW_MENU, WINDOW_MENU};
pub use registry::{
    FailurePhase, INTEGRITY_NOTICE_KEY, IntegrityNotice, ServiceFailure, ServiceId,
    ServiceRegistry, ServiceState, ServiceStatus,
};
pub use service::{Service, ServiceContext, ServiceError, SetupContext};
pub use utility_service::{UtilityService, UtilityView, channel_label_keys};
pub use window_service::{CASCADE_ACTION, TILE_ACTION, WindowService};
