use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::formats::ImageFormat;
use crate::windows::{EventKind, LifecycleEvent};

use super::menu::FILE_MENU;
use super::{Service, ServiceContext, ServiceError, SetupContext};

pub const OPEN_ACTION: &str = "file.open";
pub const SAVE_AS_ACTION: &str = "file.save_as";

/// Most-recent-first list of opened files, shared with the shell.
#[derive(Debug, Clone)]
pub struct RecentFiles {
    paths: Rc<RefCell<VecDeque<PathBuf>>>,
    capacity: usize,
}

impl RecentFiles {
    pub fn new(capacity: usize) -> Self {
        Self {
            paths: Rc::new(RefCell::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn push(&self, path: &Path) {
        let mut paths = self.paths.borrow_mut();
        paths.retain(|existing| existing != path);
        paths.push_front(path.to_path_buf());
        paths.truncate(self.capacity);
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.borrow().iter().cloned().collect()
    }
}

/// Open and save-as actions plus the recent files list.
#[derive(Debug)]
pub struct FileService {
    recent: RecentFiles,
}

impl FileService {
    pub const NAME: &'static str = "file";

    pub fn new(max_recent_files: usize) -> Self {
        Self {
            recent: RecentFiles::new(max_recent_files),
        }
    }

    pub fn recent(&self) -> RecentFiles {
        self.recent.clone()
    }

    /// Whether the open dialog should accept `path`.
    pub fn can_open(path: &Path) -> bool {
        ImageFormat::from_path(path).is_ok()
    }
}

impl Service for FileService {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn contribute(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
        setup.add_action(FILE_MENU, OPEN_ACTION, "file.open", true);
        setup.add_action(FILE_MENU, SAVE_AS_ACTION, "file.save_as", false);
        Ok(())
    }

    fn connect(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
        setup.subscribe_all();
        Ok(())
    }

    fn on_event(
        &mut self,
        event: &LifecycleEvent,
        context: &mut ServiceContext<'_>,
    ) -> Result<(), ServiceError> {
        if event.kind() == EventKind::Opened {
            let source = context
                .windows()
                .document(event.document())
                .ok()
                .and_then(|document| document.source().map(Path::to_path_buf));
            if let Some(path) = source {
                self.recent.push(&path);
            }
        }
        let has_active = context.windows().active().is_some();
        context.set_enabled(SAVE_AS_ACTION, has_active)
    }
}
