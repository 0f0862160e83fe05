use std::collections::BTreeSet;

use thiserror::Error;

use crate::windows::{EventKind, LifecycleEvent, WindowManager};

use super::{MenuAction, MenuBar, ServiceId};

/// Failure reported by a service hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A cooperating component plugged into the shell.
///
/// Hooks run on the shell thread. Services keep document ids only and resolve
/// them through the [`WindowManager`] handed to `on_event`.
pub trait Service {
    fn name(&self) -> &str;

    /// Adds menu actions.
    fn contribute(&mut self, _setup: &mut SetupContext) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Subscribes to lifecycle events.
    fn connect(&mut self, _setup: &mut SetupContext) -> Result<(), ServiceError> {
        Ok(())
    }

    fn on_event(
        &mut self,
        _event: &LifecycleEvent,
        _context: &mut ServiceContext<'_>,
    ) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Contributions staged during setup; the registry commits them only if setup succeeds.
#[derive(Debug)]
pub struct SetupContext {
    owner: ServiceId,
    pub(crate) actions: Vec<MenuAction>,
    pub(crate) subscriptions: BTreeSet<EventKind>,
}

impl SetupContext {
    pub(crate) fn new(owner: ServiceId) -> Self {
        Self {
            owner,
            actions: Vec::new(),
            subscriptions: BTreeSet::new(),
        }
    }

    pub fn owner(&self) -> ServiceId {
        self.owner
    }

    pub fn add_action(&mut self, menu: &str, id: &str, label_key: &str, enabled: bool) {
        self.actions.push(MenuAction {
            id: id.to_string(),
            menu: menu.to_string(),
            label_key: label_key.to_string(),
            owner: self.owner,
            enabled,
        });
    }

    pub fn subscribe(&mut self, kind: EventKind) {
        self.subscriptions.insert(kind);
    }

    pub fn subscribe_all(&mut self) {
        self.subscriptions
            .extend([EventKind::Opened, EventKind::Closed, EventKind::Activated]);
    }
}

/// What a service may touch while handling an event.
pub struct ServiceContext<'a> {
    owner: ServiceId,
    windows: &'a WindowManager,
    menu: &'a mut MenuBar,
}

impl<'a> ServiceContext<'a> {
    pub(crate) fn new(owner: ServiceId, windows: &'a WindowManager, menu: &'a mut MenuBar) -> Self {
        Self {
            owner,
            windows,
            menu,
        }
    }

    pub fn owner(&self) -> ServiceId {
        self.owner
    }

    pub fn windows(&self) -> &WindowManager {
        self.windows
    }

    pub fn menu(&self) -> &MenuBar {
        self.menu
    }

    pub fn set_enabled(&mut self, action: &str, enabled: bool) -> Result<(), ServiceError> {
        self.menu.set_enabled(self.owner, action, enabled)
    }
}
