use serde::Serialize;

use super::{ServiceError, ServiceId};

pub const FILE_MENU: &str = "file";
pub const SHOW_MENU: &str = "show";
pub const WINDOW_MENU: &str = "window";
pub const HELP_MENU: &str = "help";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuAction {
    pub id: String,
    pub menu: String,
    /// Looked up by the localization layer.
    pub label_key: String,
    pub owner: ServiceId,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub name: String,
    pub actions: Vec<MenuAction>,
}

/// Menu contributions of every active service, in contribution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MenuBar {
    actions: Vec<MenuAction>,
}

fn menu_rank(name: &str) -> u8 {
    match name {
        WINDOW_MENU => 1,
        HELP_MENU => 2,
        _ => 0,
    }
}

impl MenuBar {
    pub fn actions(&self) -> &[MenuAction] {
        &self.actions
    }

    pub fn action(&self, id: &str) -> Option<&MenuAction> {
        self.actions.iter().find(|action| action.id == id)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.action(id).is_some_and(|action| action.enabled)
    }

    /// Menus in first-contribution order, with `window` and `help` moved last.
    pub fn menus(&self) -> Vec<Menu> {
        let mut menus: Vec<Menu> = Vec::new();
        for action in &self.actions {
            match menus.iter_mut().find(|menu| menu.name == action.menu) {
                Some(menu) => menu.actions.push(action.clone()),
                None => menus.push(Menu {
                    name: action.menu.clone(),
                    actions: vec![action.clone()],
                }),
            }
        }
        menus.sort_by_key(|menu| menu_rank(&menu.name));
        menus
    }

    pub(crate) fn conflicts(&self, staged: &[MenuAction]) -> Option<String> {
        staged.iter().enumerate().find_map(|(index, action)| {
            let taken = self.action(&action.id).is_some()
                || staged[..index].iter().any(|other| other.id == action.id);
            taken.then(|| action.id.clone())
        })
    }

    pub(crate) fn commit(&mut self, staged: Vec<MenuAction>) {
        self.actions.extend(staged);
    }

    pub(crate) fn withdraw(&mut self, owner: ServiceId) {
        self.actions.retain(|action| action.owner != owner);
    }

    pub(crate) fn set_enabled(
        &mut self,
        owner: ServiceId,
        id: &str,
        enabled: bool,
    ) -> Result<(), ServiceError> {
        let action = self
            .actions
            .iter_mut()
            .find(|action| action.id == id)
            .ok_or_else(|| ServiceError::new(format!("unknown action '{id}'")))?;
        if action.owner != owner {
            return Err(ServiceError::new(format!(
                "action '{id}' belongs to {}",
                action.owner
            )));
        }
        action.enabled = enabled;
        Ok(())
    }
}
