use crate::windows::{EventKind, LifecycleEvent};

use super::menu::WINDOW_MENU;
use super::{Service, ServiceContext, ServiceError, SetupContext};

pub const TILE_ACTION: &str = "window.tile";
pub const CASCADE_ACTION: &str = "window.cascade";

/// Tile and cascade actions, enabled while any window is open.
#[derive(Debug, Default)]
pub struct WindowService;

impl WindowService {
    pub const NAME: &'static str = "window";
}

impl Service for WindowService {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn contribute(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
        setup.add_action(WINDOW_MENU, TILE_ACTION, "window.tile", false);
        setup.add_action(WINDOW_MENU, CASCADE_ACTION, "window.cascade", false);
        Ok(())
    }

    fn connect(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
        setup.subscribe(EventKind::Opened);
        setup.subscribe(EventKind::Closed);
        Ok(())
    }

    fn on_event(
        &mut self,
        _event: &LifecycleEvent,
        context: &mut ServiceContext<'_>,
    ) -> Result<(), ServiceError> {
        let any_open = !context.windows().is_empty();
        context.set_enabled(TILE_ACTION, any_open)?;
        context.set_enabled(CASCADE_ACTION, any_open)
    }
}
