use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use tempfile::tempdir;

use crate::config::ShellConfig;
use crate::formats::write_buffer;
use crate::model::PixelBuffer;
use crate::windows::{AlwaysConfirm, EventKind, LifecycleEvent};

use super::{
    AppContext, FailurePhase, FileService, HELP_MENU, INTEGRITY_NOTICE_KEY, SAVE_AS_ACTION,
    Service, ServiceContext, ServiceError, ServiceState, SetupContext, TILE_ACTION, UtilityView,
    WINDOW_MENU,
};

type EventLog = Rc<RefCell<Vec<(String, LifecycleEvent)>>>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Fault {
    None,
    ContributeError,
    ConnectPanic,
    EventError,
    EventPanic,
}

struct Probe {
    name: String,
    fault: Fault,
    log: EventLog,
    menu: &'static str,
}

impl Probe {
    fn new(name: &str, fault: Fault, log: &EventLog) -> Self {
        Self {
            name: name.to_string(),
            fault,
            log: Rc::clone(log),
            menu: "tools",
        }
    }

    fn in_menu(mut self, menu: &'static str) -> Self {
        self.menu = menu;
        self
    }
}

impl Service for Probe {
    fn name(&self) -> &str {
        &self.name
    }

    fn contribute(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
        setup.add_action(self.menu, &format!("{}.run", self.name), "probe.run", true);
        if self.fault == Fault::ContributeError {
            return Err(ServiceError::new("no menu for you"));
        }
        Ok(())
    }

    fn connect(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
        if self.fault == Fault::ConnectPanic {
            panic!("connect exploded");
        }
        setup.subscribe_all();
        Ok(())
    }

    fn on_event(
        &mut self,
        event: &LifecycleEvent,
        _context: &mut ServiceContext<'_>,
    ) -> Result<(), ServiceError> {
        self.log.borrow_mut().push((self.name.clone(), *event));
        match self.fault {
            Fault::EventError => Err(ServiceError::new("handler failed")),
            Fault::EventPanic => panic!("handler exploded"),
            _ => Ok(()),
        }
    }
}

fn received(log: &EventLog, name: &str) -> usize {
    log.borrow().iter().filter(|(service, _)| service == name).count()
}

fn small_buffer() -> PixelBuffer {
    PixelBuffer::filled(4, 4, 3, 9).expect("buffer")
}

#[test]
fn failing_setup_isolates_only_that_service() {
    for fault in [Fault::ContributeError, Fault::ConnectPanic] {
        let log = EventLog::default();
        let mut app = AppContext::new(ShellConfig::default());
        let first = app.register(Probe::new("first", Fault::None, &log));
        let second = app.register(Probe::new("second", fault, &log));
        let third = app.register(Probe::new("third", Fault::None, &log));

        app.open(small_buffer(), "cells").expect("open");

        assert_eq!(received(&log, "first"), 2);
        assert_eq!(received(&log, "second"), 0);
        assert_eq!(received(&log, "third"), 2);
        assert_eq!(app.registry().state(first), Some(ServiceState::Active));
        assert_eq!(app.registry().state(second), Some(ServiceState::Excluded));
        assert_eq!(app.registry().state(third), Some(ServiceState::Active));
        assert!(app.registry().menu().action("second.run").is_none());
        assert!(app.registry().menu().action("third.run").is_some());

        let notice = app.registry().integrity_notice().expect("notice");
        assert_eq!(notice.message_key, INTEGRITY_NOTICE_KEY);
        assert_eq!(notice.failures.len(), 1);
        assert_eq!(notice.failures[0].service, "second");
        let expected = match fault {
            Fault::ContributeError => FailurePhase::Contribute,
            _ => FailurePhase::Connect,
        };
        assert_eq!(notice.failures[0].phase, expected);
        assert_eq!(notice.failures[0].panicked, fault == Fault::ConnectPanic);
    }
}

#[test]
fn healthy_registry_has_no_integrity_notice() {
    let app = AppContext::with_default_services(ShellConfig::default());
    assert_eq!(app.registry().len(), 3);
    assert!(app.registry().integrity_notice().is_none());
}

#[test]
fn dispatch_error_is_recorded_and_delivery_continues() {
    let log = EventLog::default();
    let mut app = AppContext::new(ShellConfig::default());
    let flaky = app.register(Probe::new("flaky", Fault::EventError, &log));
    app.register(Probe::new("steady", Fault::None, &log));

    let first = app.open(small_buffer(), "a").expect("open");
    app.close(first).expect("close");

    assert_eq!(received(&log, "flaky"), 3);
    assert_eq!(received(&log, "steady"), 3);
    assert_eq!(app.registry().state(flaky), Some(ServiceState::Active));
    let failures = app.registry().failures();
    assert_eq!(failures.len(), 3);
    assert!(failures.iter().all(|failure| failure.phase == FailurePhase::Dispatch));
}

#[test]
fn dispatch_panic_excludes_the_service() {
    let log = EventLog::default();
    let mut app = AppContext::new(ShellConfig::default());
    let fragile = app.register(Probe::new("fragile", Fault::EventPanic, &log));
    app.register(Probe::new("steady", Fault::None, &log));

    app.open(small_buffer(), "a").expect("open");
    app.open(small_buffer(), "b").expect("open");

    assert_eq!(received(&log, "fragile"), 1);
    assert_eq!(received(&log, "steady"), 4);
    assert_eq!(app.registry().state(fragile), Some(ServiceState::Excluded));
    assert!(app.registry().menu().action("fragile.run").is_none());
    let failures = app.registry().failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].panicked);
    assert_eq!(failures[0].message, "handler exploded");
}

#[test]
fn duplicate_service_name_keeps_the_first() {
    let log = EventLog::default();
    let mut app = AppContext::new(ShellConfig::default());
    let first = app.register(Probe::new("probe", Fault::None, &log));
    let again = app.register(Probe::new("probe", Fault::EventPanic, &log));
    assert_eq!(first, again);
    assert_eq!(app.registry().len(), 1);
}

#[test]
fn conflicting_action_ids_exclude_the_late_service() {
    struct Thief;
    impl Service for Thief {
        fn name(&self) -> &str {
            "thief"
        }

        fn contribute(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
            setup.add_action("file", SAVE_AS_ACTION, "file.save_as", true);
            Ok(())
        }
    }

    let mut app = AppContext::with_default_services(ShellConfig::default());
    let thief = app.register(Thief);
    assert_eq!(app.registry().state(thief), Some(ServiceState::Excluded));
    let action = app.registry().menu().action(SAVE_AS_ACTION).expect("action");
    assert_ne!(action.owner, thief);
}

#[test]
fn services_may_only_toggle_their_own_actions() {
    struct Meddler;
    impl Service for Meddler {
        fn name(&self) -> &str {
            "meddler"
        }

        fn connect(&mut self, setup: &mut SetupContext) -> Result<(), ServiceError> {
            setup.subscribe(EventKind::Opened);
            Ok(())
        }

        fn on_event(
            &mut self,
            _event: &LifecycleEvent,
            context: &mut ServiceContext<'_>,
        ) -> Result<(), ServiceError> {
            context.set_enabled(TILE_ACTION, false)
        }
    }

    let mut app = AppContext::with_default_services(ShellConfig::default());
    let meddler = app.register(Meddler);
    app.open(small_buffer(), "a").expect("open");
    assert!(app.registry().menu().is_enabled(TILE_ACTION));
    assert_eq!(app.registry().state(meddler), Some(ServiceState::Active));
    assert_eq!(app.registry().failures().len(), 1);
}

#[test]
fn window_and_help_menus_sort_last() {
    let log = EventLog::default();
    let mut app = AppContext::new(ShellConfig::default());
    app.register(Probe::new("about", Fault::None, &log).in_menu(HELP_MENU));
    app.register(Probe::new("arrange", Fault::None, &log).in_menu(WINDOW_MENU));
    app.register(Probe::new("edit", Fault::None, &log).in_menu("edit"));
    app.register(Probe::new("view", Fault::None, &log).in_menu("view"));

    let names = app
        .registry()
        .menu()
        .menus()
        .into_iter()
        .map(|menu| menu.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["edit", "view", WINDOW_MENU, HELP_MENU]);
}

#[test]
fn default_services_follow_the_active_document() {
    let mut app = AppContext::with_default_services(ShellConfig::default());
    let menu_enabled = |app: &AppContext, id: &str| app.registry().menu().is_enabled(id);
    assert!(!menu_enabled(&app, SAVE_AS_ACTION));
    assert!(!menu_enabled(&app, TILE_ACTION));
    for view in UtilityView::ALL {
        assert!(!menu_enabled(&app, view.action_id()));
    }

    let parent = app.open(small_buffer(), "parent").expect("open");
    app.copy_crop(parent).expect("crop");
    assert!(menu_enabled(&app, SAVE_AS_ACTION));
    assert!(menu_enabled(&app, TILE_ACTION));
    for view in UtilityView::ALL {
        assert!(menu_enabled(&app, view.action_id()));
    }

    app.close_related(parent, &mut AlwaysConfirm).expect("close");
    assert!(app.windows().is_empty());
    assert!(!menu_enabled(&app, SAVE_AS_ACTION));
    assert!(!menu_enabled(&app, TILE_ACTION));
    assert!(!menu_enabled(&app, UtilityView::Histogram.action_id()));
}

#[test]
fn opened_files_land_in_recent_files() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.bmp");
    write_buffer(&first, &small_buffer()).expect("write");
    write_buffer(&second, &small_buffer()).expect("write");

    let config = ShellConfig {
        max_recent_files: 2,
        ..ShellConfig::default()
    };
    let mut app = AppContext::with_default_services(config);
    let id = app.open_file(&first).expect("open");
    app.open_file(&second).expect("open");
    app.open_file(&first).expect("open again");

    assert_eq!(app.recent_files(), vec![first.clone(), second.clone()]);
    assert_eq!(
        app.windows().document(id).expect("doc").display_name(),
        "first.png"
    );
    assert_eq!(app.windows().len(), 3);

    let copy = dir.path().join("copy.png");
    app.save_as(id, &copy).expect("save");
    assert!(copy.exists());
}

#[test]
fn file_service_accepts_known_extensions() {
    for name in ["a.png", "b.BMP", "c.jpg", "d.jpeg", "e.vff"] {
        assert!(FileService::can_open(Path::new(name)), "{name}");
    }
    for name in ["f.tiff", "g.txt", "noext"] {
        assert!(!FileService::can_open(Path::new(name)), "{name}");
    }
}

#[test]
fn utility_views_map_to_analytics_requests() {
    use crate::analytics::{AnalyticsRequest, HistogramOptions, ProfileAxis};
    use crate::model::ChannelKind;

    use super::channel_label_keys;

    let view = UtilityView::from_action("show.column_profile").expect("view");
    assert_eq!(view, UtilityView::ColumnProfile);
    assert_eq!(
        view.request(HistogramOptions::default(), 3, 0),
        Some(AnalyticsRequest::Profile {
            axis: ProfileAxis::Column,
            index: 3
        })
    );
    assert_eq!(
        UtilityView::PixelGrid.request(HistogramOptions::default(), 0, 0),
        None
    );
    assert!(UtilityView::from_action("file.open").is_none());
    assert_eq!(channel_label_keys(&[ChannelKind::Black]), vec!["channel.black"]);
}
