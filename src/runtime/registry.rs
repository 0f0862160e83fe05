use std::collections::BTreeSet;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Serialize;

use crate::windows::{EventKind, LifecycleEvent, WindowManager};

use super::{MenuBar, Service, ServiceContext, ServiceError, SetupContext};

pub const INTEGRITY_NOTICE_KEY: &str = "shell.integrity_compromised";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ServiceId(usize);

impl fmt::Display for ServiceId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "service #{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    Active,
    /// Receives no further events and owns no menu actions.
    Excluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePhase {
    Contribute,
    Connect,
    Dispatch,
}

impl fmt::Display for FailurePhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Self::Contribute => "contribute",
            Self::Connect => "connect",
            Self::Dispatch => "dispatch",
        };
        formatter.write_str(phase)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceFailure {
    pub service: String,
    pub phase: FailurePhase,
    pub message: String,
    pub panicked: bool,
}

/// Single user-facing notice summarising every isolated service fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityNotice {
    pub message_key: &'static str,
    pub failures: Vec<ServiceFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub id: ServiceId,
    pub name: String,
    pub state: ServiceState,
}

enum Fault {
    Failed(ServiceError),
    Panicked(String),
}

impl Fault {
    fn into_failure(self, service: &str, phase: FailurePhase) -> ServiceFailure {
        let (message, panicked) = match self {
            Self::Failed(error) => (error.message().to_string(), false),
            Self::Panicked(message) => (message, true),
        };
        ServiceFailure {
            service: service.to_string(),
            phase,
            message,
            panicked,
        }
    }
}

fn guarded(call: impl FnOnce() -> Result<(), ServiceError>) -> Result<(), Fault> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(Fault::Failed(error)),
        Err(payload) => {
            let message = if let Some(message) = payload.downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Some(message) = payload.downcast_ref::<String>() {
                message.clone()
            } else {
                "unknown panic".to_string()
            };
            Err(Fault::Panicked(message))
        }
    }
}

struct Entry {
    id: ServiceId,
    name: String,
    service: Box<dyn Service>,
    state: ServiceState,
    subscriptions: BTreeSet<EventKind>,
}

/// Registers services and delivers lifecycle events to them.
///
/// Each hook call is isolated: a failing or panicking service is recorded and
/// the remaining services carry on.
#[derive(Default)]
pub struct ServiceRegistry {
    entries: Vec<Entry>,
    menu: MenuBar,
    failures: Vec<ServiceFailure>,
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ServiceRegistry")
            .field("services", &self.statuses())
            .field("failures", &self.failures.len())
            .finish()
    }
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the setup hooks of `service`. A name that is already registered
    /// keeps its first service and returns that id.
    pub fn register(&mut self, service: impl Service + 'static) -> ServiceId {
        let name = service.name().to_string();
        if let Some(existing) = self.id_of(&name) {
            log::warn!("service '{name}' is already registered as {existing}");
            return existing;
        }

        let id = ServiceId(self.entries.len());
        let mut service: Box<dyn Service> = Box::new(service);
        let mut setup = SetupContext::new(id);
        let outcome = guarded(|| service.contribute(&mut setup))
            .map_err(|fault| fault.into_failure(&name, FailurePhase::Contribute))
            .and_then(|()| match self.menu.conflicts(&setup.actions) {
                Some(action) => Err(Fault::Failed(ServiceError::new(format!(
                    "action '{action}' is already contributed"
                )))
                .into_failure(&name, FailurePhase::Contribute)),
                None => Ok(()),
            })
            .and_then(|()| {
                guarded(|| service.connect(&mut setup))
                    .map_err(|fault| fault.into_failure(&name, FailurePhase::Connect))
            });

        let (state, subscriptions) = match outcome {
            Ok(()) => {
                log::info!(
                    "registered service '{name}' as {id} ({} actions)",
                    setup.actions.len()
                );
                self.menu.commit(setup.actions);
                (ServiceState::Active, setup.subscriptions)
            }
            Err(failure) => {
                self.record(failure);
                (ServiceState::Excluded, BTreeSet::new())
            }
        };
        self.entries.push(Entry {
            id,
            name,
            service,
            state,
            subscriptions,
        });
        id
    }

    /// Delivers `event` to every active subscriber, in registration order.
    /// Returns how many services handled it without fault.
    pub fn dispatch(&mut self, event: &LifecycleEvent, windows: &WindowManager) -> usize {
        let mut delivered = 0;
        for entry in &mut self.entries {
            if entry.state != ServiceState::Active || !entry.subscriptions.contains(&event.kind()) {
                continue;
            }
            let mut context = ServiceContext::new(entry.id, windows, &mut self.menu);
            let service = &mut entry.service;
            match guarded(|| service.on_event(event, &mut context)) {
                Ok(()) => delivered += 1,
                Err(fault) => {
                    let panicked = matches!(fault, Fault::Panicked(_));
                    let failure = fault.into_failure(&entry.name, FailurePhase::Dispatch);
                    log::warn!(
                        "service '{}' failed handling {event:?}: {}",
                        failure.service,
                        failure.message
                    );
                    self.failures.push(failure);
                    if panicked {
                        entry.state = ServiceState::Excluded;
                        self.menu.withdraw(entry.id);
                        log::warn!("service '{}' excluded after panic", entry.name);
                    }
                }
            }
        }
        delivered
    }

    pub fn id_of(&self, name: &str) -> Option<ServiceId> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.id)
    }

    pub fn state(&self, id: ServiceId) -> Option<ServiceState> {
        self.entries.get(id.0).map(|entry| entry.state)
    }

    pub fn statuses(&self) -> Vec<ServiceStatus> {
        self.entries
            .iter()
            .map(|entry| ServiceStatus {
                id: entry.id,
                name: entry.name.clone(),
                state: entry.state,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn menu(&self) -> &MenuBar {
        &self.menu
    }

    pub fn failures(&self) -> &[ServiceFailure] {
        &self.failures
    }

    pub fn integrity_notice(&self) -> Option<IntegrityNotice> {
        if self.failures.is_empty() {
            return None;
        }
        Some(IntegrityNotice {
            message_key: INTEGRITY_NOTICE_KEY,
            failures: self.failures.clone(),
        })
    }

    fn record(&mut self, failure: ServiceFailure) {
        log::warn!(
            "service '{}' excluded: {} failed: {}",
            failure.service,
            failure.phase,
            failure.message
        );
        self.failures.push(failure);
    }
}
