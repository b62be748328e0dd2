//! The FSM engine: construction, queries, and event handling.

mod validate;

pub use validate::{ActionHook, TransitionHook, ValidationIssue};

use crate::config::MachineConfig;
use crate::diag::{DiagnosticsSink, TracingSink};
use crate::history::{History, TransitionRecord};
use crate::registry::CallbackRegistry;
use crate::status::Status;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// A finite-state machine built from a declarative configuration.
///
/// Construction always succeeds; configuration defects are recorded rather
/// than thrown. A machine that failed validation is degraded-but-alive: safe
/// to query, but [`handle_event`](Machine::handle_event) and
/// [`can_handle_event`](Machine::can_handle_event) uniformly refuse to
/// operate.
///
/// # Example
///
/// ```rust
/// use gearshift::{CallbackRegistry, EventDef, Machine, MachineConfig, StateDef, Status};
///
/// let config = MachineConfig::new("Off")
///     .state("Off", StateDef::new().event("turnOn", EventDef::to("On")))
///     .state("On", StateDef::new().event("turnOff", EventDef::to("Off")));
///
/// let mut machine = Machine::new(config, CallbackRegistry::new());
/// assert!(machine.is_valid());
/// assert_eq!(machine.current_state(), Some("Off"));
///
/// assert_eq!(machine.handle_event("turnOn"), Status::Ok);
/// assert_eq!(machine.current_state(), Some("On"));
/// ```
pub struct Machine {
    id: Uuid,
    config: MachineConfig,
    registry: CallbackRegistry,
    sink: Arc<dyn DiagnosticsSink>,
    current: Option<String>,
    init_status: Status,
    valid: bool,
    issues: Vec<ValidationIssue>,
    history: History,
}

impl Machine {
    /// Build a machine, logging diagnostics through the default
    /// [`TracingSink`].
    pub fn new(config: MachineConfig, registry: CallbackRegistry) -> Self {
        Self::with_sink(config, registry, Arc::new(TracingSink))
    }

    /// Build a machine with an injected diagnostics sink.
    ///
    /// Validation runs exactly once, here. Every detected defect is reported
    /// through the sink and kept in [`validation_issues`](Machine::validation_issues);
    /// the terminal [`status`](Machine::status) is the category of the last
    /// defect in declaration order.
    pub fn with_sink(
        config: MachineConfig,
        registry: CallbackRegistry,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let id = Uuid::new_v4();
        let tag = tag_for(id);
        let report = validate::validate(&config, &registry, sink.as_ref(), &tag);
        let init_status = report.status();
        let current = report.start_ok.then(|| config.start_state.clone());

        Self {
            id,
            config,
            registry,
            sink,
            current,
            init_status,
            valid: init_status.is_ok(),
            issues: report.issues,
            history: History::new(),
        }
    }

    /// Instance id used to tag this machine's diagnostics.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether construction-time validation found no defects.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The construction-time status code.
    pub fn status(&self) -> Status {
        self.init_status
    }

    /// The current state, verbatim. May be stale or unset on an invalid
    /// machine; no validity check is performed.
    pub fn current_state(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Every defect found at construction, in declaration order.
    pub fn validation_issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Completed transitions so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether the current state declares `event`.
    ///
    /// Returns false (and logs an error) on a machine that failed
    /// validation.
    pub fn can_handle_event(&self, event: &str) -> bool {
        if !self.valid {
            self.sink.error(&format!(
                "{} rejecting query for event '{event}': machine failed validation",
                self.tag()
            ));
            return false;
        }

        let Some(current) = self.current.as_deref() else {
            return false;
        };
        self.config
            .states
            .get(current)
            .and_then(|state| state.events.get(event))
            .is_some_and(|entry| entry.is_some())
    }

    /// Handle an event, transitioning if it is legal for the current state.
    ///
    /// The callback sequence is fixed: onBefore, then the old state's
    /// onExit, then the state mutation, then the new state's onEnter, then
    /// onAfter. [`current_state`](Machine::current_state) reflects the new
    /// state from the mutation point onward.
    ///
    /// A self-transition runs the full sequence and returns [`Status::Ok`];
    /// it is a degenerate but valid transition, never a no-op. (Earlier
    /// revisions of this engine skipped self-transitions; callers may depend
    /// on the uniform behavior, so it is part of the contract.)
    ///
    /// Errors are returned, never thrown, and leave the state untouched.
    /// Panics from inside a callback are not caught: they unwind to the
    /// caller, later callbacks in the sequence do not run, and the state
    /// stays wherever the mutation had progressed.
    pub fn handle_event(&mut self, event: &str) -> Status {
        if !self.valid {
            self.sink.error(&format!(
                "{} rejecting event '{event}': machine failed validation",
                self.tag()
            ));
            return Status::ImproperlyInitialized;
        }

        let Some(current) = self.current.clone() else {
            self.sink.error(&format!(
                "{} rejecting event '{event}': no current state",
                self.tag()
            ));
            return Status::ImproperlyInitialized;
        };

        let event_def = self
            .config
            .states
            .get(&current)
            .and_then(|state| state.events.get(event))
            .and_then(|entry| entry.clone());
        let Some(event_def) = event_def else {
            self.sink.error(&format!(
                "{} event '{event}' is not handleable in state '{current}'",
                self.tag()
            ));
            return Status::IllegalEvent;
        };

        // Construction already validated targets; re-check so a runtime
        // inconsistency can never move the machine into an undeclared state.
        let target = event_def.to_state;
        if !self.config.states.contains_key(&target) {
            self.sink.error(&format!(
                "{} event '{event}' in state '{current}' targets undeclared state '{target}'",
                self.tag()
            ));
            return Status::InvalidTargetState;
        }

        self.fire(event_def.on_before.as_deref());
        self.fire(self.action_callback(&current, ActionHook::Exit).as_deref());

        self.current = Some(target.clone());

        self.fire(self.action_callback(&target, ActionHook::Enter).as_deref());
        self.fire(event_def.on_after.as_deref());

        self.history = self.history.record(TransitionRecord {
            event: event.to_string(),
            from: current,
            to: target,
            timestamp: Utc::now(),
        });

        Status::Ok
    }

    fn action_callback(&self, state: &str, hook: ActionHook) -> Option<String> {
        let actions = self.config.states.get(state)?.actions.as_ref()?;
        match hook {
            ActionHook::Enter => actions.on_enter.clone(),
            ActionHook::Exit => actions.on_exit.clone(),
        }
    }

    /// Invoke a named callback. Resolved at fire time, never cached.
    fn fire(&self, name: Option<&str>) {
        let Some(name) = name else {
            return;
        };
        if let Some(callback) = self.registry.get(name) {
            callback();
        }
    }

    fn tag(&self) -> String {
        tag_for(self.id)
    }
}

fn tag_for(id: Uuid) -> String {
    let hex = id.simple().to_string();
    format!("machine {}", &hex[..8])
}
