//! Construction-time configuration validation.
//!
//! Validation is exhaustive and eager: every check runs, every defect is
//! recorded and reported through the diagnostics sink, and the machine's
//! terminal status code is the category of the LAST defect in declaration
//! order. Consumers are expected to treat any non-OK status as fatal; the
//! full defect list stays available for diagnosis.

use crate::config::MachineConfig;
use crate::diag::DiagnosticsSink;
use crate::registry::CallbackRegistry;
use crate::status::Status;
use std::fmt;
use thiserror::Error;

/// Which state action a defect refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionHook {
    Enter,
    Exit,
}

impl fmt::Display for ActionHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enter => "onEnter",
            Self::Exit => "onExit",
        })
    }
}

/// Which transition hook a defect refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionHook {
    Before,
    After,
}

impl fmt::Display for TransitionHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "onBefore",
            Self::After => "onAfter",
        })
    }
}

/// One defect detected in a machine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("no states are declared")]
    EmptyStateTable,

    #[error("start state '{start}' is not a declared state")]
    UnknownStartState { start: String },

    #[error("event '{event}' in state '{state}' is null instead of an event definition")]
    NullEventNode { state: String, event: String },

    #[error("{hook} action '{callback}' on state '{state}' is not a registered callback")]
    UnregisteredAction {
        state: String,
        hook: ActionHook,
        callback: String,
    },

    #[error("{hook} hook '{callback}' on event '{event}' in state '{state}' is not a registered callback")]
    UnregisteredHook {
        state: String,
        event: String,
        hook: TransitionHook,
        callback: String,
    },

    #[error("event '{event}' in state '{state}' targets undeclared state '{target}'")]
    UnknownTargetState {
        state: String,
        event: String,
        target: String,
    },
}

impl ValidationIssue {
    /// The status category this defect falls under.
    pub fn status(&self) -> Status {
        match self {
            Self::EmptyStateTable => Status::NoValidStates,
            Self::UnknownStartState { .. } => Status::InvalidStartState,
            Self::NullEventNode { .. } => Status::InvalidEventNode,
            Self::UnregisteredAction { .. } => Status::InvalidActionFunction,
            Self::UnregisteredHook { .. } => Status::InvalidTransitionFunction,
            Self::UnknownTargetState { .. } => Status::InvalidTargetState,
        }
    }
}

/// Outcome of the validation sweep.
pub(crate) struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    /// Whether the start state names a declared state.
    pub start_ok: bool,
}

impl ValidationReport {
    /// Terminal status: the category of the last defect, or OK.
    pub fn status(&self) -> Status {
        self.issues.last().map_or(Status::Ok, ValidationIssue::status)
    }
}

/// Run every check against the configuration, logging as it goes.
///
/// `tag` prefixes every diagnostic line so interleaved machines stay
/// attributable.
pub(crate) fn validate(
    config: &MachineConfig,
    registry: &CallbackRegistry,
    sink: &dyn DiagnosticsSink,
    tag: &str,
) -> ValidationReport {
    let mut issues = Vec::new();
    let push = |issues: &mut Vec<ValidationIssue>, issue: ValidationIssue| {
        sink.error(&format!("{tag} {issue}"));
        issues.push(issue);
    };

    if config.states.is_empty() {
        push(&mut issues, ValidationIssue::EmptyStateTable);
    }

    let start_ok = config.states.contains_key(&config.start_state);
    if !start_ok {
        push(
            &mut issues,
            ValidationIssue::UnknownStartState {
                start: config.start_state.clone(),
            },
        );
    }

    for (state_name, state_def) in &config.states {
        if state_def.events.is_empty() {
            sink.warn(&format!(
                "{tag} state '{state_name}' declares no events; it is terminal"
            ));
        }

        if let Some(actions) = &state_def.actions {
            let hooks = [
                (ActionHook::Enter, actions.on_enter.as_deref()),
                (ActionHook::Exit, actions.on_exit.as_deref()),
            ];
            for (hook, callback) in hooks {
                if let Some(callback) = callback {
                    if !registry.contains(callback) {
                        push(
                            &mut issues,
                            ValidationIssue::UnregisteredAction {
                                state: state_name.clone(),
                                hook,
                                callback: callback.to_string(),
                            },
                        );
                    }
                }
            }
        }

        for (event_name, event_def) in &state_def.events {
            let Some(event_def) = event_def else {
                push(
                    &mut issues,
                    ValidationIssue::NullEventNode {
                        state: state_name.clone(),
                        event: event_name.clone(),
                    },
                );
                continue;
            };

            let hooks = [
                (TransitionHook::Before, event_def.on_before.as_deref()),
                (TransitionHook::After, event_def.on_after.as_deref()),
            ];
            for (hook, callback) in hooks {
                if let Some(callback) = callback {
                    if !registry.contains(callback) {
                        push(
                            &mut issues,
                            ValidationIssue::UnregisteredHook {
                                state: state_name.clone(),
                                event: event_name.clone(),
                                hook,
                                callback: callback.to_string(),
                            },
                        );
                    }
                }
            }

            if !config.states.contains_key(&event_def.to_state) {
                push(
                    &mut issues,
                    ValidationIssue::UnknownTargetState {
                        state: state_name.clone(),
                        event: event_name.clone(),
                        target: event_def.to_state.clone(),
                    },
                );
            }
        }
    }

    ValidationReport { issues, start_ok }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EventDef, StateDef};
    use crate::diag::MemorySink;

    fn run(config: &MachineConfig, registry: &CallbackRegistry) -> (ValidationReport, MemorySink) {
        let sink = MemorySink::new();
        let report = validate(config, registry, &sink, "machine test");
        (report, sink)
    }

    #[test]
    fn clean_config_passes() {
        let config = MachineConfig::new("A")
            .state("A", StateDef::new().event("go", EventDef::to("B")))
            .state("B", StateDef::new().event("back", EventDef::to("A")));

        let (report, sink) = run(&config, &CallbackRegistry::new());

        assert!(report.issues.is_empty());
        assert!(report.start_ok);
        assert_eq!(report.status(), Status::Ok);
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn empty_state_table_records_both_defects() {
        let config = MachineConfig::new("A");
        let (report, _sink) = run(&config, &CallbackRegistry::new());

        assert!(!report.start_ok);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issues[0], ValidationIssue::EmptyStateTable);
        assert!(matches!(
            report.issues[1],
            ValidationIssue::UnknownStartState { .. }
        ));
        // Last defect decides the terminal code.
        assert_eq!(report.status(), Status::InvalidStartState);
    }

    #[test]
    fn unknown_start_state_is_detected() {
        let config = MachineConfig::new("Nowhere").state("A", StateDef::new());
        let (report, _sink) = run(&config, &CallbackRegistry::new());

        assert!(!report.start_ok);
        assert_eq!(report.status(), Status::InvalidStartState);
    }

    #[test]
    fn terminal_state_warns_but_passes() {
        let config = MachineConfig::new("A")
            .state("A", StateDef::new().event("finish", EventDef::to("Done")))
            .state("Done", StateDef::new());

        let (report, sink) = run(&config, &CallbackRegistry::new());

        assert_eq!(report.status(), Status::Ok);
        assert_eq!(sink.warnings().len(), 1);
        assert!(sink.warnings()[0].contains("Done"));
    }

    #[test]
    fn null_event_node_is_detected() {
        let mut config = MachineConfig::new("A").state("A", StateDef::new());
        config
            .states
            .get_mut("A")
            .unwrap()
            .events
            .insert("broken".into(), None);

        let (report, _sink) = run(&config, &CallbackRegistry::new());

        assert_eq!(report.status(), Status::InvalidEventNode);
        assert!(report.start_ok);
    }

    #[test]
    fn unregistered_action_is_detected() {
        let config = MachineConfig::new("A").state(
            "A",
            StateDef::new()
                .event("go", EventDef::to("A"))
                .on_enter("missing"),
        );

        let (report, _sink) = run(&config, &CallbackRegistry::new());

        assert_eq!(report.status(), Status::InvalidActionFunction);
        assert_eq!(
            report.issues,
            vec![ValidationIssue::UnregisteredAction {
                state: "A".into(),
                hook: ActionHook::Enter,
                callback: "missing".into(),
            }]
        );
    }

    #[test]
    fn registered_action_passes() {
        let config = MachineConfig::new("A").state(
            "A",
            StateDef::new()
                .event("go", EventDef::to("A"))
                .on_exit("present"),
        );
        let registry = CallbackRegistry::new().register("present", || {});

        let (report, _sink) = run(&config, &registry);
        assert_eq!(report.status(), Status::Ok);
    }

    #[test]
    fn unregistered_hook_is_detected() {
        let config = MachineConfig::new("A").state(
            "A",
            StateDef::new().event("go", EventDef::to("A").on_before("nope")),
        );

        let (report, _sink) = run(&config, &CallbackRegistry::new());

        assert_eq!(report.status(), Status::InvalidTransitionFunction);
        assert!(matches!(
            &report.issues[0],
            ValidationIssue::UnregisteredHook {
                hook: TransitionHook::Before,
                ..
            }
        ));
    }

    #[test]
    fn unknown_target_state_is_detected() {
        let config = MachineConfig::new("A")
            .state("A", StateDef::new().event("go", EventDef::to("Missing")));

        let (report, _sink) = run(&config, &CallbackRegistry::new());

        assert_eq!(report.status(), Status::InvalidTargetState);
        assert!(report.start_ok);
    }

    #[test]
    fn last_defect_wins_across_categories() {
        // onBefore hook defect comes before the target defect within the
        // same event, so the target defect decides the code.
        let config = MachineConfig::new("A").state(
            "A",
            StateDef::new().event("go", EventDef::to("Missing").on_before("nope")),
        );

        let (report, _sink) = run(&config, &CallbackRegistry::new());

        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.status(), Status::InvalidTargetState);
    }

    #[test]
    fn defects_follow_declaration_order() {
        let config = MachineConfig::new("First")
            .state(
                "First",
                StateDef::new().event("go", EventDef::to("Missing")),
            )
            .state(
                "Second",
                StateDef::new()
                    .event("stay", EventDef::to("Second"))
                    .on_enter("absent"),
            );

        let (report, _sink) = run(&config, &CallbackRegistry::new());

        assert!(matches!(
            report.issues[0],
            ValidationIssue::UnknownTargetState { .. }
        ));
        assert!(matches!(
            report.issues[1],
            ValidationIssue::UnregisteredAction { .. }
        ));
        assert_eq!(report.status(), Status::InvalidActionFunction);
    }

    #[test]
    fn every_defect_is_logged() {
        let config = MachineConfig::new("A").state(
            "A",
            StateDef::new().event("go", EventDef::to("Missing").on_after("nope")),
        );

        let (report, sink) = run(&config, &CallbackRegistry::new());

        assert_eq!(report.issues.len(), 2);
        assert_eq!(sink.errors().len(), 2);
        assert!(sink.errors()[0].contains("machine test"));
    }
}
