//! Configuration record types.
//!
//! All records are immutable values from the machine's point of view: the
//! machine takes its configuration by value at construction and never writes
//! to it afterwards. JSON field names follow the declarative document format
//! (`startState`, `toState`, `onBefore`, ...).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-level machine configuration.
///
/// `states` preserves declaration order, so validation diagnostics come out
/// in the order states were written.
///
/// # Example
///
/// ```rust
/// use gearshift::{EventDef, MachineConfig, StateDef};
///
/// let config = MachineConfig::new("Off")
///     .state("Off", StateDef::new().event("turnOn", EventDef::to("On")))
///     .state("On", StateDef::new().event("turnOff", EventDef::to("Off")));
///
/// assert_eq!(config.start_state, "Off");
/// assert_eq!(config.states.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    /// Name of the state the machine starts in. Must be declared in `states`.
    pub start_state: String,

    /// Declared states, keyed by state name.
    #[serde(default)]
    pub states: IndexMap<String, StateDef>,
}

impl MachineConfig {
    /// Create a configuration with the given start state and no states yet.
    pub fn new(start_state: impl Into<String>) -> Self {
        Self {
            start_state: start_state.into(),
            states: IndexMap::new(),
        }
    }

    /// Declare a state, replacing any previous definition under that name.
    pub fn state(mut self, name: impl Into<String>, def: StateDef) -> Self {
        self.states.insert(name.into(), def);
        self
    }

    /// Parse a configuration from a JSON document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gearshift::MachineConfig;
    ///
    /// let config = MachineConfig::from_json(
    ///     r#"{
    ///         "startState": "Off",
    ///         "states": {
    ///             "Off": { "events": { "turnOn": { "toState": "On" } } },
    ///             "On": { "events": { "turnOff": { "toState": "Off" } } }
    ///         }
    ///     }"#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(config.start_state, "Off");
    /// ```
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// One declared state: its outgoing events and optional enter/exit actions.
///
/// A state with no events is a terminal state; the machine can reach it but
/// never leave it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDef {
    /// Events this state can handle, keyed by event name. A `None` entry is
    /// a null event node in the source document and fails validation.
    #[serde(default)]
    pub events: IndexMap<String, Option<EventDef>>,

    /// Optional enter/exit actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<StateActions>,
}

impl StateDef {
    /// Create a state with no events and no actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an event on this state.
    pub fn event(mut self, name: impl Into<String>, def: EventDef) -> Self {
        self.events.insert(name.into(), Some(def));
        self
    }

    /// Name the callback fired when the machine enters this state.
    pub fn on_enter(mut self, callback: impl Into<String>) -> Self {
        self.actions.get_or_insert_with(StateActions::default).on_enter = Some(callback.into());
        self
    }

    /// Name the callback fired when the machine leaves this state.
    pub fn on_exit(mut self, callback: impl Into<String>) -> Self {
        self.actions.get_or_insert_with(StateActions::default).on_exit = Some(callback.into());
        self
    }
}

/// Enter/exit callback names for a state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateActions {
    /// Callback fired after the machine has moved into the state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_enter: Option<String>,

    /// Callback fired before the machine moves out of the state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_exit: Option<String>,
}

/// One declared event: the target state and optional before/after hooks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDef {
    /// Name of the state this event transitions to. Must be declared.
    pub to_state: String,

    /// Callback fired before anything else in the transition sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_before: Option<String>,

    /// Callback fired after everything else in the transition sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_after: Option<String>,
}

impl EventDef {
    /// Create an event targeting the given state, with no hooks.
    pub fn to(state: impl Into<String>) -> Self {
        Self {
            to_state: state.into(),
            on_before: None,
            on_after: None,
        }
    }

    /// Name the callback fired before the transition starts.
    pub fn on_before(mut self, callback: impl Into<String>) -> Self {
        self.on_before = Some(callback.into());
        self
    }

    /// Name the callback fired after the transition completes.
    pub fn on_after(mut self, callback: impl Into<String>) -> Self {
        self.on_after = Some(callback.into());
        self
    }
}
