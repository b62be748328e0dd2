//! Status codes reported by machine construction and event handling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of outcome codes for construction validity and per-call results.
///
/// A machine's `status()` reports the construction outcome; `handle_event`
/// returns a per-call code. `Status::Ok` is the only non-error value.
///
/// The serialized and `Display` forms are stable SCREAMING_SNAKE codes, e.g.
/// `ERROR_ILLEGAL_EVENT`.
///
/// # Example
///
/// ```rust
/// use gearshift::Status;
///
/// assert!(Status::Ok.is_ok());
/// assert_eq!(Status::IllegalEvent.as_str(), "ERROR_ILLEGAL_EVENT");
/// assert!(!Status::IllegalEvent.is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Construction succeeded, or the event was handled.
    #[serde(rename = "OK")]
    Ok,

    /// The event is not registered on the current state.
    #[serde(rename = "ERROR_ILLEGAL_EVENT")]
    IllegalEvent,

    /// The configured start state does not name a declared state.
    #[serde(rename = "ERROR_INVALID_START_STATE")]
    InvalidStartState,

    /// The configuration declares no states at all.
    #[serde(rename = "ERROR_NO_VALID_STATES")]
    NoValidStates,

    /// An event entry is null instead of an event definition.
    #[serde(rename = "ERROR_INVALID_EVENT_NODE")]
    InvalidEventNode,

    /// An event targets a state that is not declared.
    #[serde(rename = "ERROR_INVALID_TARGET_STATE")]
    InvalidTargetState,

    /// An onBefore/onAfter hook names a callback that is not registered.
    // The spelling is historical; the emitted code must stay stable.
    #[serde(rename = "ERROR_INVALID_TRANSISTION_FUNCTION")]
    InvalidTransitionFunction,

    /// An onEnter/onExit action names a callback that is not registered.
    #[serde(rename = "ERROR_INVALID_ACTION_FUNCTION")]
    InvalidActionFunction,

    /// The machine failed construction-time validation and refuses to run.
    #[serde(rename = "ERROR_IMPROPERLY_INITIALIZED")]
    ImproperlyInitialized,
}

impl Status {
    /// Stable string code for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::IllegalEvent => "ERROR_ILLEGAL_EVENT",
            Self::InvalidStartState => "ERROR_INVALID_START_STATE",
            Self::NoValidStates => "ERROR_NO_VALID_STATES",
            Self::InvalidEventNode => "ERROR_INVALID_EVENT_NODE",
            Self::InvalidTargetState => "ERROR_INVALID_TARGET_STATE",
            Self::InvalidTransitionFunction => "ERROR_INVALID_TRANSISTION_FUNCTION",
            Self::InvalidActionFunction => "ERROR_INVALID_ACTION_FUNCTION",
            Self::ImproperlyInitialized => "ERROR_IMPROPERLY_INITIALIZED",
        }
    }

    /// Whether this is the success code.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
