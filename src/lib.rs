//! Gearshift: a configurable finite-state machine engine.
//!
//! A machine is built once from a declarative configuration — states, the
//! events each state handles, and named lifecycle callbacks — validated
//! eagerly, then driven synchronously through [`Machine::handle_event`].
//! Defects never panic or return `Err`: construction always yields a
//! machine, and [`Machine::status`] / [`Machine::is_valid`] report whether
//! it is usable.
//!
//! # Core Concepts
//!
//! - **Configuration**: plain data ([`MachineConfig`]), buildable fluently
//!   or parsed from a JSON document
//! - **Callbacks**: named closures supplied through a [`CallbackRegistry`],
//!   fired in a fixed order around each transition
//! - **Status codes**: a closed [`Status`] enumeration for construction
//!   validity and per-call outcomes
//!
//! # Example
//!
//! ```rust
//! use gearshift::{CallbackRegistry, EventDef, Machine, MachineConfig, StateDef, Status};
//!
//! let config = MachineConfig::new("Off")
//!     .state("Off", StateDef::new().event("turnOn", EventDef::to("On")))
//!     .state(
//!         "On",
//!         StateDef::new()
//!             .event("turnOff", EventDef::to("Off"))
//!             .on_enter("light-on"),
//!     );
//!
//! let registry = CallbackRegistry::new().register("light-on", || println!("*click*"));
//!
//! let mut machine = Machine::new(config, registry);
//! assert!(machine.is_valid());
//!
//! assert_eq!(machine.handle_event("turnOn"), Status::Ok);
//! assert_eq!(machine.current_state(), Some("On"));
//! assert_eq!(machine.handle_event("turnOn"), Status::IllegalEvent);
//! ```

pub mod config;
pub mod diag;
pub mod history;
pub mod machine;
pub mod registry;
pub mod status;

// Re-export commonly used types
pub use config::{EventDef, MachineConfig, StateActions, StateDef};
pub use diag::{DiagnosticsSink, MemorySink, TracingSink};
pub use history::{History, TransitionRecord};
pub use machine::{Machine, ValidationIssue};
pub use registry::{Callback, CallbackRegistry};
pub use status::Status;
