//! Login Flow State Machine
//!
//! This example demonstrates a small workflow with a failure branch and
//! before/after hooks around the transitions, loaded from a JSON document.
//!
//! Key concepts:
//! - Configuration parsed from JSON (camelCase document format)
//! - onBefore/onAfter hooks on events
//! - A failure branch returning to the initial state
//!
//! Run with: cargo run --example login_flow

use gearshift::{CallbackRegistry, Machine, MachineConfig};

const CONFIG: &str = r#"{
    "startState": "LoggedOut",
    "states": {
        "LoggedOut": {
            "events": {
                "login": { "toState": "LoggingIn", "onBefore": "spinner-on" }
            }
        },
        "LoggingIn": {
            "events": {
                "success": { "toState": "LoggedIn", "onAfter": "spinner-off" },
                "failure": { "toState": "LoggedOut", "onAfter": "spinner-off" }
            }
        },
        "LoggedIn": {
            "events": {
                "logout": { "toState": "LoggedOut" }
            },
            "actions": { "onEnter": "greet" }
        }
    }
}"#;

fn main() {
    println!("=== Login Flow State Machine ===\n");

    let config = MachineConfig::from_json(CONFIG).expect("config document parses");
    let registry = CallbackRegistry::new()
        .register("spinner-on", || println!("  [ui] spinner on"))
        .register("spinner-off", || println!("  [ui] spinner off"))
        .register("greet", || println!("  [ui] welcome back"));

    let mut machine = Machine::new(config, registry);
    println!("valid: {}", machine.is_valid());
    println!("initial state: {:?}\n", machine.current_state());

    for event in ["login", "failure", "login", "success", "logout"] {
        let status = machine.handle_event(event);
        println!(
            "handle_event({event:?}) -> {status}, now in {:?}",
            machine.current_state()
        );
    }

    println!("\npath taken: {:?}", machine.history().path());
    println!("\n=== Example Complete ===");
}
