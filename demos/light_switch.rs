//! Light Switch State Machine
//!
//! This example demonstrates the smallest useful machine: two states
//! toggled by two events, with an action announcing each power-on.
//!
//! Key concepts:
//! - Fluent configuration records
//! - Named callbacks resolved through the registry
//! - Status codes instead of thrown errors
//!
//! Run with: cargo run --example light_switch

use gearshift::{CallbackRegistry, EventDef, Machine, MachineConfig, StateDef};

fn main() {
    println!("=== Light Switch State Machine ===\n");

    let config = MachineConfig::new("Off")
        .state("Off", StateDef::new().event("turnOn", EventDef::to("On")))
        .state(
            "On",
            StateDef::new()
                .event("turnOff", EventDef::to("Off"))
                .on_enter("click"),
        );

    let registry = CallbackRegistry::new().register("click", || println!("  *click* light is on"));

    let mut machine = Machine::new(config, registry);
    println!("valid: {}", machine.is_valid());
    println!("initial state: {:?}\n", machine.current_state());

    for event in ["turnOn", "turnOff", "turnOff"] {
        let status = machine.handle_event(event);
        println!(
            "handle_event({event:?}) -> {status}, now in {:?}",
            machine.current_state()
        );
    }

    println!("\npath taken: {:?}", machine.history().path());
    println!("\n=== Example Complete ===");
}
