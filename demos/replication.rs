//! Keep a client-side replica in step with a server-side machine.
//!
//! The server ships a compact bincode snapshot each time it changes state;
//! the client applies it and runs its own hooks.

use std::sync::Arc;
use std::time::Duration;
use tickstate::clock::ManualClock;
use tickstate::{MachineSnapshot, StateDefinition, StateMachine, StateRegistry};

fn build(
    identity: &str,
    registry: &Arc<StateRegistry>,
    clock: &Arc<ManualClock>,
    side: &'static str,
) -> Result<StateMachine, Box<dyn std::error::Error>> {
    let mut fsm: StateMachine = StateMachine::builder()
        .identity(identity)
        .registry(registry.clone())
        .clock(clock.clone())
        .build()?;

    fsm.add_state(StateDefinition::indefinite("Idle"))?;
    fsm.add_state(
        StateDefinition::new("Attack", Duration::from_millis(800))
            .on_started(move |_, _| println!("  [{side}] swing!"))
            .then("Recover"),
    )?;
    fsm.add_state(StateDefinition::new("Recover", Duration::from_millis(400)).then("Idle"))?;
    Ok(fsm)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Replication Demo ===\n");

    let registry = StateRegistry::shared();
    let clock = Arc::new(ManualClock::new());
    let mut server = build("Orc12", &registry, &clock, "server")?;
    let mut client = build("Orc12-client", &registry, &clock, "client")?;

    server.change_state("Attack")?;
    let mut last_sent = None;

    for tick in 1..=10 {
        clock.advance(Duration::from_millis(200));
        server.update()?;

        if server.current_ordinal() != last_sent {
            let bytes = server.snapshot().to_bytes()?;
            println!("tick {tick:>2}: server sends {} bytes", bytes.len());
            let snapshot = MachineSnapshot::from_bytes(&bytes)?;
            client.apply_snapshot(&snapshot)?;
            last_sent = server.current_ordinal();
        }
        client.update()?;

        println!(
            "tick {tick:>2}: server={:<8} client={:<8}",
            server.current_state().unwrap_or("-"),
            client.current_state().unwrap_or("-"),
        );
    }

    println!("\nRegistry: {:?}", registry.identities());
    Ok(())
}
