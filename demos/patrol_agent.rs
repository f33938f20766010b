//! A guard that patrols, chases what it sees and gives up after a while.
//!
//! Run with `RUST_LOG=tickstate=debug cargo run --example patrol_agent` to
//! see every transition the machine commits.

use std::sync::Arc;
use std::time::Duration;
use stillwater::validation::Validation;
use tickstate::clock::ManualClock;
use tickstate::{current_state, state_names, FsmError, StateBuilder, StateDefinition, StateMachine};

state_names! {
    enum Guard {
        Idle,
        Patrol,
        Chase,
        Search,
    }
}

#[derive(Default)]
struct Senses {
    enemy_distance: Option<f32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tickstate=info".parse()?),
        )
        .init();

    println!("=== Patrol Agent Demo ===\n");

    let clock = Arc::new(ManualClock::new());
    let mut guard: StateMachine<Senses> = StateMachine::builder()
        .identity("Guard7")
        .clock(clock.clone())
        .build()?;

    guard.add_state(StateDefinition::indefinite(Guard::Idle.name()))?;
    guard.add_state(
        StateBuilder::new()
            .name(Guard::Patrol.name())
            .duration_secs(4.0)
            .on_started(|_, _| println!("  (guard sets off on patrol)"))
            .then(Guard::Idle.name())
            .build()?,
    )?;
    guard.add_state(
        StateDefinition::new(Guard::Chase.name(), Duration::from_secs(3))
            .with_enter(|s: &Senses| s.enemy_distance.is_some_and(|d| d < 15.0))
            .then(Guard::Search.name()),
    )?;
    guard.add_state(
        StateDefinition::new(Guard::Search.name(), Duration::from_secs(2))
            .then(Guard::Patrol.name()),
    )?;

    if let Validation::Failure(issues) = guard.lint() {
        for issue in issues.iter() {
            println!("config issue: {issue}");
        }
    }

    guard.change_state(Guard::Patrol)?;

    let far = Senses {
        enemy_distance: Some(40.0),
    };
    let near = Senses {
        enemy_distance: Some(8.0),
    };

    for tick in 1..=12 {
        clock.advance(Duration::from_millis(500));

        let senses = match tick {
            3 => Some(&far),
            5 => Some(&near),
            _ => None,
        };
        if let Some(senses) = senses {
            let outcome = guard.change_state_with(Guard::Chase, senses)?;
            println!("tick {tick:>2}: enemy sighted, chase {outcome:?}");
        }

        match guard.update() {
            Ok(_) => {}
            Err(FsmError::MissingCompletedHook { state, .. }) => {
                println!("tick {tick:>2}: state {state} has no successor");
            }
            Err(e) => return Err(e.into()),
        }

        println!(
            "tick {tick:>2}: {:<7} (registry: {})",
            guard.current_state().unwrap_or("-"),
            current_state("Guard7").unwrap_or_default()
        );
    }

    println!("\nPath: {}", guard.history().get_path().join(" -> "));
    guard.destroy()?;
    println!("After destroy the registry has: {:?}", current_state("Guard7"));

    Ok(())
}
