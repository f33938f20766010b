//! End-to-end scenarios driven through the public API.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tickstate::clock::ManualClock;
use tickstate::{
    state_names, FsmError, MachineConfig, StateBuilder, StateDefinition, StateMachine,
    StateRegistry, TransitionOutcome,
};

state_names! {
    enum Agent {
        Idle,
        Walking,
    }
}

struct World {
    clock: Arc<ManualClock>,
    registry: Arc<StateRegistry>,
}

impl World {
    fn new() -> Self {
        Self {
            clock: Arc::new(ManualClock::new()),
            registry: StateRegistry::shared(),
        }
    }

    fn spawn<C>(&self, identity: &str) -> StateMachine<C> {
        StateMachine::builder()
            .identity(identity)
            .registry(self.registry.clone())
            .clock(self.clock.clone())
            .build()
            .unwrap()
    }

    fn tick(&self, fsm: &mut StateMachine, seconds: f64) {
        self.clock.advance(Duration::from_secs_f64(seconds));
        fsm.update().unwrap();
    }
}

#[test]
fn agent_walks_then_idles() {
    let world = World::new();
    let started = Arc::new(Mutex::new(Vec::new()));
    let mut agent: StateMachine = world.spawn("Agent1");

    agent.add_state(StateDefinition::indefinite("Idle")).unwrap();
    assert_eq!(world.registry.get_state("Agent1").as_deref(), Some("Idle"));

    let log = Arc::clone(&started);
    agent
        .add_state(
            StateBuilder::new()
                .name("Walking")
                .duration_secs(5.0)
                .when(|_| true)
                .on_started(move |_, _| log.lock().push("Walking"))
                .then("Idle")
                .build()
                .unwrap(),
        )
        .unwrap();

    agent.change_state(Agent::Walking).unwrap();
    assert_eq!(*started.lock(), vec!["Walking"]);
    assert_eq!(world.registry.get_state("Agent1").as_deref(), Some("Walking"));

    world.tick(&mut agent, 3.0);
    assert_eq!(agent.current_state(), Some(Agent::Walking.name()));

    world.tick(&mut agent, 2.2);
    assert_eq!(agent.current_state(), Some(Agent::Idle.name()));
    assert_eq!(world.registry.get_state("Agent1").as_deref(), Some("Idle"));
    assert_eq!(agent.history().get_path(), vec!["Idle", "Walking", "Idle"]);
}

#[test]
fn first_state_activates_and_repeated_target_is_ignored() {
    let world = World::new();
    let starts = Arc::new(Mutex::new(0u32));
    let mut fsm: StateMachine = world.spawn("P1");

    let counter = Arc::clone(&starts);
    fsm.add_state(
        StateDefinition::indefinite("A").on_started(move |_, _| *counter.lock() += 1),
    )
    .unwrap();
    assert_eq!(fsm.current_state(), Some("A"));
    assert_eq!(*starts.lock(), 1);

    assert_eq!(fsm.change_state("A").unwrap(), TransitionOutcome::AlreadyActive);
    assert_eq!(*starts.lock(), 1);
}

#[test]
fn unknown_target_changes_nothing() {
    let world = World::new();
    let mut fsm: StateMachine = world.spawn("P3");
    fsm.add_state(StateDefinition::indefinite("A")).unwrap();

    assert_eq!(fsm.change_state("nonexistent").unwrap(), TransitionOutcome::UnknownState);
    assert_eq!(fsm.current_state(), Some("A"));
    assert_eq!(world.registry.get_state("P3").as_deref(), Some("A"));
}

#[test]
fn guard_sees_the_transition_context() {
    #[derive(Default)]
    struct Perception {
        enemy_visible: bool,
    }

    let world = World::new();
    let mut fsm: StateMachine<Perception> = world.spawn("P4");
    fsm.add_state(StateDefinition::indefinite("Patrol")).unwrap();
    fsm.add_state(
        StateDefinition::indefinite("Chase").with_enter(|p: &Perception| p.enemy_visible),
    )
    .unwrap();

    let calm = Perception { enemy_visible: false };
    assert_eq!(
        fsm.change_state_with("Chase", &calm).unwrap(),
        TransitionOutcome::GuardRejected
    );
    assert_eq!(fsm.current_state(), Some("Patrol"));

    let alert = Perception { enemy_visible: true };
    assert!(fsm.change_state_with("Chase", &alert).unwrap().is_committed());
    assert_eq!(world.registry.get_state("P4").as_deref(), Some("Chase"));
}

#[test]
fn duration_expiry_hands_over() {
    let world = World::new();
    let mut fsm: StateMachine = world.spawn("P5");
    fsm.add_state(StateDefinition::indefinite("A")).unwrap();
    fsm.add_state(StateDefinition::new("B", Duration::from_secs(5)).then("A"))
        .unwrap();
    fsm.change_state("B").unwrap();

    world.tick(&mut fsm, 4.9);
    assert_eq!(fsm.current_state(), Some("B"));

    world.tick(&mut fsm, 0.1);
    assert_eq!(fsm.current_state(), Some("A"));
}

#[test]
fn destroy_clears_registry_entry() {
    let world = World::new();
    let mut fsm: StateMachine = world.spawn("P7");
    fsm.add_state(StateDefinition::indefinite("A")).unwrap();
    assert_eq!(world.registry.live_count(), 1);

    fsm.destroy().unwrap();

    assert_eq!(world.registry.get_state("P7"), None);
    assert_eq!(world.registry.live_count(), 0);
    assert!(matches!(fsm.destroy(), Err(FsmError::Destroyed { .. })));
}

#[test]
fn config_from_json_drives_machine() {
    let config = MachineConfig::from_json(r#"{ "absent_guard": "deny" }"#).unwrap();
    let registry = StateRegistry::shared();
    let mut fsm: StateMachine = StateMachine::builder()
        .identity("Strict")
        .registry(registry.clone())
        .config(config)
        .build()
        .unwrap();

    fsm.add_state(StateDefinition::indefinite("Idle")).unwrap();
    assert_eq!(fsm.current_state(), None);
    assert_eq!(registry.get_state("Strict").as_deref(), Some(""));
}

#[test]
fn machines_share_a_registry() {
    let world = World::new();
    let mut a: StateMachine = world.spawn("A");
    let mut b: StateMachine = world.spawn("B");
    a.add_state(StateDefinition::indefinite("Idle")).unwrap();
    b.add_state(StateDefinition::indefinite("Sleep")).unwrap();

    assert_eq!(world.registry.identities(), vec!["A".to_string(), "B".to_string()]);
    assert_eq!(world.registry.get_state("A").as_deref(), Some("Idle"));
    assert_eq!(world.registry.get_state("B").as_deref(), Some("Sleep"));

    drop(a);
    assert_eq!(world.registry.identities(), vec!["B".to_string()]);
}

#[test]
fn machines_run_on_worker_threads() {
    let world = World::new();
    let mut handles = Vec::new();

    for worker in 0..4 {
        let mut fsm: StateMachine = world.spawn(&format!("Worker{worker}"));
        handles.push(std::thread::spawn(move || {
            fsm.add_state(StateDefinition::indefinite("Idle")).unwrap();
            fsm.add_state(StateDefinition::indefinite("Busy")).unwrap();
            fsm.change_state("Busy").unwrap();
            fsm
        }));
    }

    let machines: Vec<StateMachine> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let registry = Arc::clone(&world.registry);
    let observer = std::thread::spawn(move || {
        (0..4)
            .map(|worker| registry.get_state(&format!("Worker{worker}")))
            .collect::<Vec<_>>()
    });
    let observed = observer.join().unwrap();

    assert_eq!(observed, vec![Some("Busy".to_string()); 4]);
    assert_eq!(world.registry.live_count(), 4);
    drop(machines);
    assert_eq!(world.registry.live_count(), 0);
}
