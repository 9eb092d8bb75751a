//! Project queue tests.
//!
//! Covers damage boundaries, completion and replacement, and the
//! one-project-per-subject invariant over long runs.

use inspire_deck::cards::Subject;
use inspire_deck::core::{AnimationConfig, EventLog, GameConfig, GameError, GameEvent, GameRng};
use inspire_deck::projects::{ProjectQueue, RewardCredit};

fn config() -> GameConfig {
    GameConfig::default().with_animation(AnimationConfig::instant())
}

fn populated(config: &GameConfig, seed: u64) -> (ProjectQueue, GameRng, EventLog) {
    let mut rng = GameRng::new(seed);
    let mut events = EventLog::new();
    let mut queue = ProjectQueue::new(config);
    queue.populate(&mut rng, &mut events);
    (queue, rng, events)
}

/// Advance until nothing is in flight. Returns every credit that landed.
fn drain(queue: &mut ProjectQueue, rng: &mut GameRng, events: &mut EventLog) -> Vec<RewardCredit> {
    let mut credits = Vec::new();
    for _ in 0..1000 {
        if let Some(credit) = queue.advance(rng, events) {
            credits.push(credit);
        }
        if !queue.is_hit_open() && !queue.is_laser_playing() && !queue.is_spawning() {
            return credits;
        }
    }
    panic!("project animations never drained");
}

/// Test the initial queue.
#[test]
fn test_populate() {
    let config = config();
    let (queue, _, events) = populated(&config, 4);

    assert_eq!(queue.projects().len(), 4);
    assert!(queue.check_invariants().is_ok());
    let max: Vec<_> = queue.projects().iter().map(|p| p.max_hp).collect();
    assert_eq!(max, vec![10, 15, 20, 25]);
    assert!(queue.projects().iter().all(|p| p.hp == p.max_hp));
    assert_eq!(events.len(), 4);
}

/// Test that different seeds give different subject orders.
#[test]
fn test_populate_order_depends_on_seed() {
    let config = config();
    let orders: Vec<Vec<Subject>> = (0..8)
        .map(|seed| {
            let (queue, _, _) = populated(&config, seed);
            queue.projects().iter().map(|p| p.subject).collect()
        })
        .collect();
    assert!(orders.iter().any(|o| *o != orders[0]));
}

/// Test exact, partial, and overkill damage.
#[test]
fn test_damage_boundaries() {
    let config = config();
    let (mut queue, mut rng, mut events) = populated(&config, 4);
    let first = queue.projects()[0].subject;

    let partial = queue.damage(first, 4, &mut events).unwrap();
    assert_eq!((partial.hp, partial.is_completed, partial.is_perfect), (6, false, false));
    drain(&mut queue, &mut rng, &mut events);

    let exact = queue.damage(first, 6, &mut events).unwrap();
    assert_eq!((exact.hp, exact.is_completed, exact.is_perfect), (0, true, true));
    drain(&mut queue, &mut rng, &mut events);

    let second = queue.projects()[0].subject;
    let overkill = queue.damage(second, 99, &mut events).unwrap();
    assert_eq!((overkill.hp, overkill.is_completed, overkill.is_perfect), (0, true, false));
}

/// Test that completion shifts later slots up and appends a harder project
/// of the same subject.
#[test]
fn test_completion_replaces_same_subject() {
    let config = config();
    let (mut queue, mut rng, mut events) = populated(&config, 4);
    let before: Vec<_> = queue.projects().iter().map(|p| p.subject).collect();

    queue.damage(before[1], 15, &mut events).unwrap();
    let credits = drain(&mut queue, &mut rng, &mut events);

    let after: Vec<_> = queue.projects().iter().map(|p| p.subject).collect();
    assert_eq!(after, vec![before[0], before[2], before[3], before[1]]);
    assert_eq!(queue.projects()[3].max_hp, 30);
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].energy, 4);
    assert!(events
        .events()
        .iter()
        .any(|e| *e == GameEvent::ProjectCompleted { subject: before[1], perfect: true }));
}

/// Test that only one hit can be open at a time.
#[test]
fn test_single_flight_hit() {
    let config = GameConfig::default();
    let (mut queue, _, mut events) = populated(&config, 4);
    let subjects: Vec<_> = queue.projects().iter().map(|p| p.subject).collect();

    queue.damage(subjects[0], 1, &mut events).unwrap();
    assert_eq!(
        queue.damage(subjects[1], 1, &mut events),
        Err(GameError::HitInProgress { subject: subjects[0] })
    );
    assert_eq!(queue.projects()[1].hp, queue.projects()[1].max_hp);
}

/// Test that a partial hit leaves no reward behind.
#[test]
fn test_partial_hit_has_no_reward() {
    let config = config();
    let (mut queue, mut rng, mut events) = populated(&config, 4);
    let subject = queue.projects()[2].subject;

    queue.damage(subject, 5, &mut events).unwrap();
    assert!(drain(&mut queue, &mut rng, &mut events).is_empty());
    assert!(queue.flyer().is_none());
    assert_eq!(queue.projects()[2].hp, 15);
}

/// Test the invariant over many completions: four projects, one per
/// subject, max HP growing by five per spawn.
#[test]
fn test_many_completions_keep_one_per_subject() {
    let config = config();
    let (mut queue, mut rng, mut events) = populated(&config, 8);

    for round in 0..40usize {
        let target = queue.projects()[round % 4];
        queue.damage(target.subject, target.hp, &mut events).unwrap();
        drain(&mut queue, &mut rng, &mut events);
        assert!(queue.check_invariants().is_ok(), "round {round}");
    }
    assert_eq!(queue.next_max_hp(), 10 + 5 * 44);
}
