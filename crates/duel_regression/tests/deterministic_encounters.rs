use duel_regression::{random_encounter, replay, sample_encounter_trace, DEFAULT_SEED};

#[test]
fn encounters_are_deterministic() {
    let baseline = random_encounter(42, 32);
    let repeat = random_encounter(42, 32);
    assert_eq!(baseline, repeat, "same seed should match");

    let different = random_encounter(7, 32);
    assert_ne!(baseline.steps, different.steps, "different seeds should diverge");
}

#[test]
fn replays_are_deterministic() {
    let encounter = random_encounter(DEFAULT_SEED, 32);
    assert_eq!(replay(&encounter), replay(&encounter));
    assert_eq!(
        sample_encounter_trace(DEFAULT_SEED),
        sample_encounter_trace(DEFAULT_SEED)
    );
}

#[test]
fn health_only_moves_on_reported_steps() {
    let encounter = random_encounter(DEFAULT_SEED, 64);
    let mut previous = encounter.starting_health;
    for entry in replay(&encounter) {
        match entry.reported {
            Some(reported) => assert_eq!(reported, entry.health),
            None => assert_eq!(previous, entry.health, "step {}", entry.step),
        }
        previous = entry.health;
    }
}
