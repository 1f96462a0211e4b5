//! Behavior system - the creature's state machine.
//!
//! `Idle` is the hub: it may drift into `Walking` or `Sleeping` on its own,
//! and every other state returns to it. Low energy overrides everything and
//! puts the creature to sleep.

use rand::Rng;

use crate::components::{
    BehaviorState, Creature, NeedType, Needs, Path, PathComplexity, StateTimers,
};
use crate::config::{BehaviorConfig, SimConfig};
use crate::events::SimEvent;
use crate::systems::movement::follow_path;
use crate::systems::wandering::generate_path;

/// Cooldown a state starts with, for states that revert on their own
pub fn state_cooldown(state: BehaviorState, config: &BehaviorConfig) -> Option<f32> {
    match state {
        BehaviorState::Bathing => Some(config.bath_cooldown),
        BehaviorState::Playing => Some(config.play_cooldown),
        _ => None,
    }
}

/// Switch to `to`. Re-entering the current state is a no-op and returns
/// false; a real transition resets the state timers, drops any path the new
/// state has no use for, and queues a `StateChanged` event.
pub fn transition(
    creature: &mut Creature,
    to: BehaviorState,
    config: &BehaviorConfig,
    events: &mut Vec<SimEvent>,
) -> bool {
    let from = creature.state;
    if from == to {
        return false;
    }

    creature.state = to;
    creature.timers = StateTimers::for_state(state_cooldown(to, config));
    if to != BehaviorState::Walking {
        creature.path.clear();
    }

    log::debug!("{}: {:?} -> {:?}", creature.name, from, to);
    events.push(SimEvent::StateChanged { from, to });
    true
}

/// Waypoint range and walk speed for the current needs. Happier creatures
/// wander further, rested ones walk faster.
pub fn walk_parameters(needs: &Needs, config: &BehaviorConfig) -> (PathComplexity, f32) {
    let happiness = needs.get(NeedType::Happiness) / 100.0;
    let energy = needs.get(NeedType::Energy) / 100.0;

    let bonus = (happiness * config.happiness_waypoint_bonus as f32).floor() as u32;
    let complexity = config.base_complexity.with_extra(bonus);
    let speed = config.walk_speed_min + energy * config.walk_speed_energy_range;
    (complexity, speed)
}

/// Start walking along a freshly generated path. `extra_waypoints` widens
/// the waypoint range on top of what the needs allow. A new path is
/// generated even if the creature is already walking.
pub fn start_walk(
    creature: &mut Creature,
    extra_waypoints: u32,
    config: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<SimEvent>,
) {
    let (complexity, speed) = walk_parameters(&creature.needs, &config.behavior);
    let complexity = complexity.with_extra(extra_waypoints);

    creature.path_complexity = complexity;
    creature.walk_speed = speed;

    transition(creature, BehaviorState::Walking, &config.behavior, events);
    let waypoints = generate_path(creature.position, complexity, &config.path, rng);
    log::trace!(
        "{} walking {} waypoints at {:.2}/s",
        creature.name,
        waypoints.len(),
        speed
    );
    creature.path = Path::new(waypoints);
}

/// Advance the state machine by `delta_seconds` of simulated time
pub fn update_behavior(
    creature: &mut Creature,
    delta_seconds: f32,
    config: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<SimEvent>,
) {
    let behavior = &config.behavior;
    let energy = creature.needs.get(NeedType::Energy);

    if energy < behavior.forced_sleep_energy {
        transition(creature, BehaviorState::Sleeping, behavior, events);
        return;
    }

    match creature.state {
        BehaviorState::Idle => {
            creature.timers.idle_elapsed += delta_seconds;
            if creature.timers.idle_elapsed < behavior.idle_evaluation_delay {
                return;
            }
            creature.timers.idle_elapsed = 0.0;

            let happiness = creature.needs.get(NeedType::Happiness);
            let sleep_threshold = behavior.sleep_chance_max * (1.0 - energy / 100.0);
            let walk_threshold = behavior.walk_chance_max * (happiness / 100.0);

            let r: f32 = rng.gen();
            if r < sleep_threshold || energy < behavior.low_energy_sleep {
                transition(creature, BehaviorState::Sleeping, behavior, events);
            } else if r < sleep_threshold + walk_threshold {
                start_walk(creature, 0, config, rng, events);
            }
        }
        BehaviorState::Walking => {
            if follow_path(creature, delta_seconds) {
                transition(creature, BehaviorState::Idle, behavior, events);
            }
        }
        BehaviorState::Sleeping => {
            if energy > behavior.wake_energy && rng.gen::<f32>() < behavior.wake_chance * delta_seconds
            {
                transition(creature, BehaviorState::Idle, behavior, events);
            }
        }
        BehaviorState::Bathing | BehaviorState::Playing => {
            if creature.timers.tick_cooldown(delta_seconds) {
                transition(creature, BehaviorState::Idle, behavior, events);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec2;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(7)
    }

    #[test]
    fn test_self_transition_is_noop() {
        let mut c = Creature::new("Bitzy");
        let config = BehaviorConfig::default();
        let mut events = Vec::new();

        assert!(transition(&mut c, BehaviorState::Bathing, &config, &mut events));
        c.timers.tick_cooldown(2.0);
        assert!(!transition(&mut c, BehaviorState::Bathing, &config, &mut events));

        // Timer not reset by the repeated entry
        assert_eq!(c.timers().cooldown_remaining, Some(1.0));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_transition_sets_cooldown_and_event() {
        let mut c = Creature::new("Bitzy");
        let mut events = Vec::new();
        transition(&mut c, BehaviorState::Playing, &BehaviorConfig::default(), &mut events);
        assert_eq!(c.state(), BehaviorState::Playing);
        assert_eq!(c.timers().cooldown_remaining, Some(4.0));
        assert_eq!(
            events,
            vec![SimEvent::StateChanged {
                from: BehaviorState::Idle,
                to: BehaviorState::Playing
            }]
        );
    }

    #[test]
    fn test_forced_sleep_from_any_state() {
        let config = SimConfig::default();
        for state in BehaviorState::ALL {
            let mut c = Creature::new("Bitzy");
            c.state = state;
            c.needs.set(NeedType::Energy, 5.0);
            update_behavior(&mut c, 0.1, &config, &mut rng(), &mut Vec::new());
            assert_eq!(c.state(), BehaviorState::Sleeping, "from {state:?}");
            assert!(c.path().is_empty());
        }
    }

    #[test]
    fn test_idle_waits_before_deciding() {
        let config = SimConfig::default();
        let mut c = Creature::new("Bitzy");
        c.needs.set(NeedType::Energy, 18.0);
        let mut events = Vec::new();

        for _ in 0..9 {
            update_behavior(&mut c, 0.5, &config, &mut rng(), &mut events);
        }
        assert_eq!(c.state(), BehaviorState::Idle);

        // Past the delay, low energy always chooses sleep
        update_behavior(&mut c, 0.5, &config, &mut rng(), &mut events);
        assert_eq!(c.state(), BehaviorState::Sleeping);
    }

    #[test]
    fn test_content_creature_mostly_stays_idle() {
        // Full energy: sleep threshold 0, walk threshold 0.3
        let config = SimConfig::default();
        let mut r = rng();
        let mut walks = 0;
        for _ in 0..200 {
            let mut c = Creature::new("Bitzy");
            c.timers.idle_elapsed = 5.0;
            update_behavior(&mut c, 0.0, &config, &mut r, &mut Vec::new());
            match c.state() {
                BehaviorState::Walking => walks += 1,
                BehaviorState::Idle => assert_eq!(c.timers().idle_elapsed, 0.0),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(walks > 20 && walks < 110, "walks={walks}");
    }

    #[test]
    fn test_walk_parameters_scale_with_needs() {
        let config = BehaviorConfig::default();
        let full = Needs::default();
        let (complexity, speed) = walk_parameters(&full, &config);
        assert_eq!(complexity, PathComplexity::new(5, 8));
        assert!((speed - 0.7).abs() < 1e-5);

        let mut low = Needs::default();
        low.set(NeedType::Happiness, 20.0);
        low.set(NeedType::Energy, 0.0);
        let (complexity, speed) = walk_parameters(&low, &config);
        assert_eq!(complexity, PathComplexity::new(2, 5));
        assert!((speed - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_walk_finishes_back_to_idle() {
        let config = SimConfig::default();
        let mut c = Creature::new("Bitzy");
        let mut r = rng();
        let mut events = Vec::new();
        start_walk(&mut c, 0, &config, &mut r, &mut events);
        assert_eq!(c.state(), BehaviorState::Walking);
        assert!(!c.path().is_empty());

        // Bounded box and bounded waypoint count: 100s is plenty
        for _ in 0..1000 {
            update_behavior(&mut c, 0.1, &config, &mut r, &mut events);
            if c.state() != BehaviorState::Walking {
                break;
            }
        }
        assert_eq!(c.state(), BehaviorState::Idle);
        assert!(c.path().is_empty());
        assert_ne!(c.position(), Vec2::ZERO);
    }

    #[test]
    fn test_cooldown_reverts_to_idle() {
        let config = SimConfig::default();
        let mut c = Creature::new("Bitzy");
        let mut events = Vec::new();
        transition(&mut c, BehaviorState::Bathing, &config.behavior, &mut events);

        for _ in 0..29 {
            update_behavior(&mut c, 0.1, &config, &mut rng(), &mut events);
        }
        assert_eq!(c.state(), BehaviorState::Bathing);
        update_behavior(&mut c, 0.2, &config, &mut rng(), &mut events);
        assert_eq!(c.state(), BehaviorState::Idle);
    }

    #[test]
    fn test_sleeping_stays_asleep_until_rested() {
        let config = SimConfig::default();
        let mut c = Creature::new("Bitzy");
        c.state = BehaviorState::Sleeping;
        c.needs.set(NeedType::Energy, 50.0);
        let mut r = rng();
        for _ in 0..1000 {
            update_behavior(&mut c, 0.1, &config, &mut r, &mut Vec::new());
        }
        assert_eq!(c.state(), BehaviorState::Sleeping);
    }

    #[test]
    fn test_rested_creature_eventually_wakes() {
        let config = SimConfig::default();
        let mut c = Creature::new("Bitzy");
        c.state = BehaviorState::Sleeping;
        let mut r = rng();
        // Wake chance per 1s step is 0.1
        for _ in 0..500 {
            update_behavior(&mut c, 1.0, &config, &mut r, &mut Vec::new());
            if c.state() == BehaviorState::Idle {
                return;
            }
        }
        panic!("never woke up");
    }
}
