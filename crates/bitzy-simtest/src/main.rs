//! Bitzy Headless Simulation Harness
//!
//! Drives the companion simulation through scripted scenarios and checks
//! the results. Runs entirely in-process with no renderer and no UI.
//!
//! Usage:
//!   cargo run -p bitzy-simtest
//!   cargo run -p bitzy-simtest -- --verbose
//!   cargo run -p bitzy-simtest -- --config path/to/config.json
//!   RUST_LOG=debug cargo run -p bitzy-simtest

use bitzy_core::prelude::*;
use bitzy_core::systems::{decay_needs, generate_path};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

// ── Shipped tuning (same JSON the game loads) ───────────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/sim_config.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    println!("=== Bitzy Simulation Harness ===\n");

    let mut results = Vec::new();

    // 0. Configuration
    let config = match load_config(&args, &mut results) {
        Some(c) => c,
        None => SimConfig::default(),
    };
    log::info!("Harness config seed {:?}", config.seed);

    // 1. Needs decay per state
    results.extend(validate_needs(&config, verbose));

    // 2. Interaction contracts
    results.extend(validate_interactions(&config, verbose));

    // 3. Behavior state machine
    results.extend(validate_behavior(&config, verbose));

    // 4. Path planner
    results.extend(validate_paths(&config, verbose));

    // 5. Progression arithmetic
    results.extend(validate_progression(&config, verbose));

    // 6. Snapshots and stores
    results.extend(validate_persistence(&config, verbose));

    // 7. Long soak with scripted care
    results.extend(soak(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn engine_with(config: &SimConfig, seed: u64) -> SimulationEngine {
    let mut config = config.clone();
    config.seed = Some(seed);
    SimulationEngine::with_config("Bitzy", config)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── 0. Configuration ────────────────────────────────────────────────────

fn load_config(args: &[String], results: &mut Vec<TestResult>) -> Option<SimConfig> {
    println!("--- Configuration ---");

    let shipped = SimConfig::from_json_str(CONFIG_JSON);
    results.push(TestResult {
        name: "config_shipped_parses".into(),
        passed: shipped.is_ok(),
        detail: match &shipped {
            Ok(c) => format!("seed {:?}, max_dt {}", c.seed, c.tick.max_dt),
            Err(e) => e.to_string(),
        },
    });

    // Shipped file must agree with the compiled defaults
    if let Ok(c) = &shipped {
        let mut a = serde_json::to_value(c).unwrap_or_default();
        let mut b = serde_json::to_value(SimConfig::default()).unwrap_or_default();
        a["seed"] = serde_json::Value::Null;
        b["seed"] = serde_json::Value::Null;
        results.push(TestResult {
            name: "config_matches_defaults".into(),
            passed: a == b,
            detail: "data/sim_config.json vs SimConfig::default()".into(),
        });
    }

    let override_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1));
    match override_path {
        Some(path) => match SimConfig::load(path) {
            Ok(c) => Some(c),
            Err(e) => {
                results.push(TestResult {
                    name: "config_override_loads".into(),
                    passed: false,
                    detail: format!("{}: {}", path, e),
                });
                None
            }
        },
        None => shipped.ok(),
    }
}

// ── 1. Needs ────────────────────────────────────────────────────────────

fn validate_needs(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Needs Decay ---");
    let mut results = Vec::new();
    let rates = &config.needs;

    // 10 seconds awake from full
    let mut needs = Needs::default();
    decay_needs(&mut needs, BehaviorState::Idle, 10.0, rates);
    results.push(TestResult {
        name: "needs_awake_decay".into(),
        passed: close(needs.hunger(), 100.0 - rates.hunger * 10.0)
            && close(needs.energy(), 100.0 - rates.energy_active * 10.0)
            && needs.loyalty() == 100.0,
        detail: format!(
            "hunger {:.1}, energy {:.1}, loyalty {:.1}",
            needs.hunger(),
            needs.energy(),
            needs.loyalty()
        ),
    });

    // Sleep regenerates
    let mut needs = Needs::default();
    needs.set(NeedType::Energy, 10.0);
    decay_needs(&mut needs, BehaviorState::Sleeping, 10.0, rates);
    results.push(TestResult {
        name: "needs_sleep_regenerates".into(),
        passed: close(needs.energy(), 10.0 + rates.energy_sleeping * 10.0),
        detail: format!("energy {:.1} after 10s asleep", needs.energy()),
    });

    // Loyalty only drains while distressed
    let mut needs = Needs::default();
    needs.set(NeedType::Happiness, rates.distress_threshold - 1.0);
    decay_needs(&mut needs, BehaviorState::Walking, 10.0, rates);
    results.push(TestResult {
        name: "needs_loyalty_distress".into(),
        passed: needs.loyalty() < 100.0,
        detail: format!("loyalty {:.1}", needs.loyalty()),
    });

    // A full day never leaves [0, 100]
    let mut needs = Needs::default();
    let mut valid = true;
    for state in BehaviorState::ALL.iter().cycle().take(86_400) {
        decay_needs(&mut needs, *state, 1.0, rates);
        valid &= needs.is_valid();
    }
    results.push(TestResult {
        name: "needs_bounded_24h".into(),
        passed: valid,
        detail: format!("most urgent after 24h: {:?}", needs.most_urgent()),
    });

    if verbose {
        for need in NeedType::ALL {
            println!("    {:9}: {:6.2}", need.name(), needs.get(need));
        }
    }

    results
}

// ── 2. Interactions ─────────────────────────────────────────────────────

fn validate_interactions(config: &SimConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Interactions ---");
    let mut results = Vec::new();

    // Full creature refuses food, hungry creature eats
    let mut engine = engine_with(config, 1);
    let refused = engine.feed(20.0);
    engine.creature_mut().needs_mut().set(NeedType::Hunger, 50.0);
    let accepted = engine.feed(20.0);
    results.push(TestResult {
        name: "feed_scenario".into(),
        passed: refused == Err(Refusal::NotHungry)
            && accepted.is_ok()
            && close(engine.creature().needs().hunger(), 70.0),
        detail: format!(
            "{:?} then {:?}, hunger {:.1}",
            refused,
            accepted,
            engine.creature().needs().hunger()
        ),
    });

    // Tired creature rests
    let mut engine = engine_with(config, 2);
    engine.creature_mut().needs_mut().set(NeedType::Energy, 10.0);
    let rested = engine.rest(30.0);
    results.push(TestResult {
        name: "rest_scenario".into(),
        passed: rested.is_ok()
            && close(engine.creature().needs().energy(), 40.0)
            && engine.creature().state() == BehaviorState::Sleeping,
        detail: format!(
            "energy {:.1}, state {:?}",
            engine.creature().needs().energy(),
            engine.creature().state()
        ),
    });

    // Refusals never mutate
    let mut engine = engine_with(config, 3);
    engine.creature_mut().needs_mut().set(NeedType::Energy, 10.0);
    let before = engine.creature().clone();
    let outcomes = [
        engine.feed(10.0),
        engine.play(10.0),
        engine.clean(10.0),
        engine.socialize(10.0),
        engine.feed(-1.0),
    ];
    results.push(TestResult {
        name: "refusals_do_not_mutate".into(),
        passed: outcomes.iter().all(|o| o.is_err()) && engine.creature() == &before,
        detail: format!("{:?}", outcomes),
    });

    // Play starts a walk with a longer path
    let mut engine = engine_with(config, 4);
    let played = engine.play(15.0);
    let len = engine.creature().path().waypoints().len();
    results.push(TestResult {
        name: "play_starts_walk".into(),
        passed: played.is_ok() && engine.creature().state() == BehaviorState::Walking && len >= 5,
        detail: format!("{} waypoints", len),
    });

    results
}

// ── 3. Behavior ─────────────────────────────────────────────────────────

fn validate_behavior(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Behavior State Machine ---");
    let mut results = Vec::new();

    // Forced sleep from every state the player can cause
    let mut all_slept = true;
    for setup in 0..4 {
        let mut engine = engine_with(config, 10 + setup);
        engine.creature_mut().needs_mut().set(NeedType::Hygiene, 10.0);
        let _ = match setup {
            1 => engine.play(10.0),
            2 => engine.clean(10.0),
            3 => engine.socialize(10.0),
            _ => Ok(()),
        };
        engine.creature_mut().needs_mut().set(NeedType::Energy, 5.0);
        engine.update(0.016, true);
        all_slept &= engine.creature().state() == BehaviorState::Sleeping;
    }
    results.push(TestResult {
        name: "behavior_forced_sleep".into(),
        passed: all_slept,
        detail: "energy 5 → sleeping from idle/walking/bathing/playing".into(),
    });

    // Bath reverts after its cooldown
    let mut engine = engine_with(config, 20);
    engine.creature_mut().needs_mut().set(NeedType::Hygiene, 10.0);
    let _ = engine.clean(20.0);
    let mut reverted_at = None;
    for step in 1..=100 {
        engine.update(0.1, true);
        if engine.creature().state() == BehaviorState::Idle {
            reverted_at = Some(step as f32 * 0.1);
            break;
        }
    }
    results.push(TestResult {
        name: "behavior_bath_cooldown".into(),
        passed: reverted_at.map_or(false, |t| (t - config.behavior.bath_cooldown).abs() < 0.15),
        detail: format!("reverted after {:?}s", reverted_at),
    });

    // Idle draw distribution over many creatures at full needs
    let mut counts = [0u32; 5];
    for seed in 0..2000 {
        let mut engine = engine_with(config, 1000 + seed);
        let steps = (config.behavior.idle_evaluation_delay / 0.1).ceil() as usize + 1;
        for _ in 0..steps {
            let needs = engine.creature_mut().needs_mut();
            needs.set(NeedType::Energy, 100.0);
            needs.set(NeedType::Happiness, 100.0);
            engine.update(0.1, true);
        }
        let idx = BehaviorState::ALL
            .iter()
            .position(|s| *s == engine.creature().state())
            .unwrap_or(0);
        counts[idx] += 1;
    }
    let walk_rate = counts[1] as f32 / 2000.0;
    results.push(TestResult {
        name: "behavior_idle_walk_rate".into(),
        passed: (walk_rate - config.behavior.walk_chance_max).abs() < 0.05,
        detail: format!(
            "walk rate {:.3} (expected ~{})",
            walk_rate, config.behavior.walk_chance_max
        ),
    });

    if verbose {
        for (state, count) in BehaviorState::ALL.iter().zip(counts) {
            println!("    {:9}: {}", state.animation_name(), count);
        }
    }

    results
}

// ── 4. Path Planner ─────────────────────────────────────────────────────

fn validate_paths(config: &SimConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Path Planner ---");
    let mut results = Vec::new();
    let bounds = config.path.bounds;

    let mut escaped = 0;
    let mut bad_count = 0;
    let mut total = 0;
    for seed in 0..500u64 {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let path = generate_path(Vec2::ZERO, PathComplexity::new(2, 8), &config.path, &mut rng);
        total += path.len();
        if !(2..=8).contains(&path.len()) {
            bad_count += 1;
        }
        escaped += path.iter().filter(|wp| !bounds.contains(wp)).count();
    }
    results.push(TestResult {
        name: "path_bounds".into(),
        passed: escaped == 0 && bad_count == 0,
        detail: format!(
            "{} waypoints over 500 paths, {} out of bounds, {} bad counts",
            total, escaped, bad_count
        ),
    });

    // Same seed, same path
    let a = generate_path(
        Vec2::ZERO,
        PathComplexity::default(),
        &config.path,
        &mut Xoshiro256PlusPlus::seed_from_u64(99),
    );
    let b = generate_path(
        Vec2::ZERO,
        PathComplexity::default(),
        &config.path,
        &mut Xoshiro256PlusPlus::seed_from_u64(99),
    );
    results.push(TestResult {
        name: "path_deterministic".into(),
        passed: a == b,
        detail: format!("{} waypoints", a.len()),
    });

    // A walk ends back in idle, inside the bounds
    let mut engine = engine_with(config, 30);
    let _ = engine.play(10.0);
    let mut steps = 0;
    while engine.creature().state() == BehaviorState::Walking && steps < 10_000 {
        engine.update(0.05, true);
        steps += 1;
    }
    let pos = engine.creature().position();
    results.push(TestResult {
        name: "path_walk_completes".into(),
        passed: engine.creature().state() == BehaviorState::Idle && engine.creature().path().is_empty(),
        detail: format!("{} steps, ended at ({:.2}, {:.2})", steps, pos.x, pos.z),
    });

    results
}

// ── 5. Progression ──────────────────────────────────────────────────────

fn validate_progression(config: &SimConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Progression ---");
    let mut results = Vec::new();

    // Exactly one threshold's worth levels once
    let mut engine = engine_with(config, 40);
    let first = config.progression.initial_threshold;
    let gained = engine.gain_experience(first as f32);
    let p = *engine.creature().progression();
    results.push(TestResult {
        name: "progression_single_level".into(),
        passed: gained == 1
            && p.level == 2
            && p.stat_points == config.progression.points_per_level
            && p.required_exp_for_next_level
                == (first as f32 * config.progression.threshold_growth).floor() as u32,
        detail: format!(
            "level {}, points {}, next {}",
            p.level, p.stat_points, p.required_exp_for_next_level
        ),
    });

    // Overflow cascades and keeps the remainder
    let mut engine = engine_with(config, 41);
    engine.gain_experience(1000.0);
    let level_ups = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SimEvent::LevelUp { .. }))
        .count();
    let p = *engine.creature().progression();
    results.push(TestResult {
        name: "progression_cascade".into(),
        passed: level_ups as u32 == p.level - 1
            && p.experience < p.required_exp_for_next_level as f32,
        detail: format!(
            "{} level-ups, level {}, {:.1}/{} exp",
            level_ups, p.level, p.experience, p.required_exp_for_next_level
        ),
    });

    // Stat points: spend, overspend, unknown
    let spent = engine.assign_stat_points("agility", 2);
    let overspent = engine.assign_stat_points("agility", 10_000);
    let unknown = engine.assign_stat_points("charm", 1);
    results.push(TestResult {
        name: "progression_stat_points".into(),
        passed: spent.is_ok() && overspent.is_err() && unknown.is_err(),
        detail: format!(
            "agility {}, {} points left",
            engine.creature().attributes().agility,
            engine.creature().progression().stat_points
        ),
    });

    // Dominant specialty follows the care given
    let mut engine = engine_with(config, 42);
    for _ in 0..10 {
        engine.creature_mut().needs_mut().set(NeedType::Hygiene, 10.0);
        let _ = engine.clean(5.0);
    }
    let dominant = engine.creature().progression().specialty.dominant();
    results.push(TestResult {
        name: "progression_specialty_drift".into(),
        passed: dominant == SpecialtyAxis::Security,
        detail: format!("dominant {}", dominant.name()),
    });

    results
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(config: &SimConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut engine = engine_with(config, 50);
    engine.gain_experience(230.0);
    for _ in 0..300 {
        engine.update(0.1, true);
    }
    let snapshot = engine.snapshot();

    // JSON and binary both round-trip
    let json_ok = snapshot
        .to_json()
        .and_then(|j| SaveData::from_json(&j))
        .map_or(false, |s| s == snapshot);
    let bin_ok = snapshot
        .to_bytes()
        .and_then(|b| SaveData::from_bytes(&b))
        .map_or(false, |s| s == snapshot);
    results.push(TestResult {
        name: "persistence_roundtrip".into(),
        passed: json_ok && bin_ok,
        detail: format!("json={} bincode={}", json_ok, bin_ok),
    });

    // Future version is rejected and nothing changes
    let mut value = serde_json::to_value(&snapshot).unwrap_or_default();
    value["version"] = serde_json::json!(SAVE_VERSION + 1);
    let store = MemoryStore::with_raw(value.to_string());
    let mut target = engine_with(config, 51);
    let before = target.creature().clone();
    let outcome = target.load_from(&store);
    results.push(TestResult {
        name: "persistence_version_mismatch".into(),
        passed: matches!(outcome, Err(SaveError::VersionMismatch { .. }))
            && target.creature() == &before,
        detail: match outcome {
            Ok(loaded) => format!("unexpectedly loaded={}", loaded),
            Err(e) => e.to_string(),
        },
    });

    // File store through the engine
    let path = std::env::temp_dir()
        .join(format!("bitzy-simtest-{}", std::process::id()))
        .join("save.json");
    let mut store = FileStore::new(&path);
    let saved = engine.save_to(&mut store);
    let mut restored = engine_with(config, 52);
    let loaded = restored.load_from(&store);
    let same = restored.creature().progression() == engine.creature().progression()
        && restored.creature().needs() == engine.creature().needs();
    let deleted = store.delete();
    results.push(TestResult {
        name: "persistence_file_store".into(),
        passed: saved.is_ok() && matches!(loaded, Ok(true)) && same && matches!(deleted, Ok(true)),
        detail: format!("{}", path.display()),
    });

    results
}

// ── 7. Soak ─────────────────────────────────────────────────────────────

fn soak(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Soak (1 simulated hour at 60 FPS) ---");
    let mut results = Vec::new();

    let mut engine = engine_with(config, 60);
    let mut invalid_frames = 0;
    let mut transitions = 0;
    let mut autosaves = 0;
    let mut level_ups = 0;

    for frame in 0..216_000u32 {
        // A player checking in every 30 seconds
        if frame % 1800 == 0 {
            let needs = *engine.creature().needs();
            let (urgent, _) = needs.most_urgent();
            let _ = match urgent {
                NeedType::Hunger => engine.feed(30.0),
                NeedType::Energy => engine.rest(40.0),
                NeedType::Hygiene => engine.clean(30.0),
                NeedType::Happiness => engine.play(20.0),
                NeedType::Social | NeedType::Loyalty => engine.socialize(20.0),
            };
        }
        // Background the window for a while every ten minutes
        let focused = frame % 36_000 >= 600;
        engine.update(1.0 / 60.0, focused);

        let c = engine.creature();
        if !c.needs().is_valid() || !c.progression().is_valid() {
            invalid_frames += 1;
        }
        for event in engine.drain_events() {
            match event {
                SimEvent::StateChanged { .. } => transitions += 1,
                SimEvent::AutosaveDue => autosaves += 1,
                SimEvent::LevelUp { .. } => level_ups += 1,
            }
        }
    }

    results.push(TestResult {
        name: "soak_invariants".into(),
        passed: invalid_frames == 0,
        detail: format!("{} invalid frames", invalid_frames),
    });
    results.push(TestResult {
        name: "soak_autosave".into(),
        passed: autosaves == 12,
        detail: format!("{} autosave requests in 3600s", autosaves),
    });
    results.push(TestResult {
        name: "soak_alive".into(),
        passed: transitions > 10,
        detail: format!("{} transitions, {} level-ups", transitions, level_ups),
    });

    if verbose {
        let c = engine.creature();
        println!(
            "    final: {:?}, level {}, glitch {:.1}",
            c.state(),
            c.progression().level,
            engine.glitch_intensity()
        );
    }

    results
}
