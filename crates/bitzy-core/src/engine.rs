//! Simulation engine - main entry point for running the simulation

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::components::*;
use crate::config::{SimConfig, TickConfig};
use crate::error::{Refusal, SaveError, StatError};
use crate::events::SimEvent;
use crate::persistence::{SaveData, SaveStore};
use crate::systems::*;

/// Main simulation engine. Owns the creature and is the only writer to it:
/// every mutation goes through `&mut self`.
pub struct SimulationEngine {
    creature: Creature,
    config: SimConfig,
    rng: Xoshiro256PlusPlus,
    /// Events queued since the last drain
    events: Vec<SimEvent>,
    /// Simulated seconds since start (after clamping)
    sim_time: f64,

    paused: bool,
    autosave_enabled: bool,
    /// Raw host seconds since the last autosave request
    since_autosave: f64,
    show_path: bool,
}

impl SimulationEngine {
    /// Create a simulation with default tuning
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, SimConfig::default())
    }

    /// Create a simulation with the given tuning. A configured seed makes
    /// the run reproducible; otherwise the RNG is seeded from OS entropy.
    pub fn with_config(name: impl Into<String>, config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        let creature = Creature::new(name)
            .with_progression(Progression::new(config.progression.initial_threshold));

        log::info!(
            "Simulation started for {} (seed {:?})",
            creature.name(),
            config.seed
        );

        Self {
            creature,
            config,
            rng,
            events: Vec::new(),
            sim_time: 0.0,
            paused: false,
            autosave_enabled: true,
            since_autosave: 0.0,
            show_path: false,
        }
    }

    /// Advance the simulation by one host frame.
    ///
    /// `raw_delta` is the unprocessed elapsed time; `focused` is whether the
    /// host window has focus. Needs decay first, then behavior runs on the
    /// updated needs.
    pub fn update(&mut self, raw_delta: f32, focused: bool) {
        if self.paused {
            return;
        }

        self.track_autosave(raw_delta);

        let dt = normalize_delta(raw_delta, focused, &self.config.tick);
        self.sim_time += dt as f64;

        decay_needs(
            &mut self.creature.needs,
            self.creature.state,
            dt,
            &self.config.needs,
        );
        update_behavior(
            &mut self.creature,
            dt,
            &self.config,
            &mut self.rng,
            &mut self.events,
        );
    }

    fn track_autosave(&mut self, raw_delta: f32) {
        if !self.autosave_enabled || !raw_delta.is_finite() || raw_delta <= 0.0 {
            return;
        }
        self.since_autosave += raw_delta as f64;
        if self.since_autosave >= self.config.tick.autosave_interval {
            self.since_autosave = 0.0;
            self.events.push(SimEvent::AutosaveDue);
        }
    }

    // Interactions

    pub fn feed(&mut self, amount: f32) -> Result<(), Refusal> {
        feed(&mut self.creature, amount, &self.config, &mut self.events)
    }

    pub fn play(&mut self, amount: f32) -> Result<(), Refusal> {
        play(
            &mut self.creature,
            amount,
            &self.config,
            &mut self.rng,
            &mut self.events,
        )
    }

    pub fn rest(&mut self, amount: f32) -> Result<(), Refusal> {
        rest(&mut self.creature, amount, &self.config, &mut self.events)
    }

    pub fn clean(&mut self, amount: f32) -> Result<(), Refusal> {
        clean(&mut self.creature, amount, &self.config, &mut self.events)
    }

    pub fn socialize(&mut self, amount: f32) -> Result<(), Refusal> {
        socialize(&mut self.creature, amount, &self.config, &mut self.events)
    }

    /// Grant experience directly; returns the number of levels gained
    pub fn gain_experience(&mut self, amount: f32) -> u32 {
        gain_experience(
            &mut self.creature,
            amount,
            &self.config.progression,
            &mut self.events,
        )
    }

    /// Spend stat points on a stat given by name, e.g. from a UI button
    pub fn assign_stat_points(&mut self, stat: &str, points: i64) -> Result<(), StatError> {
        assign_stat_points_by_name(&mut self.creature, stat, points)
    }

    pub fn assign_stat(&mut self, stat: StatType, points: u32) -> Result<(), StatError> {
        assign_stat_points(&mut self.creature, stat, points)
    }

    pub fn train_specialty(&mut self, axis: SpecialtyAxis, amount: f32) {
        train_specialty(&mut self.creature, axis, amount);
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // Game controls

    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("Simulation paused");
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::info!("Simulation resumed");
        }
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip autosave on or off; returns the new setting
    pub fn toggle_autosave(&mut self) -> bool {
        self.autosave_enabled = !self.autosave_enabled;
        self.since_autosave = 0.0;
        self.autosave_enabled
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave_enabled
    }

    /// Flip the debug path overlay; returns the new setting
    pub fn toggle_path_visualization(&mut self) -> bool {
        self.show_path = !self.show_path;
        self.show_path
    }

    /// The path to draw, if the overlay is on
    pub fn visible_path(&self) -> Option<&Path> {
        self.show_path.then_some(&self.creature.path)
    }

    // Queries

    pub fn creature(&self) -> &Creature {
        &self.creature
    }

    /// Mutable access for debug tooling. Need writes are still clamped.
    /// Hosts change the creature through the interaction commands instead.
    #[doc(hidden)]
    pub fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get current simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn is_distressed(&self) -> bool {
        self.creature
            .is_distressed(self.config.needs.distress_threshold)
    }

    pub fn glitch_intensity(&self) -> f32 {
        self.creature
            .glitch_intensity(self.config.needs.distress_threshold)
    }

    // Persistence

    /// Snapshot the creature for saving
    pub fn snapshot(&self) -> SaveData {
        SaveData::capture(&self.creature)
    }

    /// Replace the creature's durable state with a snapshot. The snapshot is
    /// validated first; on error nothing changes.
    pub fn restore(&mut self, data: SaveData) -> Result<(), SaveError> {
        if let Err(e) = data.validate() {
            log::warn!("Rejected snapshot: {}", e);
            return Err(e);
        }

        let behavior = &self.config.behavior;
        let creature = &mut self.creature;
        creature.name = data.name;
        creature.needs = data.needs;
        creature.attributes = data.attributes;
        creature.progression = data.progression;
        creature.state = data.behavior_state;
        creature.timers = StateTimers::for_state(state_cooldown(data.behavior_state, behavior));
        creature.path.clear();

        let (complexity, speed) = walk_parameters(&creature.needs, behavior);
        creature.path_complexity = complexity;
        creature.walk_speed = speed;

        log::info!(
            "Restored {} at level {}",
            creature.name,
            creature.progression.level
        );
        Ok(())
    }

    pub fn save_to(&self, store: &mut impl SaveStore) -> Result<(), SaveError> {
        store.save(&self.snapshot())?;
        log::debug!("Saved {}", self.creature.name);
        Ok(())
    }

    /// Restore from a store. `Ok(false)` means there was nothing to load.
    pub fn load_from(&mut self, store: &impl SaveStore) -> Result<bool, SaveError> {
        match store.load() {
            Ok(Some(data)) => self.restore(data).map(|_| true),
            Ok(None) => Ok(false),
            Err(e) => {
                log::warn!("Failed to load save: {}", e);
                Err(e)
            }
        }
    }
}

/// Turn a raw host delta into a simulation step. Unfocused frames advance
/// by a tiny fixed step; bad input advances by nothing; everything else is
/// capped at `max_dt`.
pub fn normalize_delta(raw_delta: f32, focused: bool, config: &TickConfig) -> f32 {
    if !focused {
        return config.unfocused_dt;
    }
    if !raw_delta.is_finite() || raw_delta < 0.0 {
        return 0.0;
    }
    raw_delta.min(config.max_dt)
}
