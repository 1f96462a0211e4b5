//! Simulation tuning - rates, thresholds and bounds.
//!
//! Every value has a default matching the shipped game, and every struct is
//! `#[serde(default)]`, so a config file only needs the keys it overrides:
//!
//! ```
//! use bitzy_core::config::SimConfig;
//!
//! let config = SimConfig::from_json_str(r#"{ "seed": 7, "tick": { "max_dt": 0.05 } }"#).unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.tick.max_dt, 0.05);
//! assert_eq!(config.tick.unfocused_dt, 0.001);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;

use crate::components::{PathComplexity, WalkBounds};
use crate::error::ConfigError;

/// Time normalization and autosave cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Largest step a single update may advance
    pub max_dt: f32,
    /// Step substituted while the host window is unfocused
    pub unfocused_dt: f32,
    /// Seconds of host time between autosave requests
    pub autosave_interval: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            max_dt: 0.1,
            unfocused_dt: 0.001,
            autosave_interval: 300.0,
        }
    }
}

/// Per-second need rates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedRates {
    pub hunger: f32,
    pub happiness: f32,
    /// Drain while awake
    pub energy_active: f32,
    /// Regeneration while sleeping
    pub energy_sleeping: f32,
    pub hygiene: f32,
    pub social: f32,
    /// Drain applied only while distressed
    pub loyalty: f32,
    /// Hunger or happiness below this counts as distress
    pub distress_threshold: f32,
}

impl Default for NeedRates {
    fn default() -> Self {
        Self {
            hunger: 1.0,
            happiness: 0.8,
            energy_active: 0.5,
            energy_sleeping: 2.0,
            hygiene: 0.6,
            social: 0.7,
            loyalty: 0.3,
            distress_threshold: 30.0,
        }
    }
}

/// State machine thresholds and walk tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Idle time before the idle draw is evaluated
    pub idle_evaluation_delay: f32,
    /// Energy below this forces sleep from any state
    pub forced_sleep_energy: f32,
    /// Energy below this makes the idle draw always choose sleep
    pub low_energy_sleep: f32,
    /// Sleep chance at zero energy
    pub sleep_chance_max: f32,
    /// Walk chance at full happiness
    pub walk_chance_max: f32,
    /// Energy above which a sleeping creature may wake
    pub wake_energy: f32,
    /// Wake chance per unit of time once above `wake_energy`
    pub wake_chance: f32,
    pub bath_cooldown: f32,
    pub play_cooldown: f32,
    /// Waypoint range for an unhappy creature
    pub base_complexity: PathComplexity,
    /// Extra waypoints at full happiness
    pub happiness_waypoint_bonus: u32,
    pub walk_speed_min: f32,
    /// Added to `walk_speed_min` at full energy
    pub walk_speed_energy_range: f32,
    /// Play amount per extra waypoint
    pub play_amount_per_waypoint: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            idle_evaluation_delay: 5.0,
            forced_sleep_energy: 15.0,
            low_energy_sleep: 20.0,
            sleep_chance_max: 0.4,
            walk_chance_max: 0.3,
            wake_energy: 80.0,
            wake_chance: 0.1,
            bath_cooldown: 3.0,
            play_cooldown: 4.0,
            base_complexity: PathComplexity::new(2, 5),
            happiness_waypoint_bonus: 3,
            walk_speed_min: 0.3,
            walk_speed_energy_range: 0.4,
            play_amount_per_waypoint: 5.0,
        }
    }
}

/// Random-walk path generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub bounds: WalkBounds,
    /// Largest heading change between consecutive segments
    pub max_turn_degrees: f32,
    pub step_min: f32,
    pub step_max: f32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            bounds: WalkBounds::default(),
            max_turn_degrees: 67.5,
            step_min: 0.5,
            step_max: 1.5,
        }
    }
}

impl PathConfig {
    pub fn max_turn_radians(&self) -> f32 {
        self.max_turn_degrees.to_radians()
    }
}

/// Leveling arithmetic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Experience needed to reach level 2
    pub initial_threshold: u32,
    /// Threshold multiplier per level (floored)
    pub threshold_growth: f32,
    pub points_per_level: u32,
    pub restore_hunger: f32,
    pub restore_energy: f32,
    pub restore_happiness: f32,
    /// Evolution points gained per point of experience
    pub evolution_rate: f32,
    /// Specialty gained per successful interaction
    pub specialty_drift: f32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            initial_threshold: 100,
            threshold_growth: 1.5,
            points_per_level: 5,
            restore_hunger: 20.0,
            restore_energy: 30.0,
            restore_happiness: 40.0,
            evolution_rate: 0.5,
            specialty_drift: 0.5,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tick: TickConfig,
    pub needs: NeedRates,
    pub behavior: BehaviorConfig,
    pub path: PathConfig,
    pub progression: ProgressionConfig,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(ConfigError::Invalid(problems));
        }
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Return the list of problems; empty means the config is usable
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let t = &self.tick;
        if !(t.max_dt.is_finite() && t.max_dt > 0.0) {
            errors.push(format!("tick.max_dt must be > 0 (got {})", t.max_dt));
        }
        if !(t.unfocused_dt.is_finite() && t.unfocused_dt >= 0.0) {
            errors.push(format!(
                "tick.unfocused_dt must be >= 0 (got {})",
                t.unfocused_dt
            ));
        }
        if !(t.autosave_interval.is_finite() && t.autosave_interval > 0.0) {
            errors.push(format!(
                "tick.autosave_interval must be > 0 (got {})",
                t.autosave_interval
            ));
        }

        let n = &self.needs;
        for (name, rate) in [
            ("hunger", n.hunger),
            ("happiness", n.happiness),
            ("energy_active", n.energy_active),
            ("energy_sleeping", n.energy_sleeping),
            ("hygiene", n.hygiene),
            ("social", n.social),
            ("loyalty", n.loyalty),
        ] {
            if !(rate.is_finite() && rate >= 0.0) {
                errors.push(format!("needs.{} must be >= 0 (got {})", name, rate));
            }
        }

        let b = &self.behavior;
        for (name, value) in [
            ("idle_evaluation_delay", b.idle_evaluation_delay),
            ("forced_sleep_energy", b.forced_sleep_energy),
            ("low_energy_sleep", b.low_energy_sleep),
            ("sleep_chance_max", b.sleep_chance_max),
            ("walk_chance_max", b.walk_chance_max),
            ("wake_energy", b.wake_energy),
            ("wake_chance", b.wake_chance),
            ("bath_cooldown", b.bath_cooldown),
            ("play_cooldown", b.play_cooldown),
            ("walk_speed_min", b.walk_speed_min),
            ("walk_speed_energy_range", b.walk_speed_energy_range),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(format!("behavior.{} must be >= 0 (got {})", name, value));
            }
        }
        if b.base_complexity.min > b.base_complexity.max {
            errors.push(format!(
                "behavior.base_complexity min {} exceeds max {}",
                b.base_complexity.min, b.base_complexity.max
            ));
        }
        if !(b.play_amount_per_waypoint.is_finite() && b.play_amount_per_waypoint > 0.0) {
            errors.push("behavior.play_amount_per_waypoint must be > 0".into());
        }

        let p = &self.path;
        if !(p.bounds.min_x <= p.bounds.max_x && p.bounds.min_z <= p.bounds.max_z) {
            errors.push("path.bounds min exceeds max".into());
        }
        if !(0.0..=180.0).contains(&p.max_turn_degrees) {
            errors.push(format!(
                "path.max_turn_degrees must be within 0-180 (got {})",
                p.max_turn_degrees
            ));
        }
        if !(p.step_min.is_finite() && p.step_max.is_finite())
            || !(p.step_min >= 0.0 && p.step_min <= p.step_max)
        {
            errors.push(format!(
                "path step range invalid: {}..{}",
                p.step_min, p.step_max
            ));
        }

        let g = &self.progression;
        if g.initial_threshold == 0 {
            errors.push("progression.initial_threshold must be >= 1".into());
        }
        if !(g.threshold_growth.is_finite() && g.threshold_growth >= 1.0) {
            errors.push(format!(
                "progression.threshold_growth must be >= 1 (got {})",
                g.threshold_growth
            ));
        }
        if !(g.evolution_rate.is_finite() && g.evolution_rate >= 0.0) {
            errors.push("progression.evolution_rate must be >= 0".into());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
        assert_eq!(config.seed, None);
        assert_eq!(config.behavior.forced_sleep_energy, 15.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            SimConfig::from_json_str(r#"{ "needs": { "hunger": 2.0 }, "seed": 99 }"#).unwrap();
        assert_eq!(config.needs.hunger, 2.0);
        assert_eq!(config.needs.happiness, 0.8);
        assert_eq!(config.progression.initial_threshold, 100);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = SimConfig::from_json_str(
            r#"{ "tick": { "max_dt": 0.0 }, "progression": { "threshold_growth": 0.5 } }"#,
        )
        .unwrap_err();
        match err {
            ConfigError::Invalid(problems) => assert_eq!(problems.len(), 2),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_settings_rejected() {
        let mut config = SimConfig::default();
        config.behavior.idle_evaluation_delay = f32::NAN;
        config.behavior.bath_cooldown = f32::NAN;
        config.behavior.walk_speed_min = f32::NAN;
        config.path.step_min = f32::NAN;

        let problems = config.validate();
        assert_eq!(problems.len(), 4, "{problems:?}");
        assert!(problems.iter().any(|p| p.contains("bath_cooldown")));
        assert!(problems.iter().any(|p| p.contains("step range")));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SimConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = SimConfig::default();
        config.path.bounds = WalkBounds::new(-5.0, 5.0, -3.0, 3.0);
        let json = config.to_json().unwrap();
        let back = SimConfig::from_json_str(&json).unwrap();
        assert_eq!(back.path.bounds, config.path.bounds);
    }
}
