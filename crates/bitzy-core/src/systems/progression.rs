//! Progression system - experience, level-ups, stat points and specialty drift

use crate::components::{Creature, NeedType, SpecialtyAxis, StatType};
use crate::config::ProgressionConfig;
use crate::error::StatError;
use crate::events::SimEvent;

/// Most levels a single experience gain can grant. Anything beyond stays
/// banked as experience and is spent by later gains.
pub const MAX_LEVELS_PER_GAIN: u32 = 100;

/// Grant experience, scaled by adaptability. Evolution points grow at
/// `evolution_rate` of the scaled amount.
///
/// Overflow cascades: a gain that crosses several thresholds levels up once
/// per threshold, up to [`MAX_LEVELS_PER_GAIN`], keeping whatever is left
/// over. Returns the number of levels gained.
pub fn gain_experience(
    creature: &mut Creature,
    amount: f32,
    config: &ProgressionConfig,
    events: &mut Vec<SimEvent>,
) -> u32 {
    if !amount.is_finite() || amount < 0.0 {
        log::warn!("Ignoring invalid experience gain {}", amount);
        return 0;
    }

    let scaled = amount * creature.attributes.experience_multiplier();
    let experience = creature.progression.experience + scaled;
    let evolution_points = creature.progression.evolution_points + scaled * config.evolution_rate;
    if !(experience.is_finite() && evolution_points.is_finite()) {
        log::warn!("Ignoring experience gain {} that would overflow", amount);
        return 0;
    }
    creature.progression.experience = experience;
    creature.progression.evolution_points = evolution_points;

    let mut gained = 0;
    while gained < MAX_LEVELS_PER_GAIN
        && creature.progression.experience
            >= creature.progression.required_exp_for_next_level as f32
    {
        level_up(creature, config, events);
        gained += 1;
    }
    gained
}

/// Advance one level, spending the current threshold's worth of experience
pub fn level_up(creature: &mut Creature, config: &ProgressionConfig, events: &mut Vec<SimEvent>) {
    let progression = &mut creature.progression;
    let previous = progression.required_exp_for_next_level;

    progression.level = progression.level.saturating_add(1);
    progression.experience = (progression.experience - previous as f32).max(0.0);
    progression.required_exp_for_next_level = next_threshold(previous, config.threshold_growth);
    progression.stat_points = progression.stat_points.saturating_add(config.points_per_level);

    creature.needs.adjust(NeedType::Hunger, config.restore_hunger);
    creature.needs.adjust(NeedType::Energy, config.restore_energy);
    creature.needs.adjust(NeedType::Happiness, config.restore_happiness);

    let level = creature.progression.level;
    log::info!(
        "{} reached level {} (next at {} exp)",
        creature.name,
        level,
        creature.progression.required_exp_for_next_level
    );
    events.push(SimEvent::LevelUp {
        level,
        points_granted: config.points_per_level,
    });
}

/// `floor(previous * growth)`, at least 1 and saturating at `u32::MAX`.
/// Worked in f64 so thresholds past 2^24 stay exact.
fn next_threshold(previous: u32, growth: f32) -> u32 {
    let next = (f64::from(previous) * f64::from(growth)).floor();
    (next.min(f64::from(u32::MAX)) as u32).max(1)
}

/// Spend unspent stat points on one attribute
pub fn assign_stat_points(
    creature: &mut Creature,
    stat: StatType,
    points: u32,
) -> Result<(), StatError> {
    if points == 0 {
        return Err(StatError::InvalidPoints("0".into()));
    }
    let available = creature.progression.stat_points;
    if available < points {
        return Err(StatError::InsufficientPoints {
            requested: points,
            available,
        });
    }

    creature.attributes.add(stat, points);
    creature.progression.stat_points -= points;
    log::debug!("Assigned {} points to {}", points, stat.name());
    Ok(())
}

/// String-keyed entry point for UI callers. Rejects unknown stats and
/// zero or negative point counts instead of clamping them.
pub fn assign_stat_points_by_name(
    creature: &mut Creature,
    stat_name: &str,
    points: i64,
) -> Result<(), StatError> {
    let stat: StatType = stat_name.parse()?;
    let points = u32::try_from(points)
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| StatError::InvalidPoints(points.to_string()))?;
    assign_stat_points(creature, stat, points)
}

/// Push one specialty axis up (or down) by `amount`, clamped to 0–100
pub fn train_specialty(creature: &mut Creature, axis: SpecialtyAxis, amount: f32) {
    let specialty = &mut creature.progression.specialty;
    specialty.set(axis, specialty.get(axis) + amount);
}
