//! Interaction system - player commands that care for the creature.
//!
//! Each command either applies completely or is refused without changing
//! anything. A refusal is an ordinary outcome, so it is returned as a
//! [`Refusal`] value and logged at debug level only.

use rand::Rng;

use crate::components::{BehaviorState, Creature, NeedType, SpecialtyAxis, NEED_MAX};
use crate::config::SimConfig;
use crate::error::Refusal;
use crate::events::SimEvent;
use crate::systems::behavior::{start_walk, transition};
use crate::systems::progression::{gain_experience, train_specialty};
use crate::systems::wandering::MAX_WAYPOINTS;

/// Largest amount a single interaction accepts; a full need bar
pub const MAX_INTERACTION_AMOUNT: f32 = NEED_MAX;

/// Above this hunger the creature refuses food
const FEED_REFUSE_HUNGER: f32 = 80.0;
/// Below this energy the creature is too tired to play or socialize
const TIRED_ENERGY: f32 = 20.0;
/// Rest is refused only when both energy and happiness are above these
const REST_REFUSE_ENERGY: f32 = 80.0;
const REST_REFUSE_HAPPINESS: f32 = 40.0;
/// Resting costs a little happiness above this
const REST_HAPPINESS_COST_ABOVE: f32 = 60.0;
const CLEAN_REFUSE_HYGIENE: f32 = 80.0;
/// Below this hunger the creature won't socialize
const SOCIAL_MIN_HUNGER: f32 = 20.0;

fn check_amount(amount: f32) -> Result<(), Refusal> {
    if amount.is_finite() && (0.0..=MAX_INTERACTION_AMOUNT).contains(&amount) {
        Ok(())
    } else {
        Err(Refusal::InvalidAmount)
    }
}

fn refuse(creature: &Creature, action: &str, reason: Refusal) -> Result<(), Refusal> {
    log::debug!("{} refused {}: {}", creature.name, action, reason);
    Err(reason)
}

fn drift(creature: &mut Creature, axis: SpecialtyAxis, config: &SimConfig) {
    train_specialty(creature, axis, config.progression.specialty_drift);
}

pub fn feed(
    creature: &mut Creature,
    amount: f32,
    config: &SimConfig,
    events: &mut Vec<SimEvent>,
) -> Result<(), Refusal> {
    check_amount(amount)?;
    if creature.needs.hunger() > FEED_REFUSE_HUNGER {
        return refuse(creature, "feed", Refusal::NotHungry);
    }

    creature.needs.adjust(NeedType::Hunger, amount);
    creature.needs.adjust(NeedType::Happiness, amount * 0.2);
    if creature.state == BehaviorState::Sleeping {
        transition(creature, BehaviorState::Idle, &config.behavior, events);
    }
    drift(creature, SpecialtyAxis::Data, config);
    Ok(())
}

/// Play burns energy and sends the creature off on a walk; bigger play
/// sessions mean longer walks.
pub fn play(
    creature: &mut Creature,
    amount: f32,
    config: &SimConfig,
    rng: &mut impl Rng,
    events: &mut Vec<SimEvent>,
) -> Result<(), Refusal> {
    check_amount(amount)?;
    if creature.needs.energy() < TIRED_ENERGY {
        return refuse(creature, "play", Refusal::TooTired);
    }

    creature.needs.adjust(NeedType::Happiness, amount);
    creature.needs.adjust(NeedType::Energy, -amount * 0.5);
    creature.needs.adjust(NeedType::Hunger, -amount * 0.3);

    let extra = ((amount / config.behavior.play_amount_per_waypoint).floor() as u32)
        .min(MAX_WAYPOINTS);
    start_walk(creature, extra, config, rng, events);
    drift(creature, SpecialtyAxis::Cipher, config);
    Ok(())
}

pub fn rest(
    creature: &mut Creature,
    amount: f32,
    config: &SimConfig,
    events: &mut Vec<SimEvent>,
) -> Result<(), Refusal> {
    check_amount(amount)?;
    let needs = &creature.needs;
    if needs.energy() > REST_REFUSE_ENERGY && needs.happiness() > REST_REFUSE_HAPPINESS {
        return refuse(creature, "rest", Refusal::NotSleepy);
    }

    creature.needs.adjust(NeedType::Energy, amount);
    if creature.needs.happiness() > REST_HAPPINESS_COST_ABOVE {
        creature.needs.adjust(NeedType::Happiness, -amount * 0.1);
    }
    transition(creature, BehaviorState::Sleeping, &config.behavior, events);
    drift(creature, SpecialtyAxis::Malware, config);
    Ok(())
}

pub fn clean(
    creature: &mut Creature,
    amount: f32,
    config: &SimConfig,
    events: &mut Vec<SimEvent>,
) -> Result<(), Refusal> {
    check_amount(amount)?;
    if creature.needs.hygiene() > CLEAN_REFUSE_HYGIENE {
        return refuse(creature, "clean", Refusal::AlreadyClean);
    }

    creature.needs.adjust(NeedType::Hygiene, amount);
    creature.needs.adjust(NeedType::Happiness, amount * 0.2);
    transition(creature, BehaviorState::Bathing, &config.behavior, events);
    drift(creature, SpecialtyAxis::Security, config);
    Ok(())
}

/// The only interaction that grants experience
pub fn socialize(
    creature: &mut Creature,
    amount: f32,
    config: &SimConfig,
    events: &mut Vec<SimEvent>,
) -> Result<(), Refusal> {
    check_amount(amount)?;
    let needs = &creature.needs;
    if needs.energy() < TIRED_ENERGY || needs.hunger() < SOCIAL_MIN_HUNGER {
        return refuse(creature, "socialize", Refusal::NotInTheMood);
    }

    creature.needs.adjust(NeedType::Social, amount);
    creature.needs.adjust(NeedType::Happiness, amount * 0.5);
    creature.needs.adjust(NeedType::Loyalty, amount * 0.4);
    creature.needs.adjust(NeedType::Energy, -amount * 0.3);

    // Enter the timed state before leveling so level-up restores land on
    // the new state
    transition(creature, BehaviorState::Playing, &config.behavior, events);
    gain_experience(creature, amount, &config.progression, events);
    drift(creature, SpecialtyAxis::Network, config);
    Ok(())
}
