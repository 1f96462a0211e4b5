//! Needs system - decays needs over time, regenerates energy while asleep

use crate::components::{BehaviorState, NeedType, Needs};
use crate::config::NeedRates;

/// Apply one step of decay. Rates are per second of simulated time.
///
/// Loyalty only drains while the creature is distressed (hunger or happiness
/// below the threshold), judged on the values before this step.
pub fn decay_needs(needs: &mut Needs, state: BehaviorState, delta_seconds: f32, rates: &NeedRates) {
    let distressed = needs.is_distressed(rates.distress_threshold);

    needs.adjust(NeedType::Hunger, -rates.hunger * delta_seconds);
    needs.adjust(NeedType::Happiness, -rates.happiness * delta_seconds);
    needs.adjust(NeedType::Hygiene, -rates.hygiene * delta_seconds);
    needs.adjust(NeedType::Social, -rates.social * delta_seconds);

    let energy_delta = if state.is_active() {
        -rates.energy_active
    } else {
        rates.energy_sleeping
    };
    needs.adjust(NeedType::Energy, energy_delta * delta_seconds);

    if distressed {
        needs.adjust(NeedType::Loyalty, -rates.loyalty * delta_seconds);
    }
}
