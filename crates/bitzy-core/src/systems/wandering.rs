//! Wandering system - random-walk waypoint paths within the walk bounds

use rand::Rng;
use std::f32::consts::TAU;

use crate::components::{PathComplexity, Vec2};
use crate::config::PathConfig;

/// Hard ceiling on waypoints in one path
pub const MAX_WAYPOINTS: u32 = 64;

/// Generate a wandering path starting at `start`.
///
/// The waypoint count is drawn uniformly from the complexity range, with
/// both ends capped at [`MAX_WAYPOINTS`]. Each
/// segment keeps the previous heading, turned by at most
/// `config.max_turn_degrees` either way, and runs a step length drawn from
/// `[step_min, step_max]`. Every waypoint is then clamped into the bounds,
/// so paths bend smoothly instead of jumping around.
pub fn generate_path(
    start: Vec2,
    complexity: PathComplexity,
    config: &PathConfig,
    rng: &mut impl Rng,
) -> Vec<Vec2> {
    let (min, max) = complexity.ordered();
    let count = rng.gen_range(min.min(MAX_WAYPOINTS)..=max.min(MAX_WAYPOINTS)) as usize;
    if count == 0 {
        return Vec::new();
    }

    let max_turn = config.max_turn_radians();
    let mut heading = rng.gen_range(0.0..TAU);
    let mut prev = start;
    let mut waypoints = Vec::with_capacity(count);

    for _ in 0..count {
        heading += rng.gen_range(-max_turn..=max_turn);
        let step = rng.gen_range(config.step_min..=config.step_max);
        let next = config.bounds.clamp(prev + Vec2::from_angle(heading) * step);
        waypoints.push(next);
        prev = next;
    }

    waypoints
}
