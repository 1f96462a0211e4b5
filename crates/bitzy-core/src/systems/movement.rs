//! Movement system - walks the creature along its waypoint path

use crate::components::Creature;

/// Advance the creature along its path by `walk_speed * delta_seconds`.
///
/// When the travel budget covers the distance to the current waypoint the
/// creature snaps onto it and spends what is left on the following
/// waypoints in the same step, so corners do not cost speed. Heading is
/// turned to face each leg actually travelled.
///
/// Returns true once the path has no waypoints left.
pub fn follow_path(creature: &mut Creature, delta_seconds: f32) -> bool {
    let mut budget = (creature.walk_speed * delta_seconds).max(0.0);

    while let Some(target) = creature.path.current() {
        let to_target = target - creature.position;
        let distance = to_target.length();

        if let Some(yaw) = to_target.yaw() {
            creature.heading = yaw;
        }

        if distance <= budget {
            // Arrived at this waypoint, carry the leftover to the next one
            creature.position = target;
            creature.path.advance();
            budget -= distance;
        } else {
            creature.position = creature.position + to_target.normalize() * budget;
            break;
        }
    }

    creature.path.is_finished()
}
