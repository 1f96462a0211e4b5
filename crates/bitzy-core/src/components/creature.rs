//! The creature aggregate - the single simulated entity.

use serde::{Deserialize, Serialize};

use super::{
    Attributes, BehaviorState, Needs, Path, PathComplexity, Progression, StateTimers, Vec2,
};

/// Glitch intensity hint while the creature is distressed
pub const GLITCH_DISTRESSED: f32 = 0.6;
/// Glitch intensity hint otherwise
pub const GLITCH_CALM: f32 = 0.2;

/// All state of the companion. Fields are crate-visible so the systems can
/// mutate them; outside the crate everything goes through accessors or the
/// engine's command interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub(crate) name: String,
    pub(crate) needs: Needs,
    pub(crate) attributes: Attributes,
    pub(crate) progression: Progression,
    pub(crate) state: BehaviorState,
    pub(crate) timers: StateTimers,
    pub(crate) path: Path,
    pub(crate) position: Vec2,
    /// Yaw in radians, `atan2(dx, dz)` of the last travel direction
    pub(crate) heading: f32,
    pub(crate) walk_speed: f32,
    pub(crate) path_complexity: PathComplexity,
}

impl Creature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            needs: Needs::default(),
            attributes: Attributes::default(),
            progression: Progression::default(),
            state: BehaviorState::Idle,
            timers: StateTimers::default(),
            path: Path::default(),
            position: Vec2::ZERO,
            heading: 0.0,
            walk_speed: 0.5,
            path_complexity: PathComplexity::default(),
        }
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn needs(&self) -> &Needs {
        &self.needs
    }

    /// Debug hook for tools and tests; every write is still clamped.
    /// Hosts change needs through the interactions instead.
    #[doc(hidden)]
    pub fn needs_mut(&mut self) -> &mut Needs {
        &mut self.needs
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn timers(&self) -> &StateTimers {
        &self.timers
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn walk_speed(&self) -> f32 {
        self.walk_speed
    }

    pub fn path_complexity(&self) -> PathComplexity {
        self.path_complexity
    }

    /// Hunger or happiness below `threshold`
    pub fn is_distressed(&self, threshold: f32) -> bool {
        self.needs.is_distressed(threshold)
    }

    /// Shader glitch intensity the presentation layer should use
    pub fn glitch_intensity(&self, threshold: f32) -> f32 {
        if self.is_distressed(threshold) {
            GLITCH_DISTRESSED
        } else {
            GLITCH_CALM
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::NeedType;

    #[test]
    fn test_new_creature() {
        let c = Creature::new("Bitzy");
        assert_eq!(c.name(), "Bitzy");
        assert_eq!(c.state(), BehaviorState::Idle);
        assert!(c.path().is_empty());
        assert_eq!(c.progression().level, 1);
        assert_eq!(c.position(), Vec2::ZERO);
    }

    #[test]
    fn test_glitch_intensity_follows_distress() {
        let mut c = Creature::new("Bitzy");
        assert_eq!(c.glitch_intensity(30.0), GLITCH_CALM);
        c.needs_mut().set(NeedType::Hunger, 10.0);
        assert_eq!(c.glitch_intensity(30.0), GLITCH_DISTRESSED);
    }
}
