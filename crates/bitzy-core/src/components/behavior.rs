//! Behavior state and the per-state timers advanced by the tick.

use serde::{Deserialize, Serialize};

/// What the creature is doing. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BehaviorState {
    #[default]
    Idle,
    Walking,
    Sleeping,
    Bathing,
    Playing,
}

impl BehaviorState {
    pub const ALL: [BehaviorState; 5] = [
        BehaviorState::Idle,
        BehaviorState::Walking,
        BehaviorState::Sleeping,
        BehaviorState::Bathing,
        BehaviorState::Playing,
    ];

    /// Animation asset the presentation layer plays for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            BehaviorState::Idle => "idle",
            BehaviorState::Walking => "walking",
            BehaviorState::Sleeping => "sleeping",
            BehaviorState::Bathing => "bathing",
            BehaviorState::Playing => "playing",
        }
    }

    /// Awake states drain energy; sleeping restores it
    pub fn is_active(&self) -> bool {
        !matches!(self, BehaviorState::Sleeping)
    }

    /// States that revert to idle on their own when a cooldown expires
    pub fn is_timed(&self) -> bool {
        matches!(self, BehaviorState::Bathing | BehaviorState::Playing)
    }
}

/// Timers owned by the current state. Reset on every real transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateTimers {
    /// Time spent idle since the last idle evaluation
    pub idle_elapsed: f32,
    /// Remaining time before a timed state reverts to idle
    pub cooldown_remaining: Option<f32>,
}

impl StateTimers {
    pub fn for_state(cooldown: Option<f32>) -> Self {
        Self {
            idle_elapsed: 0.0,
            cooldown_remaining: cooldown,
        }
    }

    /// Advance the cooldown; returns true once it has run out
    pub fn tick_cooldown(&mut self, dt: f32) -> bool {
        match self.cooldown_remaining.as_mut() {
            Some(remaining) => {
                *remaining -= dt;
                *remaining <= 0.0
            }
            None => false,
        }
    }
}
