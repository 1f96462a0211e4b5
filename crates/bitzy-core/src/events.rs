//! Events queued by the simulation for the presentation and persistence layers.

use serde::{Deserialize, Serialize};

use crate::components::BehaviorState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// One event per level gained, even when a single gain crosses several
    LevelUp { level: u32, points_granted: u32 },
    /// A real transition; re-entering the current state emits nothing
    StateChanged {
        from: BehaviorState,
        to: BehaviorState,
    },
    /// The autosave interval elapsed; the host should persist a snapshot
    AutosaveDue,
}
