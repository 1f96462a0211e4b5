//! Bitzy Core - Virtual Companion Simulation Engine
//!
//! A single creature whose needs decay over time, whose behavior is driven
//! by those needs, and whose long-term growth comes from the care the
//! player gives it.
//!
//! # Architecture
//!
//! - **Components**: Pure data (Needs, Attributes, Progression, Path, ...)
//! - **Systems**: Free functions that update components (needs decay,
//!   interactions, progression, the behavior state machine, wandering and
//!   path following)
//! - **Engine**: Owns the creature and the RNG, normalizes frame time and
//!   runs the systems in order each tick
//!
//! Randomness always comes from a seedable generator owned by the engine,
//! so a seeded run replays identically.
//!
//! # Example
//!
//! ```rust
//! use bitzy_core::prelude::*;
//!
//! let mut engine = SimulationEngine::new("Bitzy");
//!
//! // Run one second of simulation at 60 FPS
//! for _ in 0..60 {
//!     engine.update(1.0 / 60.0, true);
//! }
//!
//! // Full creatures refuse food
//! assert_eq!(engine.feed(20.0), Err(Refusal::NotHungry));
//!
//! for event in engine.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::SimulationEngine;
    pub use crate::error::{ConfigError, Refusal, SaveError, StatError};
    pub use crate::events::SimEvent;
    pub use crate::persistence::{FileStore, MemoryStore, SaveData, SaveStore, SAVE_VERSION};
}
