//! Component definitions for the companion simulation.
//!
//! Components are plain data with small helpers.
//! Behavior that changes them lives in systems.

mod attributes;
mod behavior;
mod common;
mod creature;
mod needs;
mod path;
mod progression;

pub use attributes::*;
pub use behavior::*;
pub use common::*;
pub use creature::*;
pub use needs::*;
pub use path::*;
pub use progression::*;
