//! Systems - logic that operates on the creature

pub mod behavior;
pub mod interactions;
pub mod movement;
pub mod needs;
pub mod progression;
pub mod wandering;

pub use behavior::*;
pub use interactions::*;
pub use movement::*;
pub use needs::*;
pub use progression::*;
pub use wandering::*;
